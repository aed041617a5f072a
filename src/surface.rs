use std::fmt;
use std::io::Cursor;

use egui::{Color32, Pos2};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgba, RgbaImage};

use crate::error::{SurfaceError, SurfaceResult};
use crate::export::ImageFormat;
use crate::snapshot::Snapshot;

/// Color a fresh surface is filled with, and the color the eraser paints
pub const DEFAULT_BACKGROUND: Color32 = Color32::WHITE;

/// JPEG export quality (0-100)
const JPEG_QUALITY: u8 = 90;

/// A fixed-size RGBA pixel buffer with primitive drawing operations.
///
/// The surface is mutated only through the drawing primitives, `clear`, or a
/// full-buffer snapshot restore. Dimensions are fixed for the surface's
/// lifetime. Input coordinates are clamped to the buffer, never rejected, so
/// tools tolerate pointer positions outside the canvas.
pub struct Surface {
    pixels: RgbaImage,
    background: Color32,
    /// Bumped on every mutation; lets callers skip redundant texture uploads
    revision: u64,
}

impl Surface {
    /// Allocate a buffer filled with the default background color.
    ///
    /// Fails with `InvalidDimensions` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> SurfaceResult<Self> {
        Self::with_background(width, height, DEFAULT_BACKGROUND)
    }

    /// Allocate a buffer filled with a custom background color
    pub fn with_background(width: u32, height: u32, background: Color32) -> SurfaceResult<Self> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        let pixels = RgbaImage::from_pixel(width, height, to_rgba(background));
        log::info!("allocated {}x{} surface", width, height);
        Ok(Self {
            pixels,
            background,
            revision: 1,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixels.width(), self.pixels.height())
    }

    pub fn background_color(&self) -> Color32 {
        self.background
    }

    /// Counter that changes whenever the pixel contents change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Raw RGBA bytes, row-major, for texture upload
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Read one pixel; `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x < self.pixels.width() && y < self.pixels.height() {
            let p = self.pixels.get_pixel(x, y);
            Some(Color32::from_rgba_premultiplied(p[0], p[1], p[2], p[3]))
        } else {
            None
        }
    }

    /// Draw a line segment with round caps of the given width.
    ///
    /// Used by the brush and eraser; the eraser passes the background color.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, color: Color32, width: f32) {
        let from = self.clamp_point(from);
        let to = self.clamp_point(to);
        self.walk_segment(from, to, half_width(width), to_rgba(color));
        self.revision += 1;
    }

    /// Draw an axis-aligned rectangle between two opposite corners,
    /// filled or outlined at the stroke width
    pub fn draw_rectangle(
        &mut self,
        corner1: Pos2,
        corner2: Pos2,
        color: Color32,
        width: f32,
        filled: bool,
    ) {
        let corner1 = self.clamp_point(corner1);
        let corner2 = self.clamp_point(corner2);
        let rgba = to_rgba(color);

        let min = Pos2::new(corner1.x.min(corner2.x), corner1.y.min(corner2.y));
        let max = Pos2::new(corner1.x.max(corner2.x), corner1.y.max(corner2.y));

        if filled {
            // Corners are already in bounds, so the loop range is too
            let x0 = min.x.round() as u32;
            let x1 = max.x.round() as u32;
            let y0 = min.y.round() as u32;
            let y1 = max.y.round() as u32;
            for y in y0..=y1 {
                for x in x0..=x1 {
                    self.pixels.put_pixel(x, y, rgba);
                }
            }
        } else {
            let radius = half_width(width);
            let top_right = Pos2::new(max.x, min.y);
            let bottom_left = Pos2::new(min.x, max.y);
            self.walk_segment(min, top_right, radius, rgba);
            self.walk_segment(top_right, max, radius, rgba);
            self.walk_segment(max, bottom_left, radius, rgba);
            self.walk_segment(bottom_left, min, radius, rgba);
        }
        self.revision += 1;
    }

    /// Draw a circle centered at `center` whose radius is the distance to
    /// `focus`, filled or outlined at the stroke width
    pub fn draw_ellipse(
        &mut self,
        center: Pos2,
        focus: Pos2,
        color: Color32,
        width: f32,
        filled: bool,
    ) {
        let center = self.clamp_point(center);
        let focus = self.clamp_point(focus);
        let rgba = to_rgba(color);
        let radius = center.distance(focus);
        let half = half_width(width);

        let reach = radius + half;
        let x0 = ((center.x - reach).floor() as i32).max(0);
        let x1 = ((center.x + reach).ceil() as i32).min(self.pixels.width() as i32 - 1);
        let y0 = ((center.y - reach).floor() as i32).max(0);
        let y1 = ((center.y + reach).ceil() as i32).min(self.pixels.height() as i32 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let distance = Pos2::new(x as f32, y as f32).distance(center);
                let covered = if filled {
                    distance <= radius
                } else {
                    (distance - radius).abs() <= half
                };
                if covered {
                    self.pixels.put_pixel(x as u32, y as u32, rgba);
                }
            }
        }
        self.revision += 1;
    }

    /// Draw an isosceles triangle from the apex and the drag point.
    ///
    /// The third vertex mirrors the drag point across the vertical line
    /// through the apex, matching the drag-to-size gesture.
    pub fn draw_triangle(
        &mut self,
        apex: Pos2,
        drag: Pos2,
        color: Color32,
        width: f32,
        filled: bool,
    ) {
        let apex = self.clamp_point(apex);
        let drag = self.clamp_point(drag);
        let mirrored = Pos2::new(2.0 * apex.x - drag.x, drag.y);
        let rgba = to_rgba(color);

        if filled {
            self.fill_triangle(apex, drag, mirrored, rgba);
        } else {
            // The mirrored vertex can land outside the buffer; the walk
            // discards out-of-range pixels
            let radius = half_width(width);
            self.walk_segment(apex, drag, radius, rgba);
            self.walk_segment(drag, mirrored, radius, rgba);
            self.walk_segment(mirrored, apex, radius, rgba);
        }
        self.revision += 1;
    }

    /// O(width x height) copy of the current pixels
    pub fn capture_snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.pixels.width(),
            self.pixels.height(),
            self.pixels.as_raw().clone(),
        )
    }

    /// Overwrite the live buffer from a snapshot. Does not touch history.
    ///
    /// A snapshot with mismatched dimensions is ignored with a warning.
    pub fn restore_snapshot(&mut self, snapshot: &Snapshot) {
        if snapshot.dimensions() != self.dimensions() {
            log::warn!(
                "ignoring snapshot restore: snapshot is {}x{}, surface is {}x{}",
                snapshot.width(),
                snapshot.height(),
                self.pixels.width(),
                self.pixels.height()
            );
            return;
        }
        self.pixels.copy_from_slice(snapshot.data());
        self.revision += 1;
    }

    /// Reset every pixel to the background color.
    ///
    /// Committing the cleared state to history is the caller's concern.
    pub fn clear(&mut self) {
        let rgba = to_rgba(self.background);
        for pixel in self.pixels.pixels_mut() {
            *pixel = rgba;
        }
        self.revision += 1;
    }

    /// Serialize the current buffer to an encoded raster image
    pub fn export_encoded(&self, format: ImageFormat) -> SurfaceResult<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut cursor = Cursor::new(&mut bytes);
        match format {
            ImageFormat::Png => {
                self.pixels.write_to(&mut cursor, image::ImageFormat::Png)?;
            }
            ImageFormat::Jpeg => {
                // JPEG carries no alpha channel; flatten to RGB first
                let rgb = DynamicImage::ImageRgba8(self.pixels.clone()).into_rgb8();
                let mut encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
                encoder.encode_image(&rgb)?;
            }
        }
        log::info!(
            "encoded {}x{} canvas as {} ({} bytes)",
            self.pixels.width(),
            self.pixels.height(),
            format.extension(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Clamp a point into the buffer, per the drag-off-edge tolerance rule
    fn clamp_point(&self, point: Pos2) -> Pos2 {
        Pos2::new(
            point.x.clamp(0.0, (self.pixels.width() - 1) as f32),
            point.y.clamp(0.0, (self.pixels.height() - 1) as f32),
        )
    }

    /// Bresenham walk from `from` to `to`, stamping a disc at every step
    fn walk_segment(&mut self, from: Pos2, to: Pos2, radius: f32, rgba: Rgba<u8>) {
        let mut x0 = from.x.round() as i32;
        let mut y0 = from.y.round() as i32;
        let x1 = to.x.round() as i32;
        let y1 = to.y.round() as i32;

        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp_disc(x0, y0, radius, rgba);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Stamp a filled disc; this is what gives segments their round caps
    fn stamp_disc(&mut self, cx: i32, cy: i32, radius: f32, rgba: Rgba<u8>) {
        let bound = radius.ceil() as i32;
        let radius_sq = radius * radius;
        for dy in -bound..=bound {
            for dx in -bound..=bound {
                if (dx * dx + dy * dy) as f32 <= radius_sq {
                    self.put_pixel(cx + dx, cy + dy, rgba);
                }
            }
        }
    }

    /// Write one pixel, discarding coordinates outside the buffer
    fn put_pixel(&mut self, x: i32, y: i32, rgba: Rgba<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return;
        }
        self.pixels.put_pixel(x, y, rgba);
    }

    /// Rasterize a filled triangle with an edge-function inside test
    fn fill_triangle(&mut self, a: Pos2, b: Pos2, c: Pos2, rgba: Rgba<u8>) {
        let x0 = (a.x.min(b.x).min(c.x).floor() as i32).max(0);
        let x1 = (a.x.max(b.x).max(c.x).ceil() as i32).min(self.pixels.width() as i32 - 1);
        let y0 = (a.y.min(b.y).min(c.y).floor() as i32).max(0);
        let y1 = (a.y.max(b.y).max(c.y).ceil() as i32).min(self.pixels.height() as i32 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Pos2::new(x as f32, y as f32);
                let d0 = edge_function(a, b, p);
                let d1 = edge_function(b, c, p);
                let d2 = edge_function(c, a, p);
                // Inside when all edge distances share a sign, either winding
                let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
                let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
                if !(has_neg && has_pos) {
                    self.pixels.put_pixel(x as u32, y as u32, rgba);
                }
            }
        }
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("revision", &self.revision)
            .finish()
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), color.a()])
}

/// Disc radius for a stroke width; never below half a pixel
fn half_width(width: f32) -> f32 {
    (width / 2.0).max(0.5)
}

fn edge_function(a: Pos2, b: Pos2, p: Pos2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
