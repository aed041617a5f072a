use serde::{Deserialize, Serialize};

pub const ZOOM_STEP: f32 = 0.1;
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 4.0;

/// Zoom state for the canvas view.
///
/// Zoom is presentation only; it scales how the canvas is displayed and how
/// pointer positions map into buffer coordinates, never the buffer itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    zoom: f32,
}

impl ViewTransform {
    pub fn new() -> Self {
        Self { zoom: 1.0 }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_out_stops_at_floor() {
        let mut view = ViewTransform::new();
        for _ in 0..10 {
            view.zoom_out();
        }
        assert_eq!(view.zoom(), MIN_ZOOM);

        // Further attempts stay pinned
        view.zoom_out();
        assert_eq!(view.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_zoom_in_stops_at_ceiling() {
        let mut view = ViewTransform::new();
        for _ in 0..100 {
            view.zoom_in();
        }
        assert_eq!(view.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_zoom_steps_are_symmetric() {
        let mut view = ViewTransform::new();
        view.zoom_in();
        view.zoom_in();
        view.zoom_out();
        view.zoom_out();
        assert!((view.zoom() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut view = ViewTransform::new();
        view.zoom_in();
        view.reset();
        assert_eq!(view.zoom(), 1.0);
    }
}
