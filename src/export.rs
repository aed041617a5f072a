use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SurfaceResult;
use crate::surface::Surface;
use crate::util::time;

/// Encodings supported for canvas export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }
}

/// File name for an export taken right now, e.g. `1724672381000.jpg`
pub fn timestamped_file_name(format: ImageFormat) -> String {
    format!("{}.{}", time::timestamp_millis(), format.extension())
}

/// Encode the surface and write it under `dir` with a timestamped name.
///
/// Returns the path of the written file.
pub fn save_to_disk(surface: &Surface, dir: &Path, format: ImageFormat) -> SurfaceResult<PathBuf> {
    let bytes = surface.export_encoded(format)?;
    let path = dir.join(timestamped_file_name(format));
    fs::write(&path, &bytes)?;
    log::info!("saved canvas to {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_per_format() {
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::Png.extension(), "png");
    }

    #[test]
    fn test_timestamped_name_shape() {
        let name = timestamped_file_name(ImageFormat::Jpeg);
        let stem = name.strip_suffix(".jpg").expect("jpg suffix");
        assert!(stem.parse::<u64>().is_ok(), "stem should be a timestamp: {}", name);
    }
}
