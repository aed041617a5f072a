use thiserror::Error;

/// Errors that can occur during surface operations
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface has not been initialized")]
    NotInitialized,

    #[error("invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("failed to encode canvas: {0}")]
    EncodingFailed(#[from] image::ImageError),

    #[error("failed to write exported canvas: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;
