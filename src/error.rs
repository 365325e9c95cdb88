use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("half-extents must be positive, got ({half_width}, {half_height})")]
    InvalidExtent { half_width: f64, half_height: f64 },
    #[error("region center must be finite, got ({x}, {y})")]
    NonFiniteCenter { x: f64, y: f64 },
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}
