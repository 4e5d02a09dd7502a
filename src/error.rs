use thiserror::Error;

/// Errors raised while configuring or running terrain generation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid dimensions {height}x{width}: both must be positive")]
    InvalidDimensions { height: usize, width: usize },
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fails fast on an empty grid, before anything gets allocated.
pub fn check_dimensions(height: usize, width: usize) -> Result<()> {
    if height == 0 || width == 0 {
        return Err(Error::InvalidDimensions { height, width });
    }
    Ok(())
}

/// Parse one grid dimension from text. Zero or negative values are
/// dimension errors; anything that is not an integer is a parameter error.
pub fn parse_dimension(text: &str, label: &str) -> Result<usize> {
    let value: i64 = text.trim().parse().map_err(|_| {
        Error::InvalidParams(format!("{label} must be a positive integer, got {text:?}"))
    })?;
    if value <= 0 {
        let (height, width) = if label == "width" { (1, 0) } else { (0, 1) };
        return Err(Error::InvalidDimensions { height, width });
    }
    usize::try_from(value)
        .map_err(|_| Error::InvalidParams(format!("{label} {value} is too large")))
}
