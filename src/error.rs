use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Errors raised at the crate edges (payload parsing, config validation,
/// backend construction). Rendering itself never fails.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
