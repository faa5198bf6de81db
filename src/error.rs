//! Library error type.
//!
//! Layout itself never fails; errors come from reading input, loading
//! configuration and rasterizing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FloorError {
    #[error("invalid floor spec: {0}")]
    Spec(String),

    #[error("invalid room mapping: {0}")]
    Mapping(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("floor spec failed {count} check(s): {first}")]
    Check { count: usize, first: String },

    #[cfg(feature = "png")]
    #[error("failed to parse SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("failed to allocate {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Png(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FloorError>;
