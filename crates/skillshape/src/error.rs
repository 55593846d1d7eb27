#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown shape identifier: {shape_id}")]
    UnknownShape { shape_id: String },

    #[error("unknown connection topology: {name}")]
    UnknownTopology { name: String },

    #[error("drawing area must be positive and finite (got {width}x{height})")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("invalid outline coordinates: {message}")]
    InvalidOutline { message: String },

    #[error("invalid vector path: {message}")]
    InvalidPath { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
