use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidKey(String),
    InvalidSourceRef(String),
    InvalidAssetIndex(u32),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidKey(msg) => write!(f, "invalid entity key: {msg}"),
            ModelError::InvalidSourceRef(msg) => {
                write!(f, "invalid source reference: {msg}")
            }
            ModelError::InvalidAssetIndex(index) => {
                write!(f, "asset indices are 1-based, got {index}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
