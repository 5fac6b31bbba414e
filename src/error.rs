use std::fmt;

use crate::context::InitStep;

/// Error type for the scrolling demo.
#[derive(Debug)]
pub enum DemoError {
    /// A bootstrap step failed; earlier steps have already been released.
    Init {
        /// The step that failed.
        step: InitStep,
        /// Error text reported by the underlying subsystem.
        message: String,
    },
    /// The tile sheet could not be read or decoded.
    AssetLoad {
        /// Path of the tile sheet.
        path: String,
        /// Reason reported by the reader or decoder.
        message: String,
    },
    /// Grid dimensions or tile ids do not fit the map or the tile sheet
    InvalidGrid(String),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoError::Init { step, message } => write!(f, "error: on {}. {}", step, message),
            DemoError::AssetLoad { path, message } => {
                write!(f, "error: loading tile sheet '{}'. {}", path, message)
            }
            DemoError::InvalidGrid(msg) => write!(f, "Invalid tile grid: {}", msg),
        }
    }
}

impl std::error::Error for DemoError {}
