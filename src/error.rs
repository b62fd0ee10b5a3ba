//! Unified error types for the font comparison engine.

use std::fmt;

/// Application-specific errors.
#[derive(Debug)]
pub enum AppError {
    /// No resource locator exists anywhere in the fallback chain for a triple
    NoResource(String),
    /// The host registration primitive rejected a resource
    FontLoad(String),
    /// A catalog append contained an id that already exists
    DuplicateId(String),
    /// Upload ingestion produced no usable descriptor
    Upload(String),
    /// The settings snapshot could not be read or written
    Settings(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NoResource(msg) => write!(f, "No font resource available: {}", msg),
            AppError::FontLoad(msg) => write!(f, "Font load error: {}", msg),
            AppError::DuplicateId(id) => write!(f, "Duplicate catalog id: {}", id),
            AppError::Upload(msg) => write!(f, "Upload error: {}", msg),
            AppError::Settings(msg) => write!(f, "Settings error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Settings(err.to_string())
    }
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;
