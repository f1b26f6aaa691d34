//! Error types for the Galaxy3D G-buffer
//!
//! This module defines the error types returned by the graphics device
//! abstraction, the attachment cache and the shader state.

use std::fmt;

/// Result type for Galaxy3D G-buffer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D G-buffer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (device refused a resource or view)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (unknown G-buffer key, view of a missing texture, etc.)
    InvalidResource(String),

    /// Caller broke a precondition (e.g. zero width or height).
    /// Raised before any state is touched.
    ContractViolation(String),

    /// A shader program failed to compile
    ShaderCompilationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::ContractViolation(msg) => write!(f, "Contract violation: {}", msg),
            Error::ShaderCompilationFailed(msg) => write!(f, "Shader compilation failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
