//! Error types for the Galaxy2D engine
//!
//! This module defines the error types used throughout the engine,
//! including rendering backends, scene configuration, and layer resources.

use std::fmt;

/// Result type for Galaxy2D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy2D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (software blitter, GPU backend, etc.)
    BackendError(String),

    /// Out of texture memory
    OutOfMemory,

    /// Invalid resource (raster, texture, layer)
    InvalidResource(String),

    /// Invalid configuration (scene dimensions, screen count, scale factor)
    InvalidConfiguration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of texture memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR and build an `Error::BackendError` from the same message
///
/// # Example
///
/// ```no_run
/// # use galaxy_2d_engine::engine_err;
/// # let reason = "out of memory";
/// let err = engine_err!("galaxy2d::soft", "Blit failed: {}", reason);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy2d::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with an `Error::BackendError`
///
/// # Example
///
/// ```no_run
/// # use galaxy_2d_engine::engine_bail;
/// # fn f() -> galaxy_2d_engine::galaxy2d::Result<()> {
/// # let name = "tex";
/// engine_bail!("galaxy2d::soft", "Texture {} is not resident", name);
/// # }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

/// Log an ERROR and return early with an `Error::InvalidConfiguration`
///
/// Used for configuration-time validation (scene size, screen count, ...).
#[macro_export]
macro_rules! engine_bail_config {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        return Err($crate::galaxy2d::Error::InvalidConfiguration(message));
    }};
}

/// Log an ERROR and return early with an `Error::InvalidResource`
///
/// Used when a raster, texture or layer handed to the engine is unusable.
#[macro_export]
macro_rules! engine_bail_resource {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        return Err($crate::galaxy2d::Error::InvalidResource(message));
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
