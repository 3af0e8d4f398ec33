//! Error types for geometry, matrix math, configuration and the GPU driver.

use std::path::PathBuf;

/// Errors raised by the sphere generator and the matrix library.
///
/// Both are pure, so every error is reported synchronously at the call that
/// received the bad input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A numeric argument is outside the range the operation accepts.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// Look-at vectors do not span a basis (eye == center, or forward parallel to up).
    #[error("degenerate look-at basis: {0}")]
    DegenerateBasis(&'static str),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from loading or validating the TOML configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors from window and GPU setup or from the frame loop.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("no suitable GPU adapter found: {0}")]
    AdapterNotFound(String),

    #[error("device error: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("window error: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    Geometry(#[from] Error),
}
