//! Interfaces to everything outside the core
//!
//! Portal login, HTTP retrieval, the e-paper panel and the file system are
//! owned by the host. The core reaches them only through these traits and
//! performs no retries of its own: a failed call is reported to the caller
//! synchronously.

extern crate alloc;

use alloc::string::String;
use thiserror_no_std::Error;

use crate::aggregator::QueryWindow;
use crate::canvas::{GrayCanvas, MonoCanvas};
use crate::model::{Metric, TimeSeries};
use crate::render::RenderedScreen;

/// Opaque bearer credential handed out by a [`TokenProvider`]
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Login failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("Portal credentials are not configured")]
    MissingCredentials,

    #[error("Portal login failed: {reason}")]
    LoginFailed { reason: String },
}

/// Series retrieval failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortalError {
    /// The credential was rejected (HTTP 401)
    #[error("Portal rejected the credential")]
    Unauthorized,

    #[error("Portal transport error: {reason}")]
    Transport { reason: String },

    #[error("Portal response could not be decoded: {reason}")]
    Decode { reason: String },
}

/// Display and export failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SinkError {
    #[error("Display hardware error: {reason}")]
    Hardware { reason: String },

    #[error("Writing {name} failed: {reason}")]
    Write { name: String, reason: String },
}

/// Supplies a bearer credential for the portal, typically via browser login
pub trait TokenProvider {
    fn token(&mut self) -> Result<Credential, AuthError>;
}

/// Retrieves time series from the portal
pub trait PortalClient {
    /// Fetch one metric over `window`.
    ///
    /// Returns `Ok(None)` when the portal answered but did not report the
    /// metric at all.
    fn fetch_series(
        &mut self,
        credential: &Credential,
        metric: Metric,
        window: &QueryWindow,
    ) -> Result<Option<TimeSeries>, PortalError>;
}

/// The physical e-paper panel
pub trait DisplaySink {
    /// Show a 1-bit canvas
    fn render(&mut self, canvas: &MonoCanvas) -> Result<(), SinkError>;

    /// Show a 4-level grayscale canvas
    fn render_gray4(&mut self, canvas: &GrayCanvas) -> Result<(), SinkError>;
}

/// File fallback used when the display cannot be driven
pub trait CanvasArchive {
    fn save(&mut self, name: &str, screen: &RenderedScreen) -> Result<(), SinkError>;
}
