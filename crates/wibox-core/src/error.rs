//! Error types for WiBox discovery.
//!
//! Only socket setup and the broadcast send are fatal to a scan. Receive
//! errors during the listen window are logged and swallowed by the service.

use thiserror::Error;

/// Fatal discovery errors
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to create and configure socket: {0}")]
    Socket(#[source] std::io::Error),

    #[error("Failed to send broadcast query: {0}")]
    Send(#[source] std::io::Error),
}

impl DiscoveryError {
    /// The underlying OS error.
    pub fn io_error(&self) -> &std::io::Error {
        match self {
            DiscoveryError::Socket(e) | DiscoveryError::Send(e) => e,
        }
    }
}

/// Result type for discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;
