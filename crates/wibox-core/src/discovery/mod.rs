//! UDP broadcast discovery.
//!
//! Provides the reply collector and the one-shot discovery service.

pub mod collector;
pub mod service;

pub use collector::ReplyCollector;
pub use service::{create_broadcast_socket, DiscoveryOptions, DiscoveryService};

use std::time::Duration;

use crate::error::DiscoveryError;
use crate::types::DiscoveredDevice;

/// Scan with default port and broadcast target for `window`.
pub async fn discover(
    window: Duration,
    verbose: bool,
) -> Result<Vec<DiscoveredDevice>, DiscoveryError> {
    let options = DiscoveryOptions {
        verbose,
        ..DiscoveryOptions::with_window(window)
    };
    DiscoveryService::new(options).discover().await
}
