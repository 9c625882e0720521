//! Shared types.

use std::net::IpAddr;

use serde::Serialize;

use crate::protocol::DeviceMetadata;

/// A device that answered the discovery query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredDevice {
    /// Source address of the reply
    pub address: IpAddr,
    /// Opaque bytes 24..30 of the reply
    pub metadata: DeviceMetadata,
}

impl DiscoveredDevice {
    pub fn new(address: IpAddr, metadata: DeviceMetadata) -> Self {
        Self { address, metadata }
    }
}
