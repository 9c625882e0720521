//! Accumulates discovery replies in arrival order.

use std::net::SocketAddr;

use crate::protocol::parse_reply;
use crate::types::DiscoveredDevice;

/// Collects valid replies for one scan.
///
/// Devices that answer more than once appear more than once.
#[derive(Debug, Default)]
pub struct ReplyCollector {
    devices: Vec<DiscoveredDevice>,
}

impl ReplyCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a datagram. Returns `true` if it was a discovery reply.
    pub fn accept(&mut self, payload: &[u8], source: SocketAddr) -> bool {
        match parse_reply(payload) {
            Some(metadata) => {
                self.devices
                    .push(DiscoveredDevice::new(source.ip(), metadata));
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn into_devices(self) -> Vec<DiscoveredDevice> {
        self.devices
    }
}
