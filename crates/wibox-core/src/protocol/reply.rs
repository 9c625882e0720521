//! Reply parsing for discovery datagrams.

use std::fmt;

use serde::{Serialize, Serializer};

use super::{MARKER_OFFSET, METADATA_RANGE, REPLY_MARKER};

/// Opaque metadata bytes from a discovery reply.
///
/// The bytes are passed through untouched and only rendered as hex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceMetadata(Vec<u8>);

impl DeviceMetadata {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex, 12 characters for a full-length reply.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DeviceMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for DeviceMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Parse a received datagram.
///
/// Returns the metadata slice when byte 3 carries the reply marker, `None`
/// for any other traffic. Replies shorter than the metadata range yield
/// whatever bytes of it are present.
pub fn parse_reply(payload: &[u8]) -> Option<DeviceMetadata> {
    if payload.get(MARKER_OFFSET) != Some(&REPLY_MARKER) {
        return None;
    }

    let start = METADATA_RANGE.start.min(payload.len());
    let end = METADATA_RANGE.end.min(payload.len());

    Some(DeviceMetadata::new(&payload[start..end]))
}
