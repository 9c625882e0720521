//! Wire protocol for WiBox discovery.
//!
//! This module holds the fixed query datagram and the reply parser.

pub mod reply;

pub use reply::{parse_reply, DeviceMetadata};

use std::ops::Range;

/// Well-known UDP port used for both the query and the replies
pub const DISCOVERY_PORT: u16 = 30718;

/// "Who is out there" query broadcast to every device
pub const DISCOVERY_QUERY: [u8; 4] = [0x00, 0x00, 0x00, 0xF6];

/// Offset of the byte identifying a discovery reply
pub const MARKER_OFFSET: usize = 3;

/// Expected value at `MARKER_OFFSET`
pub const REPLY_MARKER: u8 = 0xF7;

/// Opaque device metadata carried in a reply
pub const METADATA_RANGE: Range<usize> = 24..30;

/// Largest reply datagram read from the socket
pub const MAX_REPLY_LEN: usize = 128;
