//! Shared core library for WiBox discovery tools.
//!
//! Finds serial-to-Ethernet bridges with a single UDP broadcast query and
//! models the numbered menu used to pick one of them.

pub mod discovery;
pub mod error;
pub mod protocol;
pub mod selector;
pub mod types;

pub use discovery::{discover, DiscoveryOptions, DiscoveryService};
pub use error::DiscoveryError;
pub use selector::{Menu, MenuEntry};
pub use types::DiscoveredDevice;
