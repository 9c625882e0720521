//! CLI argument definitions using clap.

use std::net::Ipv4Addr;

use clap::{Args, Parser, Subcommand};
use wibox_core::protocol::DISCOVERY_PORT;

/// WiBox CLI - find serial-to-Ethernet bridges on the local network
#[derive(Parser, Debug)]
#[command(name = "wibox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Local UDP port to bind for discovery
    #[arg(long, global = true, default_value_t = DISCOVERY_PORT, env = "WIBOX_DISCOVERY_PORT")]
    pub port: u16,

    /// Destination address of the broadcast query
    #[arg(long, global = true, default_value = "255.255.255.255", env = "WIBOX_BROADCAST_ADDR")]
    pub broadcast_addr: Ipv4Addr,

    /// Runs the interactive selector when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List devices that answer the discovery broadcast
    Discover(DiscoverArgs),

    /// Pick one interface from a numbered menu
    Choose(ChooseArgs),
}

// ==================== Discover ====================

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Discovery window in seconds
    #[arg(short, long, default_value = "4", env = "WIBOX_DISCOVERY_WINDOW")]
    pub duration: u64,
}

// ==================== Choose ====================

#[derive(Args, Debug)]
pub struct ChooseArgs {
    /// Discovery window in seconds
    #[arg(short, long, default_value = "3", env = "WIBOX_DISCOVERY_WINDOW")]
    pub duration: u64,

    /// Prefix for progress messages
    #[arg(long)]
    pub log_prefix: Option<String>,
}

impl Default for ChooseArgs {
    fn default() -> Self {
        Self {
            duration: 3,
            log_prefix: None,
        }
    }
}
