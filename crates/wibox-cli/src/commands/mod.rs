//! Command implementations.

pub mod choose;
pub mod discover;

pub use choose::run_choose;
pub use discover::run_discover;

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use wibox_core::DiscoveryOptions;

use crate::cli::Cli;
use crate::error::CliError;

/// Flags shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub json: bool,
    pub verbose: bool,
    pub port: u16,
    pub broadcast_addr: Ipv4Addr,
}

impl GlobalArgs {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            verbose: cli.verbose,
            port: cli.port,
            broadcast_addr: cli.broadcast_addr,
        }
    }

    /// Discovery options for a window of `duration_secs`.
    pub fn discovery_options(&self, duration_secs: u64) -> Result<DiscoveryOptions, CliError> {
        if duration_secs == 0 {
            return Err(CliError::InvalidArgument(
                "duration must be at least 1 second".to_string(),
            ));
        }

        Ok(DiscoveryOptions {
            port: self.port,
            target: SocketAddr::V4(SocketAddrV4::new(self.broadcast_addr, self.port)),
            window: Duration::from_secs(duration_secs),
            verbose: self.verbose,
            ..DiscoveryOptions::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globals() -> GlobalArgs {
        GlobalArgs {
            json: false,
            verbose: true,
            port: 30718,
            broadcast_addr: "192.168.1.255".parse().unwrap(),
        }
    }

    #[test]
    fn test_discovery_options_from_globals() {
        let options = globals().discovery_options(4).unwrap();
        assert_eq!(options.port, 30718);
        assert_eq!(options.target, "192.168.1.255:30718".parse().unwrap());
        assert_eq!(options.window, Duration::from_secs(4));
        assert_eq!(options.recv_timeout(), Duration::from_secs(1));
        assert_eq!(options.pace, Duration::from_secs(1));
        assert!(options.verbose);
    }

    #[test]
    fn test_zero_duration_is_invalid() {
        let err = globals().discovery_options(0).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
