//! Discover command implementation.

use wibox_core::DiscoveryService;

use super::GlobalArgs;
use crate::cli::DiscoverArgs;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the discover command
pub async fn run_discover(args: DiscoverArgs, globals: &GlobalArgs) -> Result<(), CliError> {
    let formatter = get_formatter(globals.json);
    let options = globals.discovery_options(args.duration)?;

    if !globals.json {
        println!("Discovering devices for {} seconds...", args.duration);
    }

    let devices = DiscoveryService::new(options).discover().await?;

    println!("{}", formatter.format_devices(&devices));

    if devices.is_empty() {
        return Err(CliError::NoDevicesFound);
    }

    Ok(())
}
