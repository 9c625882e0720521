//! Interactive selector: scan, show a numbered menu, read one keypress.

use std::io::{self, Write};

use colored::*;
use tracing::debug;
use wibox_core::{DiscoveredDevice, DiscoveryService, Menu, MenuEntry};

use super::GlobalArgs;
use crate::cli::ChooseArgs;
use crate::error::CliError;
use crate::output::get_formatter;
use crate::terminal::{KeySource, TerminalKeys};

/// Run the choose command
pub async fn run_choose(args: ChooseArgs, globals: &GlobalArgs) -> Result<(), CliError> {
    let options = globals.discovery_options(args.duration)?;
    let prefix = log_prefix(args.log_prefix.as_deref());

    // Keep stdout clean for the JSON result
    let mut out: Box<dyn Write> = if globals.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };

    writeln!(out, "{}Searching network for WiBox interfaces...", prefix)?;

    // A failed scan and an empty scan look the same to the operator.
    let devices = match DiscoveryService::new(options).discover().await {
        Ok(devices) => devices,
        Err(e) => {
            debug!("Discovery failed: {}", e);
            Vec::new()
        }
    };

    let selection = choose(&devices, &prefix, &mut TerminalKeys, &mut out)?;

    println!(
        "{}",
        get_formatter(globals.json).format_selection(selection.as_ref())
    );

    Ok(())
}

/// Show the menu for `devices` and resolve one keypress into an entry.
pub fn choose<K, W>(
    devices: &[DiscoveredDevice],
    prefix: &str,
    keys: &mut K,
    out: &mut W,
) -> io::Result<Option<MenuEntry>>
where
    K: KeySource + ?Sized,
    W: Write + ?Sized,
{
    let Some(menu) = Menu::from_devices(devices) else {
        writeln!(out, "{}No WiBoxes found.", prefix)?;
        return Ok(None);
    };

    for (number, entry) in menu.numbered() {
        writeln!(out, "\t{}: {}", number, entry)?;
    }
    write!(out, "{}", "Enter Number to Choose Interface: ".bold())?;
    out.flush()?;

    let key = keys.read_key()?;
    writeln!(out)?;

    Ok(key.and_then(|k| menu.select(k).cloned()))
}

fn log_prefix(prefix: Option<&str>) -> String {
    match prefix {
        Some(p) => format!("{}: ", p),
        None => String::new(),
    }
}
