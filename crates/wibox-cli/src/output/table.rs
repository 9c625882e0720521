//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, ContentArrangement, Table};
use wibox_core::{DiscoveredDevice, MenuEntry};

use super::OutputFormatter;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_devices(&self, devices: &[DiscoveredDevice]) -> String {
        if devices.is_empty() {
            return "No devices found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["#", "Address", "Metadata"]);

        for (i, device) in devices.iter().enumerate() {
            let metadata = if device.metadata.is_empty() {
                "-".to_string()
            } else {
                device.metadata.to_hex()
            };

            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(device.address),
                Cell::new(metadata),
            ]);
        }

        format!("{}\n\nFound {} device(s)", table, devices.len())
    }

    fn format_selection(&self, selection: Option<&MenuEntry>) -> String {
        match selection {
            Some(entry) => format!("You chose {}", entry.address().bold()),
            None => "No interface selected.".to_string(),
        }
    }
}
