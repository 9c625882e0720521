//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::json;
use wibox_core::{DiscoveredDevice, MenuEntry};

use super::OutputFormatter;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_devices(&self, devices: &[DiscoveredDevice]) -> String {
        let output = json!({
            "devices": devices,
            "count": devices.len()
        });
        Self::to_json(&output)
    }

    fn format_selection(&self, selection: Option<&MenuEntry>) -> String {
        Self::to_json(&json!({
            "selection": selection.map(MenuEntry::address)
        }))
    }
}
