//! Numbered interface menu.
//!
//! `localhost` is always the first entry and the menu never holds more than
//! nine entries, so every choice is a single digit.

use std::fmt;

use crate::types::DiscoveredDevice;

/// Name shown for the local machine
pub const LOCALHOST: &str = "localhost";

/// Most entries a menu can hold, localhost included
pub const MAX_MENU_ENTRIES: usize = 9;

/// A selectable interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Localhost,
    Device(DiscoveredDevice),
}

impl MenuEntry {
    /// Host name or address to connect to.
    pub fn address(&self) -> String {
        match self {
            MenuEntry::Localhost => LOCALHOST.to_string(),
            MenuEntry::Device(device) => device.address.to_string(),
        }
    }
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}

/// Menu built from one discovery scan.
#[derive(Debug, Clone)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    /// Build the menu, or `None` when no device was found.
    pub fn from_devices(devices: &[DiscoveredDevice]) -> Option<Self> {
        if devices.is_empty() {
            return None;
        }

        let entries = std::iter::once(MenuEntry::Localhost)
            .chain(devices.iter().cloned().map(MenuEntry::Device))
            .take(MAX_MENU_ENTRIES)
            .collect();

        Some(Self { entries })
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(number, entry)` pairs, numbered from 1.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &MenuEntry)> {
        self.entries.iter().enumerate().map(|(i, e)| (i + 1, e))
    }

    /// Resolve a keypress. Anything but a listed digit selects nothing.
    pub fn select(&self, key: char) -> Option<&MenuEntry> {
        let number = key.to_digit(10)? as usize;
        if number == 0 {
            return None;
        }
        self.entries.get(number - 1)
    }
}
