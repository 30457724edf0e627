//! XLSX Export Options

use serde::{Deserialize, Serialize};

/// Options for XLSX export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XlsxExportOptions {
    /// Printer named in each sheet's printer settings
    #[serde(default = "default_device_name")]
    pub device_name: String,
    /// Repeat the title and header rows on every printed page
    #[serde(default = "default_print_titles")]
    pub print_titles: bool,
}

fn default_device_name() -> String {
    "Microsoft Print to PDF".to_string()
}

fn default_print_titles() -> bool {
    true
}

impl Default for XlsxExportOptions {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
            print_titles: default_print_titles(),
        }
    }
}

impl XlsxExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = name.into();
        self
    }

    pub fn with_print_titles(mut self, print_titles: bool) -> Self {
        self.print_titles = print_titles;
        self
    }
}
