// ⚙️ Configuration
//
// Only the layout of the two source workbooks is configurable. Business rules
// (capital prefix, sheet names, column positions) are constants in their modules.
//
// Example config.toml:
//
//   [registry]
//   sheet = "Helységek"
//   header_rows = 1
//   total_sentinel = "Összesen"
//
//   [postal]
//   settlements_header_rows = 2

use crate::error::Result;
use crate::postal::PostalLayout;
use crate::registry::RegistryLayout;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub registry: RegistryLayout,
    pub postal: PostalLayout,
}

impl CatalogConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
