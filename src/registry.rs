// 🗂️ Settlement Registry Loader
//
// Reads the national settlement registry sheet and creates one Settlement per
// row. This is the only place settlements are created; the postal merger
// runs afterwards and only appends codes.
//
// Row shape (1-based columns):
//   column 1 = settlement name
//   column 4 = region (county), empty for the capital and its districts

use crate::entities::{is_capital_name, Settlement, SettlementCatalog};
use crate::error::{CatalogError, Result};
use crate::workbook::Workbook;
use serde::Deserialize;

const NAME_COLUMN: usize = 0;
const REGION_COLUMN: usize = 3;

// ============================================================================
// LAYOUT
// ============================================================================

/// Where the data sits inside the registry workbook
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryLayout {
    /// Sheet holding one row per settlement
    pub sheet: String,

    /// Rows before the first settlement
    pub header_rows: usize,

    /// First-cell value of the trailing summary row; loading stops there
    pub total_sentinel: String,
}

impl Default for RegistryLayout {
    fn default() -> Self {
        RegistryLayout {
            sheet: "Helységek".to_string(),
            header_rows: 1,
            total_sentinel: "Összesen".to_string(),
        }
    }
}

// ============================================================================
// LOADER
// ============================================================================

pub struct RegistryLoader {
    layout: RegistryLayout,
}

impl RegistryLoader {
    pub fn new(layout: RegistryLayout) -> Self {
        RegistryLoader { layout }
    }

    pub fn layout(&self) -> &RegistryLayout {
        &self.layout
    }

    /// Build a fresh catalog from the registry sheet.
    ///
    /// Fails on a duplicate name, on a non-capital row without region, and on
    /// a non-blank row with an empty name.
    pub fn load(&self, workbook: &dyn Workbook) -> Result<SettlementCatalog> {
        let sheet = self.layout.sheet.as_str();
        let rows = workbook.rows(sheet)?;
        let mut catalog = SettlementCatalog::new();

        for (row_num, row) in rows.iter().enumerate().skip(self.layout.header_rows) {
            if row.cell(NAME_COLUMN) == self.layout.total_sentinel {
                log::debug!("Reached total row at {} in '{}'", row_num, sheet);
                break;
            }

            if row.is_blank() {
                continue;
            }

            let name = row.cell(NAME_COLUMN);
            if name.is_empty() {
                return Err(CatalogError::MissingName {
                    sheet: sheet.to_string(),
                    row: row_num,
                });
            }

            catalog.insert(settlement_from_row(name, row.cell(REGION_COLUMN))?)?;
        }

        let capital_count = catalog.iter().filter(|s| s.is_capital()).count();
        log::info!(
            "Loaded {} settlements from '{}' ({} capital entries)",
            catalog.len(),
            sheet,
            capital_count
        );

        Ok(catalog)
    }
}

impl Default for RegistryLoader {
    fn default() -> Self {
        Self::new(RegistryLayout::default())
    }
}

/// Capital names carry no region; everything else must have one.
fn settlement_from_row(name: &str, region: &str) -> Result<Settlement> {
    if is_capital_name(name) {
        return Ok(Settlement::new(name, None));
    }

    if region.is_empty() {
        return Err(CatalogError::MissingRegion {
            name: name.to_string(),
        });
    }

    Ok(Settlement::new(name, Some(region.to_string())))
}

// ============================================================================
// TESTS
// ============================================================================
