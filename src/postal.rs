// 📮 Postal Code Merger
//
// Second phase: walks every sheet of the postal-code directory, resolves each
// row to a settlement that the registry already created, and appends the
// postal code to it. Never creates settlements.
//
// Sheet dispatch is by name, each sheet with its own row shape (1-based columns):
//
//   "Települések"   column 1 = code, column 2 = settlement name
//   "Bp.u."         column 1 = code, column 2 = street, column 9 = district ("XII.")
//   "<City> u."     column 1 = code, settlement = sheet name minus " u."
//   anything else   ignored

use crate::entities::{SettlementCatalog, CAPITAL_PREFIX};
use crate::error::{Result, RowLocation};
use crate::roman::decode_roman;
use crate::workbook::{Row, Workbook};
use serde::{Deserialize, Serialize};

pub const SETTLEMENTS_SHEET: &str = "Települések";
pub const DISTRICT_SHEET: &str = "Bp.u.";
pub const CITY_STREET_SHEETS: [&str; 5] =
    ["Miskolc u.", "Debrecen u.", "Szeged u.", "Pécs u.", "Győr u."];

/// Island under direct capital administration, not part of any district
pub const MARGITSZIGET: &str = "Margitsziget";

const CITY_STREET_SUFFIX: &str = " u.";

const CODE_COLUMN: usize = 0;
const NAME_COLUMN: usize = 1;
const DISTRICT_COLUMN: usize = 8;

// ============================================================================
// LAYOUT
// ============================================================================

/// Header row counts per sheet kind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostalLayout {
    pub settlements_header_rows: usize,
    pub district_header_rows: usize,
    pub city_street_header_rows: usize,
}

impl Default for PostalLayout {
    fn default() -> Self {
        PostalLayout {
            settlements_header_rows: 2,
            district_header_rows: 1,
            city_street_header_rows: 1,
        }
    }
}

// ============================================================================
// SHEET KINDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostalSheet {
    /// One row per settlement: code + name
    Settlements,

    /// Capital streets keyed by roman-numeral district
    CapitalDistricts,

    /// Streets of one large city; only the city matters here
    CityStreets { city: String },
}

impl PostalSheet {
    /// Identify a sheet by name. `None` means the sheet is not used.
    pub fn classify(sheet_name: &str) -> Option<PostalSheet> {
        match sheet_name {
            SETTLEMENTS_SHEET => Some(PostalSheet::Settlements),
            DISTRICT_SHEET => Some(PostalSheet::CapitalDistricts),
            name if CITY_STREET_SHEETS.contains(&name) => {
                let city = name.strip_suffix(CITY_STREET_SUFFIX).unwrap_or(name);
                Some(PostalSheet::CityStreets {
                    city: city.to_string(),
                })
            }
            _ => None,
        }
    }

    /// Processing position of a sheet name: settlements sheet, capital
    /// districts, then city streets in their listed order. Unknown sheets last.
    pub fn merge_rank(sheet_name: &str) -> usize {
        match sheet_name {
            SETTLEMENTS_SHEET => 0,
            DISTRICT_SHEET => 1,
            name => CITY_STREET_SHEETS
                .iter()
                .position(|s| *s == name)
                .map(|i| i + 2)
                .unwrap_or(usize::MAX),
        }
    }

    pub fn header_rows(&self, layout: &PostalLayout) -> usize {
        match self {
            PostalSheet::Settlements => layout.settlements_header_rows,
            PostalSheet::CapitalDistricts => layout.district_header_rows,
            PostalSheet::CityStreets { .. } => layout.city_street_header_rows,
        }
    }

    /// Postal code and target settlement name for one data row.
    /// Blank rows resolve to `None`.
    pub fn resolve(&self, row: &Row) -> Option<(String, String)> {
        if row.is_blank() {
            return None;
        }

        // codes are validated as-is, surrounding spaces included
        let code = row.raw_cell(CODE_COLUMN).to_string();
        let target = match self {
            PostalSheet::Settlements => row.cell(NAME_COLUMN).to_string(),
            PostalSheet::CapitalDistricts => {
                capital_district_settlement(row.cell(DISTRICT_COLUMN), row.cell(NAME_COLUMN))
            }
            PostalSheet::CityStreets { city } => city.clone(),
        };

        Some((code, target))
    }
}

/// Settlement name for a row of the capital-district sheet.
///
/// "Margitsziget" in either the district or the street cell maps to the
/// capital itself; otherwise "XII." becomes "Budapest 12. ker.".
pub fn capital_district_settlement(district_code: &str, street: &str) -> String {
    let district = district_code.trim();
    let district = district.strip_suffix('.').unwrap_or(district);

    if district == MARGITSZIGET || street.trim() == MARGITSZIGET {
        return CAPITAL_PREFIX.to_string();
    }

    format!("{} {:02}. ker.", CAPITAL_PREFIX, decode_roman(district))
}

// ============================================================================
// MERGE REPORT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub sheet: String,
    /// Data rows resolved to a settlement
    pub rows: usize,
    /// Codes newly attached
    pub attached: usize,
    /// Codes already present on the settlement
    pub duplicates: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub sheets: Vec<SheetSummary>,
    pub ignored_sheets: Vec<String>,
}

impl MergeReport {
    pub fn total_attached(&self) -> usize {
        self.sheets.iter().map(|s| s.attached).sum()
    }

    pub fn total_duplicates(&self) -> usize {
        self.sheets.iter().map(|s| s.duplicates).sum()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} sheet(s) merged, {} code(s) attached, {} duplicate(s), {} sheet(s) ignored",
            self.sheets.len(),
            self.total_attached(),
            self.total_duplicates(),
            self.ignored_sheets.len()
        )
    }
}

// ============================================================================
// MERGER
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct PostalCodeMerger {
    layout: PostalLayout,
}

impl PostalCodeMerger {
    pub fn new(layout: PostalLayout) -> Self {
        PostalCodeMerger { layout }
    }

    /// Attach every postal code in `workbook` to the catalog built by the
    /// registry loader. Any unknown settlement or malformed code aborts the
    /// whole merge.
    pub fn merge(
        &self,
        mut catalog: SettlementCatalog,
        workbook: &dyn Workbook,
    ) -> Result<(SettlementCatalog, MergeReport)> {
        let mut report = MergeReport::default();

        // Codes keep first-appearance order, so the sheet order is fixed
        // regardless of how the source lists its sheets.
        let mut sheet_names = workbook.sheet_names();
        sheet_names.sort_by_key(|name| PostalSheet::merge_rank(name));

        for sheet_name in sheet_names {
            let Some(kind) = PostalSheet::classify(&sheet_name) else {
                log::debug!("Ignoring sheet '{}'", sheet_name);
                report.ignored_sheets.push(sheet_name);
                continue;
            };

            let summary = self.merge_sheet(&mut catalog, workbook, &sheet_name, &kind)?;
            log::info!(
                "Sheet '{}': {} rows, {} codes attached, {} duplicates",
                summary.sheet,
                summary.rows,
                summary.attached,
                summary.duplicates
            );
            report.sheets.push(summary);
        }

        Ok((catalog, report))
    }

    fn merge_sheet(
        &self,
        catalog: &mut SettlementCatalog,
        workbook: &dyn Workbook,
        sheet_name: &str,
        kind: &PostalSheet,
    ) -> Result<SheetSummary> {
        let rows = workbook.rows(sheet_name)?;
        let mut summary = SheetSummary {
            sheet: sheet_name.to_string(),
            ..SheetSummary::default()
        };

        for (row_num, row) in rows.iter().enumerate().skip(kind.header_rows(&self.layout)) {
            let Some((code, target)) = kind.resolve(row) else {
                continue;
            };

            let location = RowLocation {
                sheet: sheet_name.to_string(),
                row: row_num,
            };

            summary.rows += 1;
            if catalog.attach_postal_code(&target, &code, Some(location))? {
                summary.attached += 1;
            } else {
                summary.duplicates += 1;
            }
        }

        Ok(summary)
    }
}

// ============================================================================
// TESTS
// ============================================================================
