// 🏘️ Settlement Entity + Catalog
//
// The settlement name is both identity and lookup key. The registry guarantees
// names are unique, so a second insert with the same name means a corrupt source.
//
// Lifecycle:
// - registry loader creates every Settlement (empty postal codes)
// - postal merger only appends codes to settlements that already exist

use crate::error::{CatalogError, Result, RowLocation};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Name prefix shared by the capital and each of its numbered districts
pub const CAPITAL_PREFIX: &str = "Budapest";

/// Postal codes are fixed-width numeric strings
pub const POSTAL_CODE_LEN: usize = 4;

// ============================================================================
// POSTAL CODE VALIDATION
// ============================================================================

/// Check the fixed 4-digit format. No range or existence checks.
pub fn is_valid_postal_code(code: &str) -> bool {
    code.len() == POSTAL_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

/// True for "Budapest" itself and for "Budapest 01. ker." style district names
pub fn is_capital_name(name: &str) -> bool {
    name.starts_with(CAPITAL_PREFIX)
}

// ============================================================================
// SETTLEMENT
// ============================================================================

/// Read-only outside this module: name and region are fixed at creation,
/// codes only grow through `add_postal_code`.
///
/// ```compile_fail
/// use settlement_catalog::Settlement;
///
/// let mut pecs = Settlement::new("Pécs", Some("Baranya".to_string()));
/// pecs.name = "Szeged".to_string();
/// ```
///
/// ```compile_fail
/// use settlement_catalog::Settlement;
///
/// let mut pecs = Settlement::new("Pécs", Some("Baranya".to_string()));
/// pecs.region = None;
/// ```
///
/// Settlements are only built through `new`, never decoded from outside data:
///
/// ```compile_fail
/// use settlement_catalog::Settlement;
///
/// let json = r#"{"name":"Pécs","region":"Baranya","postal_codes":["12","12","abcde"]}"#;
/// let _: Settlement = serde_json::from_str(json).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    name: String,

    /// None only for the capital and its districts
    region: Option<String>,

    /// Order of first appearance, no duplicates
    postal_codes: Vec<String>,
}

impl Settlement {
    /// Create a settlement with no postal codes yet
    pub fn new(name: impl Into<String>, region: Option<String>) -> Self {
        Settlement {
            name: name.into(),
            region,
            postal_codes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn is_capital(&self) -> bool {
        is_capital_name(&self.name)
    }

    pub fn postal_codes(&self) -> &[String] {
        &self.postal_codes
    }

    /// Append a postal code if not already present.
    ///
    /// Returns `Ok(true)` when the code was added, `Ok(false)` when it was
    /// already attached. Fails on anything that is not exactly 4 digits.
    pub fn add_postal_code(&mut self, code: &str) -> Result<bool> {
        if !is_valid_postal_code(code) {
            return Err(CatalogError::InvalidPostalCode {
                code: code.to_string(),
                settlement: self.name.clone(),
            });
        }

        if self.postal_codes.iter().any(|c| c == code) {
            return Ok(false);
        }

        self.postal_codes.push(code.to_string());
        Ok(true)
    }
}

// ============================================================================
// SETTLEMENT CATALOG
// ============================================================================

/// All settlements of one run, keyed by name, in registry order.
///
/// Built once by the registry loader, handed by value to the postal merger,
/// then read-only for whoever consumes it.
///
/// ```compile_fail
/// use settlement_catalog::{Settlement, SettlementCatalog};
///
/// let mut catalog = SettlementCatalog::new();
/// catalog.insert(Settlement::new("Budapest", None)).unwrap();
/// let _ = catalog.get_mut("Budapest");
/// ```
#[derive(Debug, Default, Clone)]
pub struct SettlementCatalog {
    settlements: Vec<Settlement>,
    index: HashMap<String, usize>,
}

impl SettlementCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new settlement. A name that is already present is fatal.
    pub fn insert(&mut self, settlement: Settlement) -> Result<()> {
        if self.index.contains_key(&settlement.name) {
            return Err(CatalogError::DuplicateName {
                name: settlement.name,
            });
        }

        self.index
            .insert(settlement.name.clone(), self.settlements.len());
        self.settlements.push(settlement);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Settlement> {
        self.index.get(name).map(|&i| &self.settlements[i])
    }

    /// Mutable access stays private so a key can never be renamed
    fn get_mut(&mut self, name: &str) -> Option<&mut Settlement> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.settlements[i]),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.settlements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settlements.is_empty()
    }

    /// Settlements in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Settlement> {
        self.settlements.iter()
    }

    pub fn into_settlements(self) -> Vec<Settlement> {
        self.settlements
    }

    /// Attach a postal code to an existing settlement.
    ///
    /// `location` is where the code was read from, if it came from a sheet.
    pub fn attach_postal_code(
        &mut self,
        name: &str,
        code: &str,
        location: Option<RowLocation>,
    ) -> Result<bool> {
        let settlement = self
            .get_mut(name)
            .ok_or_else(|| CatalogError::UnknownSettlement {
                name: name.to_string(),
                location,
            })?;
        settlement.add_postal_code(code)
    }
}

impl Serialize for SettlementCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.settlements.iter())
    }
}

// ============================================================================
// TESTS
// ============================================================================
