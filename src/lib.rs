// Settlement Catalog - Core Library
// Merges the settlement registry and the postal-code directory into one catalog

pub mod config;
pub mod entities;
pub mod error;
pub mod postal;
pub mod registry;
pub mod roman;
pub mod workbook;

// Re-export commonly used types
pub use config::CatalogConfig;
pub use entities::{Settlement, SettlementCatalog};
pub use error::{CatalogError, Result, RowLocation};
pub use postal::{
    capital_district_settlement, MergeReport, PostalCodeMerger, PostalLayout, PostalSheet,
    SheetSummary,
};
pub use registry::{RegistryLayout, RegistryLoader};
pub use roman::decode_roman;
pub use workbook::{CsvWorkbook, MemoryWorkbook, Row, Workbook};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run both phases in order: registry first, then postal codes.
///
/// Either the complete catalog comes back or the first error does; there is
/// no partially merged result.
pub fn build_catalog(
    config: &CatalogConfig,
    registry: &dyn Workbook,
    postal: &dyn Workbook,
) -> Result<(SettlementCatalog, MergeReport)> {
    let catalog = RegistryLoader::new(config.registry.clone()).load(registry)?;
    PostalCodeMerger::new(config.postal.clone()).merge(catalog, postal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().copied().collect()
    }

    fn registry_workbook() -> MemoryWorkbook {
        MemoryWorkbook::new().with_sheet(
            "Helységek",
            vec![
                row(&["Helység", "KSH kód", "Jogállás", "Vármegye"]),
                row(&["Budapest", "13578", "főváros", ""]),
                row(&["Budapest 01. ker.", "", "kerület", ""]),
                row(&["Budapest 12. ker.", "", "kerület", ""]),
                row(&["Szeged", "33367", "megyei jogú város", "Csongrád"]),
                row(&["Miskolc", "30456", "megyei jogú város", "Borsod-Abaúj-Zemplén"]),
                row(&["Összesen", "", "", ""]),
            ],
        )
    }

    #[test]
    fn test_end_to_end_szeged() {
        let registry = MemoryWorkbook::new().with_sheet(
            "Helységek",
            vec![
                row(&["Helység", "", "", "Vármegye"]),
                row(&["Szeged", "", "", "Csongrád"]),
            ],
        );
        let postal = MemoryWorkbook::new().with_sheet(
            "Szeged u.",
            vec![row(&["IRSZ", "Utca"]), row(&["6720", "Kárász utca"])],
        );

        let (catalog, _) = build_catalog(&CatalogConfig::default(), &registry, &postal).unwrap();

        let szeged = catalog.get("Szeged").unwrap();
        assert_eq!(szeged.region(), Some("Csongrád"));
        assert_eq!(szeged.postal_codes(), &["6720"]);
    }

    #[test]
    fn test_end_to_end_full_directory() {
        let postal = MemoryWorkbook::new()
            .with_sheet(
                "Települések",
                vec![
                    row(&["Magyarország irányítószámai"]),
                    row(&["IRSZ", "Település"]),
                    row(&["6700", "Szeged"]),
                    row(&["3500", "Miskolc"]),
                    row(&["1000", "Budapest"]),
                ],
            )
            .with_sheet(
                "Bp.u.",
                vec![
                    row(&["IRSZ", "Utca", "", "", "", "", "", "", "KER"]),
                    row(&["1011", "Apród utca", "", "", "", "", "", "", "I."]),
                    row(&["1122", "Alkotás utca", "", "", "", "", "", "", "XII."]),
                    row(&["1007", "Margitsziget", "", "", "", "", "", "", "XIII."]),
                ],
            )
            .with_sheet(
                "Miskolc u.",
                vec![
                    row(&["IRSZ", "Utca"]),
                    row(&["3525", "Széchenyi utca"]),
                    row(&["3525", "Városház tér"]),
                ],
            )
            .with_sheet("Megjegyzések", vec![row(&["free text"])]);

        let (catalog, report) =
            build_catalog(&CatalogConfig::default(), &registry_workbook(), &postal).unwrap();

        assert_eq!(catalog.len(), 5);
        assert_eq!(
            catalog.get("Budapest").unwrap().postal_codes(),
            &["1000", "1007"]
        );
        assert_eq!(
            catalog.get("Budapest 01. ker.").unwrap().postal_codes(),
            &["1011"]
        );
        assert_eq!(
            catalog.get("Budapest 12. ker.").unwrap().postal_codes(),
            &["1122"]
        );
        assert_eq!(
            catalog.get("Miskolc").unwrap().postal_codes(),
            &["3500", "3525"]
        );
        assert_eq!(catalog.get("Szeged").unwrap().postal_codes(), &["6700"]);

        for settlement in catalog.iter() {
            assert_eq!(settlement.region().is_none(), settlement.is_capital());
        }

        assert_eq!(report.total_attached(), 7);
        assert_eq!(report.total_duplicates(), 1);
        assert_eq!(report.ignored_sheets, vec!["Megjegyzések".to_string()]);
    }

    #[test]
    fn test_registry_failure_stops_before_merge() {
        let registry = MemoryWorkbook::new().with_sheet(
            "Helységek",
            vec![row(&["Helység"]), row(&["Abony", "", "", ""])],
        );
        let postal = MemoryWorkbook::new();

        let err = build_catalog(&CatalogConfig::default(), &registry, &postal).unwrap_err();

        assert!(matches!(err, CatalogError::MissingRegion { .. }));
    }

    #[test]
    fn test_postal_failure_discards_catalog() {
        let postal = MemoryWorkbook::new().with_sheet(
            "Debrecen u.",
            vec![row(&["IRSZ"]), row(&["4024"])],
        );

        let err = build_catalog(&CatalogConfig::default(), &registry_workbook(), &postal)
            .unwrap_err();

        assert!(
            matches!(err, CatalogError::UnknownSettlement { ref name, .. } if name == "Debrecen")
        );
    }

    #[test]
    fn test_end_to_end_csv_directories() {
        use std::fs;

        let registry_dir = tempfile::tempdir().unwrap();
        fs::write(
            registry_dir.path().join("Helységek.csv"),
            "Helység,KSH kód,Jogállás,Vármegye\n\
             Budapest,13578,főváros,\n\
             Szeged,33367,megyei jogú város,Csongrád\n\
             Összesen,,,\n",
        )
        .unwrap();

        let postal_dir = tempfile::tempdir().unwrap();
        fs::write(
            postal_dir.path().join("Települések.csv"),
            "Irányítószámok,\nIRSZ,Település\n6700,Szeged\n1000,Budapest\n",
        )
        .unwrap();
        fs::write(
            postal_dir.path().join("Szeged u..csv"),
            "IRSZ,Utca\n6720,Kárász utca\n6700,Dóm tér\n",
        )
        .unwrap();

        let registry = CsvWorkbook::open(registry_dir.path()).unwrap();
        let postal = CsvWorkbook::open(postal_dir.path()).unwrap();

        let (catalog, report) =
            build_catalog(&CatalogConfig::default(), &registry, &postal).unwrap();

        // "Szeged u." sorts before "Települések" on disk but merges after it
        assert_eq!(
            catalog.get("Szeged").unwrap().postal_codes(),
            &["6700", "6720"]
        );
        assert_eq!(catalog.get("Budapest").unwrap().postal_codes(), &["1000"]);
        assert_eq!(report.total_duplicates(), 1);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
