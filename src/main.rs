use anyhow::{Context, Result};
use std::env;
use std::path::Path;

use settlement_catalog::{build_catalog, CatalogConfig, CsvWorkbook};

const USAGE: &str = "usage: settlement-catalog <registry-dir> <postal-dir> [config.toml]";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 || args.len() > 4 {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    run(
        Path::new(&args[1]),
        Path::new(&args[2]),
        args.get(3).map(Path::new),
    )
}

fn run(registry_dir: &Path, postal_dir: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => CatalogConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => CatalogConfig::default(),
    };

    let registry = CsvWorkbook::open(registry_dir)
        .with_context(|| format!("Failed to open registry: {}", registry_dir.display()))?;
    let postal = CsvWorkbook::open(postal_dir)
        .with_context(|| format!("Failed to open postal directory: {}", postal_dir.display()))?;

    log::info!(
        "Building catalog from {} and {}",
        registry.dir().display(),
        postal.dir().display()
    );

    let (catalog, report) =
        build_catalog(&config, &registry, &postal).context("Failed to build settlement catalog")?;

    log::info!("{}", report.summary());
    if !report.ignored_sheets.is_empty() {
        log::info!("Ignored sheets: {}", report.ignored_sheets.join(", "));
    }

    println!("{}", serde_json::to_string_pretty(&catalog)?);

    Ok(())
}
