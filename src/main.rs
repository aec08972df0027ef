//! Crystal ID command-line front end.
//!
//! ```text
//! crystal-id fingerprint <address> [--json]
//! crystal-id visit <address>
//! crystal-id count
//! crystal-id migrate
//! ```
//!
//! Store location comes from `CRYSTAL_STORE_DIR` / `CRYSTAL_STORE_NAME`.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crystal_id::{
    anonymize, CrystalConfig, VERSION,
    visitors::{migrate_store, record_visit, VisitorStore},
};

const USAGE: &str = "usage: crystal-id <fingerprint <address> [--json] | visit <address> | count | migrate>";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = CrystalConfig::from_env();

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["fingerprint", address] => fingerprint(address, false),
        ["fingerprint", address, "--json"] => fingerprint(address, true),
        ["visit", address] => visit(&config, address),
        ["count"] => count(&config),
        ["migrate"] => migrate(&config),
        ["--version"] => {
            println!("crystal-id {VERSION}");
            Ok(())
        }
        _ => bail!(USAGE),
    }
}

/// Print the id and crystal for an address without touching the store.
fn fingerprint(address: &str, json: bool) -> Result<()> {
    let visitor = anonymize(address);

    if json {
        let mut value = serde_json::to_value(&visitor).context("serializing fingerprint")?;
        value["crystal"] = serde_json::Value::String(visitor.crystal());
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", visitor.anonymized_id);
        println!("{}", visitor.crystal());
    }
    Ok(())
}

/// Record a visit in the configured store.
fn visit(config: &CrystalConfig, address: &str) -> Result<()> {
    let mut store = config.open_store();
    let outcome = record_visit(&mut store, address)
        .with_context(|| format!("recording visit in {}", store.path().display()))?;

    println!("{}", outcome.visitor.anonymized_id);
    println!("{}", if outcome.is_new { "new visitor" } else { "returning visitor" });
    println!("visitors: {}", outcome.count);
    println!("{}", outcome.visitor.crystal());
    Ok(())
}

/// Print the stored visitor count.
fn count(config: &CrystalConfig) -> Result<()> {
    let store = config.open_store();
    let log = store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))?;
    println!("{}", log.count);
    Ok(())
}

/// Replace raw addresses in the configured store with pipeline output.
fn migrate(config: &CrystalConfig) -> Result<()> {
    let mut store = config.open_store();
    info!("Crystal ID v{} migrating store '{}'", VERSION, store.name());

    let report = migrate_store(&mut store)
        .with_context(|| format!("migrating {}", store.path().display()))?;

    if report.changed() {
        info!(
            anonymized = report.anonymized,
            kept = report.kept,
            duplicates = report.duplicates,
            "Store rewritten"
        );
    } else {
        info!("Store already migrated");
    }
    Ok(())
}
