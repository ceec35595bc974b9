//! Validate the embedded locale documents.
//!
//! Missing keys degrade silently in production (the page shows the raw key
//! or the French fallback), so this check runs in CI to catch them before
//! they ship. Exits non-zero when the catalog has errors.

use anyhow::Result;
use lumiere_news::i18n::{catalog, CatalogValidator};

fn main() -> Result<()> {
    let catalog = catalog();
    let report = CatalogValidator::validate(catalog);

    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    for error in &report.errors {
        println!("error: {error}");
    }

    println!(
        "Checked {} locale documents: {} errors, {} warnings",
        catalog.codes().len(),
        report.errors.len(),
        report.warnings.len()
    );

    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}
