//! The `certify validate` command.

use std::path::PathBuf;

use anyhow::Result;

use certify_core::catalog::{parse_catalog, validate_catalog};

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let catalog = parse_catalog(&catalog_path)?;

    let questions: usize = catalog.courses.iter().map(|c| c.questions.len()).sum();
    println!(
        "Catalog: {} ({} courses, {} questions)",
        catalog_path.display(),
        catalog.courses.len(),
        questions
    );

    let warnings = validate_catalog(&catalog);
    for w in &warnings {
        let prefix = w
            .course_code
            .as_ref()
            .map(|code| format!("  [{code}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
