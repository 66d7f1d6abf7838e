//! The `certify list-courses` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use certify_core::config::load_config_from;
use certify_core::Portal;

pub fn execute(
    config_path: Option<PathBuf>,
    catalog: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if catalog.is_some() {
        config.catalog = catalog;
    }
    let portal = Portal::from_config(&config)?;
    let listings = portal.courses().list_courses();

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&listings)?);
        }
        "table" => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Code", "Name", "MCQs"]);
            for l in &listings {
                table.add_row(vec![
                    l.code.clone(),
                    l.name.clone(),
                    l.question_count.to_string(),
                ]);
            }
            println!("{table}");
        }
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }

    Ok(())
}
