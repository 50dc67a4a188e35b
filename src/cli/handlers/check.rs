use crate::import::ImportFile;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::utils::print_lead_list;

pub fn handle_check(file: String, json: bool) -> Result<()> {
    let path = Path::new(&file);
    let leads = ImportFile::read(path)
        .and_then(|f| f.parse())
        .with_context(|| format!("Import check failed for {}", file))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&leads)?);
    } else {
        println!(
            "{} {} leads ready to import from {}",
            "Valid:".green(),
            leads.len(),
            file
        );
        print_lead_list(&leads);
    }
    Ok(())
}
