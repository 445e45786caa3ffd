use crate::catalog::{self, CatalogEntry, RISK_CATALOG};
use anyhow::Result;
use colored::*;

pub fn handle_catalog(name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => {
            let entry = catalog::find(name)
                .ok_or_else(|| anyhow::anyhow!("No catalog entry named '{}'", name.trim()))?;
            print_entry(entry);
        }
        None => RISK_CATALOG.iter().for_each(print_entry),
    }
    Ok(())
}

fn print_entry(entry: &CatalogEntry) {
    println!("{}", entry.name.bold());
    println!("  Impact aspects:");
    for aspect in entry.impact_aspects {
        println!("    - {aspect}");
    }
    println!("  Likelihood aspects:");
    for aspect in entry.likelihood_aspects {
        println!("    - {aspect}");
    }
    println!();
}
