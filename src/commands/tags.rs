//! `qdeck tags`: every tag in the catalog with its question count.

use anyhow::Result;
use crossterm::style::Stylize;

use crate::catalog::{Catalog, derive_tags};
use crate::commands::list::load_catalog;
use crate::workspace::Workspace;

pub fn run(ws: &Workspace) -> Result<()> {
    let catalog = load_catalog(ws)?;
    let counts = tag_counts(&catalog);
    if counts.is_empty() {
        println!("  No tags.");
        return Ok(());
    }
    let width = counts.iter().map(|(t, _)| t.chars().count()).max().unwrap_or(0);
    for (tag, count) in &counts {
        println!("  {:<width$}  {}", tag, count.to_string().cyan());
    }
    println!("\n  {} tags", counts.len().to_string().bold());
    Ok(())
}

/// Sorted tags with the number of questions carrying each one.
fn tag_counts(catalog: &Catalog) -> Vec<(String, usize)> {
    derive_tags(catalog)
        .iter()
        .map(|tag| {
            let n = catalog.items().iter().filter(|q| q.has_tag(tag)).count();
            (tag.to_string(), n)
        })
        .collect()
}
