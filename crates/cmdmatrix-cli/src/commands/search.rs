use anyhow::Result;
use cmdmatrix::Catalogue;
use cmdmatrix_tui::filter::filter;

use super::format::{self, Section};
use super::list;

/// Matches per group, skipping groups without any.
pub fn matches<'a>(
    catalogue: &'a Catalogue,
    query: &str,
    group_filter: Option<&str>,
) -> Result<Vec<Section<'a>>> {
    Ok(list::sections(catalogue, group_filter)?
        .into_iter()
        .map(|section| Section {
            group: section.group,
            records: filter(&section.group.records, query),
        })
        .filter(|section| !section.records.is_empty())
        .collect())
}

pub fn run(catalogue: &Catalogue, query: &str, group_filter: Option<&str>, json: bool) -> Result<()> {
    let sections = matches(catalogue, query, group_filter)?;
    tracing::debug!(query, groups = sections.len(), "search finished");

    if json {
        println!("{}", format::json(&sections)?);
    } else if sections.is_empty() {
        println!("No results found for \"{query}\".");
    } else {
        print!("{}", format::table(&sections));
    }
    Ok(())
}
