use std::collections::HashSet;
use std::path::PathBuf;

use crate::record::{Catalogue, parse_hex_color};

const BUILTIN: &str = include_str!("../data/catalogue.toml");

/// Errors raised while loading or validating a catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("catalogue has no groups")]
    Empty,

    #[error("duplicate record id {record:?} in group {group:?}")]
    DuplicateRecord { group: String, record: String },

    #[error("group {group:?} has invalid accent {accent:?} (expected #RRGGBB)")]
    InvalidAccent { group: String, accent: String },
}

/// Parse and validate a catalogue from TOML text.
pub fn parse(text: &str) -> Result<Catalogue, CatalogueError> {
    let catalogue: Catalogue = toml::from_str(text)?;
    validate(&catalogue)?;
    Ok(catalogue)
}

/// The catalogue compiled into the binary.
pub fn builtin() -> Result<Catalogue, CatalogueError> {
    parse(BUILTIN)
}

fn validate(catalogue: &Catalogue) -> Result<(), CatalogueError> {
    if catalogue.groups.is_empty() {
        return Err(CatalogueError::Empty);
    }

    for group in &catalogue.groups {
        if parse_hex_color(&group.accent).is_none() {
            return Err(CatalogueError::InvalidAccent {
                group: group.id.clone(),
                accent: group.accent.clone(),
            });
        }

        let mut seen = HashSet::new();
        for record in &group.records {
            if !seen.insert(record.id.as_str()) {
                return Err(CatalogueError::DuplicateRecord {
                    group: group.id.clone(),
                    record: record.id.clone(),
                });
            }
        }
    }

    Ok(())
}
