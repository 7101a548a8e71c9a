use std::collections::HashSet;

use cmdmatrix::Record;

/// Trimmed, lowercased form of a query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Records matching `query`, in input order.
///
/// A record matches when its id, its description or any of its tags contains
/// the normalized query as a substring. An empty query returns every record.
pub fn filter<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    filter_indices(records, query)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Same as [`filter`], but yields positions into `records`.
pub fn filter_indices(records: &[Record], query: &str) -> Vec<usize> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return (0..records.len()).collect();
    }

    let mut seen = HashSet::new();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, &needle) && seen.insert(record.id.as_str()))
        .map(|(i, _)| i)
        .collect()
}

fn matches(record: &Record, needle: &str) -> bool {
    record.id.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
        || record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
