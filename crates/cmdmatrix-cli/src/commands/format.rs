use cmdmatrix::{Group, Record};
use serde::Serialize;

const MAX_ID_WIDTH: usize = 24;
const LINE_BUDGET: usize = 90;

/// Records of one group selected for printing.
pub struct Section<'a> {
    pub group: &'a Group,
    pub records: Vec<&'a Record>,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    group: &'a str,
    name: &'a str,
    records: &'a [&'a Record],
}

/// Grouped plain-text table with a trailing total.
pub fn table(sections: &[Section<'_>]) -> String {
    let mut out = String::new();
    let mut total = 0usize;

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }

        let id_width = section
            .records
            .iter()
            .map(|r| r.id.chars().count())
            .max()
            .unwrap_or(0)
            .min(MAX_ID_WIDTH);
        let desc_budget = LINE_BUDGET.saturating_sub(2 + id_width + 2);

        out.push_str(&format!(
            "{} [{}] ({})\n",
            section.group.name,
            section.group.id,
            section.records.len()
        ));
        for record in &section.records {
            let id = truncate(&record.id, id_width);
            let marker = if record.dangerous { " !" } else { "" };
            let desc = truncate(&record.description, desc_budget);
            out.push_str(&format!("  {id:<id_width$}  {desc}{marker}\n"));
        }

        total += section.records.len();
    }

    out.push_str(&format!("\n{total} commands\n"));
    out
}

/// Sections as pretty JSON.
pub fn json(sections: &[Section<'_>]) -> serde_json::Result<String> {
    let sections: Vec<JsonSection> = sections
        .iter()
        .map(|s| JsonSection {
            group: &s.group.id,
            name: &s.group.name,
            records: &s.records,
        })
        .collect();
    serde_json::to_string_pretty(&sections)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_owned()
    } else if max <= 3 {
        s.chars().take(max).collect()
    } else {
        let mut out: String = s.chars().take(max - 3).collect();
        out.push_str("...");
        out
    }
}
