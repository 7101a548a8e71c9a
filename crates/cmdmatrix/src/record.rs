use serde::{Deserialize, Serialize};

/// A single catalogued entry: a command, or a metric line in the system view.
///
/// Records are immutable once loaded and are owned by exactly one [`Group`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Record {
    /// Identifier, unique within its group. Doubles as the display text.
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Marks commands that change privileges or destroy data.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dangerous: bool,
}

impl Record {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            tags: Vec::new(),
            hotkey: None,
            example: None,
            usage: None,
            since: None,
            dangerous: false,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hotkey(mut self, hotkey: impl Into<String>) -> Self {
        self.hotkey = Some(hotkey.into());
        self
    }
}

/// A named bucket of records sharing a visual accent and a tab.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    /// Accent colour as `#RRGGBB`.
    pub accent: String,
    #[serde(default, rename = "record")]
    pub records: Vec<Record>,
}

impl Group {
    pub fn new(id: impl Into<String>, name: impl Into<String>, accent: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            accent: accent.into(),
            records: Vec::new(),
        }
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    /// Accent as an RGB triple, if it is a well-formed `#RRGGBB` string.
    pub fn accent_rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.accent)
    }
}

/// The ordered set of groups shown as tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Catalogue {
    #[serde(default, rename = "group")]
    pub groups: Vec<Group>,
}

impl Catalogue {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn total_records(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }

    pub fn group_by_id(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id.eq_ignore_ascii_case(id))
    }
}

/// Parse `#RRGGBB` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_color_accepts_hash_prefix() {
        assert_eq!(parse_hex_color("#22D3EE"), Some((0x22, 0xD3, 0xEE)));
        assert_eq!(parse_hex_color("10b981"), Some((0x10, 0xB9, 0x81)));
    }

    #[test]
    fn parse_hex_color_rejects_malformed() {
        assert_eq!(parse_hex_color("#123"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
        assert_eq!(parse_hex_color(""), None);
    }

    #[test]
    fn total_records_sums_groups() {
        let catalogue = Catalogue::new(vec![
            Group::new("a", "A", "#000000")
                .with_records(vec![Record::new("x", "x"), Record::new("y", "y")]),
            Group::new("b", "B", "#000000").with_records(vec![Record::new("z", "z")]),
        ]);
        assert_eq!(catalogue.total_records(), 3);
    }

    #[test]
    fn group_lookup_is_case_insensitive() {
        let catalogue = Catalogue::new(vec![Group::new("git", "Git", "#34D399")]);
        assert_eq!(catalogue.group_by_id("GIT").map(|g| g.name.as_str()), Some("Git"));
        assert!(catalogue.group_by_id("nope").is_none());
    }

    #[test]
    fn dangerous_flag_defaults_to_false() {
        let record: Record = toml::from_str("id = \"ls\"\ndescription = \"list\"").unwrap();
        assert!(!record.dangerous);
        assert!(record.tags.is_empty());
        assert!(record.hotkey.is_none());
    }
}
