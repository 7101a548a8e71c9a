//! Line model of the detail panel.
//!
//! The renderer draws the panel from [`detail_lines`] and the hit registry
//! places the copy button after the same lines, so both agree on where the
//! button is.

use cmdmatrix::Record;

/// Section headings of the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Primary,
    Description,
    Hotkey,
    Tags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLine<'a> {
    Blank,
    Heading(Heading),
    Primary(&'a str),
    Description(String),
    Hotkey(&'a str),
    Tags(&'a [String]),
}

/// Lines above the copy button for `record` in a panel `detail_width` wide.
pub fn detail_lines(record: &Record, detail_width: u16) -> Vec<DetailLine<'_>> {
    let mut lines = vec![
        DetailLine::Blank,
        DetailLine::Heading(Heading::Primary),
        DetailLine::Primary(&record.id),
        DetailLine::Blank,
        DetailLine::Heading(Heading::Description),
    ];

    let max = usize::from(detail_width.saturating_sub(6)).max(1);
    lines.extend(
        wrap_description(&record.description, max)
            .into_iter()
            .map(DetailLine::Description),
    );
    lines.push(DetailLine::Blank);

    if let Some(hotkey) = &record.hotkey {
        lines.push(DetailLine::Heading(Heading::Hotkey));
        lines.push(DetailLine::Hotkey(hotkey));
        lines.push(DetailLine::Blank);
    }

    if !record.tags.is_empty() {
        lines.push(DetailLine::Heading(Heading::Tags));
        lines.push(DetailLine::Tags(&record.tags));
        lines.push(DetailLine::Blank);
    }

    lines.push(DetailLine::Blank);
    lines
}

/// Number of lines above the copy button.
pub fn copy_button_offset(record: &Record, detail_width: u16) -> usize {
    detail_lines(record, detail_width).len()
}

/// Split a description into at most two lines of `max` characters. The
/// second line is truncated with an ellipsis when it still overflows.
fn wrap_description(text: &str, max: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max {
        return vec![text.to_owned()];
    }

    let split = chars[..max]
        .iter()
        .rposition(|c| c.is_whitespace())
        .filter(|&at| at > 0)
        .unwrap_or(max);

    let first: String = chars[..split].iter().collect();
    let rest: Vec<char> = chars[split..]
        .iter()
        .copied()
        .skip_while(|c| c.is_whitespace())
        .collect();

    let second = if rest.len() > max {
        let mut cut: String = rest[..max.saturating_sub(1)].iter().collect();
        cut.push('…');
        cut
    } else {
        rest.into_iter().collect()
    };

    vec![first.trim_end().to_owned(), second]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_record_budget_is_eight_lines() {
        let record = Record::new("ls", "List files");
        assert_eq!(copy_button_offset(&record, 60), 5 + 1 + 1 + 1);
    }

    #[test]
    fn hotkey_and_tags_add_three_lines_each() {
        let record = Record::new("ls", "List files")
            .with_hotkey("Ctrl+L")
            .with_tags(["files"]);
        assert_eq!(copy_button_offset(&record, 60), 8 + 3 + 3);
    }

    #[test]
    fn long_description_takes_two_lines() {
        let record = Record::new("x", "one two three four five six");
        let lines = detail_lines(&record, 16);
        let descriptions: Vec<_> = lines
            .iter()
            .filter_map(|l| match l {
                DetailLine::Description(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(descriptions, vec!["one two", "three fou…"]);
    }

    #[test]
    fn overflowing_second_line_is_truncated() {
        let record = Record::new("x", "a".repeat(40));
        let lines = detail_lines(&record, 16);
        assert_eq!(lines[5], DetailLine::Description("a".repeat(10)));
        assert_eq!(lines[6], DetailLine::Description(format!("{}…", "a".repeat(9))));
    }

    #[test]
    fn description_at_limit_stays_on_one_line() {
        let record = Record::new("x", "a".repeat(10));
        assert_eq!(copy_button_offset(&record, 16), 8);
    }

    #[test]
    fn zero_width_does_not_panic() {
        let record = Record::new("x", "some words here");
        assert_eq!(copy_button_offset(&record, 0), 9);
    }
}
