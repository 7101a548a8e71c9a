use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use super::centered_rect_fixed;
use crate::app::App;
use crate::theme::Theme;

const BINDINGS: &[(&str, &str)] = &[
    ("\u{2191}\u{2193} j k", "Move selection"),
    ("PgUp PgDn", "Move by page"),
    ("g G Home End", "First / last entry"),
    ("Tab \u{2190}\u{2192} h l", "Next / previous group"),
    ("1-9", "Jump to group"),
    ("/ Ctrl+F", "Search, Esc or Enter to leave"),
    ("Esc", "Clear the search query"),
    ("Enter Space", "Copy the selected entry"),
    ("t", "Cycle colour theme"),
    ("?", "Toggle this help"),
    ("q Ctrl+C", "Quit"),
];

const METRIC_BINDINGS: &[(&str, &str)] = &[("r", "Refresh now"), ("e", "Export a report")];

const MOUSE: &[(&str, &str)] = &[
    ("Click tab", "Switch group"),
    ("Click row", "Select, double-click to copy"),
    ("Click search", "Start searching"),
    ("Wheel", "Scroll the list"),
];

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let mut rows: Vec<(&str, &str)> = BINDINGS.to_vec();
    if app.config.is_metrics() {
        rows.extend_from_slice(METRIC_BINDINGS);
    }

    let key_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let section = theme.title_style();
    let entry = |(keys, what): (&'static str, &'static str)| {
        Line::from(vec![
            Span::styled(format!("  {keys:<16}"), key_style),
            Span::styled(what, theme.text_style()),
        ])
    };

    let mut lines = vec![Line::from(Span::styled("Keyboard", section))];
    lines.extend(rows.into_iter().map(entry));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Mouse", section)));
    lines.extend(MOUSE.iter().copied().map(entry));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        theme.muted_style(),
    )));

    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height);
    let width = 52u16.min(area.width);
    let popup_area = centered_rect_fixed(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .title(" Keyboard & Mouse ")
        .title_style(section);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    frame.render_widget(Paragraph::new(lines), inner);
}
