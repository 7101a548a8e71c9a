use cmdmatrix::Record;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

use super::truncate;
use crate::app::App;
use crate::layout::Geometry;
use crate::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, geometry: &Geometry, app: &App, theme: &Theme) {
    let (title, color) = match app.active_group() {
        Some(group) => (format!(" {} ", group.name), theme.group_color(group)),
        None => (" Empty ".to_owned(), theme.accent),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let visible = geometry.visible_rows();
    let text_width = usize::from(inner.width.saturating_sub(1));
    let records = app.active_records();

    let mut lines: Vec<Line> = app
        .filtered
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible)
        .filter_map(|(pos, &index)| records.get(index).map(|r| (pos, r)))
        .map(|(pos, record)| render_row(record, pos == app.selected, text_width, app, theme))
        .collect();

    let footer = if app.filtered.is_empty() {
        Span::styled(" No matches", Style::default().fg(theme.warning))
    } else {
        Span::styled(
            format!(" {}/{}", app.selected + 1, app.filtered.len()),
            theme.muted_style(),
        )
    };
    let footer_row = usize::from(inner.height.saturating_sub(1));
    lines.resize(footer_row.max(lines.len()), Line::default());
    lines.truncate(footer_row);
    lines.push(Line::from(footer));

    frame.render_widget(Paragraph::new(lines), inner);

    if app.filtered.len() > visible {
        let mut scrollbar_state = ScrollbarState::new(app.filtered.len())
            .position(app.scroll_offset)
            .viewport_content_length(visible);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .track_symbol(Some("\u{2502}"))
            .thumb_symbol("\u{2588}");

        let track = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        frame.render_stateful_widget(scrollbar, track, &mut scrollbar_state);
    }
}

fn render_row<'a>(
    record: &'a Record,
    is_selected: bool,
    width: usize,
    app: &App,
    theme: &Theme,
) -> Line<'a> {
    let marker = if is_selected { "\u{25b8} " } else { "  " };
    let uses = app.usage_count(&record.id);
    let mut suffix = String::new();
    if record.dangerous {
        suffix.push_str(" !");
    }
    if uses > 0 {
        suffix.push_str(&format!(" x{uses}"));
    }

    let id_width = (width / 2).max(8);
    let id = truncate(&record.id, id_width.saturating_sub(1));
    let used = marker.chars().count() + id_width + suffix.chars().count();
    let description = truncate(&record.description, width.saturating_sub(used + 1));
    let body = format!("{marker}{id:<id_width$}{description}");

    if is_selected {
        let style = theme.highlight_style();
        let padded = format!(
            "{body:<fill$}",
            fill = width.saturating_sub(suffix.chars().count())
        );
        return Line::from(vec![Span::styled(padded, style), Span::styled(suffix, style)]);
    }

    let suffix_style = if record.dangerous {
        Style::default().fg(theme.error)
    } else {
        Style::default().fg(theme.success)
    };
    Line::from(vec![
        Span::styled(format!("{marker}{id:<id_width$}"), theme.text_style()),
        Span::styled(description, theme.muted_style()),
        Span::styled(suffix, suffix_style),
    ])
}
