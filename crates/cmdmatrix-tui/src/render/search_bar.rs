use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::clip;
use crate::app::{App, Mode};
use crate::layout::Geometry;
use crate::theme::Theme;

/// Frames per cursor blink phase.
const BLINK_FRAMES: u64 = 5;

pub fn render(frame: &mut Frame, area: Rect, geometry: &Geometry, app: &App, theme: &Theme) {
    let searching = app.mode == Mode::Searching;
    let border = if searching {
        Style::default().fg(theme.accent)
    } else {
        theme.muted_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(Span::styled(" Search ", border));

    let outer = clip(geometry.search_rect(), area);
    let inner = block.inner(outer);
    frame.render_widget(block, outer);

    let mut spans = vec![Span::styled(
        " / ",
        Style::default()
            .fg(theme.highlight_fg)
            .bg(if searching { theme.accent } else { theme.muted })
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::raw(" "));

    if app.query.is_empty() && !searching {
        spans.push(Span::styled("Press / to search", theme.muted_style()));
    } else {
        spans.push(Span::styled(app.query.as_str(), theme.text_style()));
        let blink_on = (app.clock.frame() / BLINK_FRAMES) % 2 == 0;
        if searching && blink_on {
            spans.push(Span::styled("\u{2588}", Style::default().fg(theme.accent)));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    let total = app.active_records().len();
    let hint = if app.query.is_empty() {
        format!(" {total} entries")
    } else {
        format!(" {} of {total} match \"{}\"", app.filtered.len(), app.query)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hint, theme.muted_style()))),
        clip(geometry.search_hint_rect(), area),
    );
}
