use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{clip, truncate};
use crate::app::{App, Mode};
use crate::layout::Geometry;
use crate::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, geometry: &Geometry, app: &App, theme: &Theme) {
    let status = clip(geometry.status_rect(), area);
    if status.height == 0 {
        return;
    }

    let buttons_left = if app.config.is_metrics() {
        geometry.refresh_button_rect().x
    } else {
        geometry.help_button_rect().x
    };
    let message_cols = buttons_left.saturating_sub(status.x);
    let message_width = usize::from(message_cols);

    let (badge, badge_bg) = match app.mode {
        Mode::Normal => (" NORMAL ", theme.accent),
        Mode::Searching => (" SEARCH ", theme.warning),
        Mode::HelpOverlay => (" HELP ", theme.success),
    };
    let mut spans = vec![
        Span::styled(
            badge,
            Style::default()
                .fg(theme.highlight_fg)
                .bg(badge_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    let room = message_width.saturating_sub(badge.len() + 2);
    match app.notifications.latest() {
        Some(notice) => spans.push(Span::styled(
            truncate(
                &format!("{} {}", notice.severity.icon(), notice.message),
                room,
            ),
            Style::default().fg(theme.severity_color(notice.severity)),
        )),
        None => spans.push(Span::styled(
            truncate("Enter copy  / search  ? help", room),
            theme.muted_style(),
        )),
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)),
        clip(Rect::new(status.x, status.y, message_cols, 1), area),
    );

    let button = Style::default()
        .fg(theme.highlight_fg)
        .bg(theme.accent)
        .add_modifier(Modifier::BOLD);
    draw_button(frame, area, geometry.help_button_rect(), " ? Help ", button);
    if app.config.is_metrics() {
        let style = if app.fetch_in_flight {
            theme.muted_style()
        } else {
            button
        };
        draw_button(frame, area, geometry.refresh_button_rect(), " \u{27f3} Refresh", style);
        draw_button(frame, area, geometry.export_button_rect(), " \u{21ea} Export ", button);
    }

    let hints = if app.config.is_metrics() {
        " \u{2191}\u{2193} navigate  Tab group  / search  Enter copy  r refresh  e export  q quit"
    } else {
        " \u{2191}\u{2193} navigate  Tab group  / search  Enter copy  double-click copy  q quit"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            truncate(hints, usize::from(status.width)),
            theme.muted_style(),
        ))),
        clip(
            Rect::new(status.x, status.y.saturating_add(1), status.width, 1),
            area,
        ),
    );
}

fn draw_button(frame: &mut Frame, area: Rect, rect: Rect, label: &'static str, style: Style) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(label, style))),
        clip(rect, area),
    );
}
