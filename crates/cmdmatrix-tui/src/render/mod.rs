mod detail_pane;
mod header;
mod help_overlay;
mod list_pane;
mod search_bar;
mod status_bar;
mod tabs;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, Mode, Viewport};
use crate::theme::Theme;

const SPINNER: [&str; 10] = [
    "\u{280b}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283c}", "\u{2834}", "\u{2826}", "\u{2827}",
    "\u{2807}", "\u{280f}",
];

pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let geometry = match app.viewport {
        Viewport::Ready(geometry) => geometry,
        Viewport::TooSmall { width, height } => {
            render_placeholder(frame, area, app, theme, (width, height));
            return;
        }
        Viewport::Unsized => return,
    };

    header::render(frame, clip(geometry.header_rect(), area), app, theme);
    tabs::render(frame, area, &geometry, app, theme);
    search_bar::render(frame, area, &geometry, app, theme);
    list_pane::render(frame, clip(geometry.list_rect(), area), &geometry, app, theme);
    if let Some(detail) = geometry.detail_rect() {
        detail_pane::render(frame, clip(detail, area), &geometry, app, theme);
    }
    status_bar::render(frame, area, &geometry, app, theme);

    if app.mode == Mode::HelpOverlay {
        help_overlay::render(frame, area, app, theme);
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, size: (u16, u16)) {
    let lines = vec![
        Line::from(Span::styled(
            format!(
                "Please resize window (min {}x{})",
                app.config.min_width, app.config.min_height
            ),
            theme.title_style(),
        )),
        Line::from(Span::styled(
            format!("current {}x{}", size.0, size.1),
            theme.muted_style(),
        )),
    ];
    let target = centered_rect_fixed(area.width, 2, area);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        target,
    );
}

/// Restrict `rect` to the drawable frame.
fn clip(rect: Rect, area: Rect) -> Rect {
    rect.intersection(area)
}

/// Helper to create a centered rectangle with fixed dimensions.
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);

    let [vertical_area] = vertical.areas(area);
    let [centered] = horizontal.areas(vertical_area);
    centered
}

fn spinner(frame: u64) -> &'static str {
    SPINNER[(frame % SPINNER.len() as u64) as usize]
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('\u{2026}');
    out
}
