use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{clip, truncate};
use crate::app::App;
use crate::layout::Geometry;
use crate::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, geometry: &Geometry, app: &App, theme: &Theme) {
    let strip = geometry.tabs_rect();
    let caption = clip(
        Rect::new(geometry.padding, strip.y, strip.width.saturating_sub(geometry.padding), 1),
        area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " Groups  1-9 jump  Tab cycle",
            theme.muted_style(),
        ))),
        caption,
    );

    for (index, group) in app.catalogue.groups.iter().enumerate() {
        let rect = clip(geometry.tab_rect(index), area);
        if rect.width == 0 || rect.height == 0 {
            continue;
        }

        let color = theme.group_color(group);
        let style = if index == app.active_group {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };

        let label = format!(" {} {}", index + 1, group.name);
        let label = truncate(&label, usize::from(rect.width.saturating_sub(1)));
        frame.render_widget(Paragraph::new(Line::from(Span::styled(label, style))), rect);
    }
}
