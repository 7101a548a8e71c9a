use cmdmatrix::Record;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::app::App;
use crate::detail::{DetailLine, Heading, detail_lines};
use crate::layout::{COPY_BUTTON_WIDTH, Geometry};
use crate::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, geometry: &Geometry, app: &App, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.muted_style())
        .title(Span::styled(" Details ", theme.title_style()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // One column of indent; the copy button hitbox assumes it.
    let text_area = Rect {
        x: inner.x.saturating_add(1),
        width: inner.width.saturating_sub(1),
        ..inner
    };

    let Some(record) = app.selected_record() else {
        frame.render_widget(
            Paragraph::new("Nothing selected").style(theme.muted_style()),
            text_area,
        );
        return;
    };

    let accent = app
        .active_group()
        .map_or(theme.accent, |group| theme.group_color(group));
    let metrics = app.config.is_metrics();

    let mut lines: Vec<Line> = detail_lines(record, geometry.detail_width)
        .into_iter()
        .map(|line| match line {
            DetailLine::Blank => Line::default(),
            DetailLine::Heading(heading) => Line::from(Span::styled(
                heading_label(heading, metrics),
                theme.muted_style().add_modifier(Modifier::BOLD),
            )),
            DetailLine::Primary(text) => Line::from(Span::styled(
                text,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            DetailLine::Description(text) => Line::from(Span::styled(text, theme.text_style())),
            DetailLine::Hotkey(text) => {
                Line::from(Span::styled(text, Style::default().fg(theme.warning)))
            }
            DetailLine::Tags(tags) => Line::from(
                tags.iter()
                    .flat_map(|tag| {
                        [
                            Span::styled(format!("#{tag}"), Style::default().fg(accent)),
                            Span::raw(" "),
                        ]
                    })
                    .collect::<Vec<_>>(),
            ),
        })
        .collect();

    lines.push(copy_button(app, theme));
    lines.extend(extras(record, app, theme));

    frame.render_widget(Paragraph::new(lines), text_area);
}

fn heading_label(heading: Heading, metrics: bool) -> &'static str {
    match (heading, metrics) {
        (Heading::Primary, false) => "COMMAND",
        (Heading::Primary, true) => "METRIC",
        (Heading::Description, false) => "DESCRIPTION",
        (Heading::Description, true) => "VALUE",
        (Heading::Hotkey, _) => "HOTKEY",
        (Heading::Tags, _) => "TAGS",
    }
}

fn copy_button<'a>(app: &App, theme: &Theme) -> Line<'a> {
    let width = usize::from(COPY_BUTTON_WIDTH);
    if app.copy_confirm.is_active() {
        Line::from(Span::styled(
            format!("{:^width$}", "Copied!"),
            Style::default()
                .fg(theme.highlight_fg)
                .bg(theme.success)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            format!("{:^width$}", "[ Copy to clipboard ]"),
            theme.highlight_style(),
        ))
    }
}

fn extras<'a>(record: &'a Record, app: &App, theme: &Theme) -> Vec<Line<'a>> {
    let label = theme.muted_style();
    let mut lines = vec![Line::default()];

    let fields = [
        ("Example ", record.example.as_deref()),
        ("Usage   ", record.usage.as_deref()),
        ("Since   ", record.since.as_deref()),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            lines.push(Line::from(vec![
                Span::styled(name, label),
                Span::styled(value, theme.text_style()),
            ]));
        }
    }

    let uses = app.usage_count(&record.id);
    if uses > 0 {
        lines.push(Line::from(vec![
            Span::styled("Copied  ", label),
            Span::styled(format!("{uses}x this session"), theme.text_style()),
        ]));
    }

    if record.dangerous {
        lines.push(Line::from(Span::styled(
            "! Dangerous: changes privileges or destroys data",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )));
    }

    lines
}
