use cmdmatrix::format::or_na;
use cmdmatrix::{Snapshot, format_bytes, format_duration};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Sparkline};

use super::spinner;
use crate::app::App;
use crate::theme::Theme;

const SPARKLINE_WIDTH: u16 = 32;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .title(Span::styled(format!(" {} ", app.config.title), theme.title_style()));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    if app.config.is_metrics() {
        render_metrics(frame, inner, app, theme);
    } else {
        render_catalogue(frame, inner, app, theme);
    }
}

fn render_catalogue(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let copies: u32 = app.usage.values().sum();
    let label = theme.muted_style();
    let value = theme.text_style().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Commands ", label),
            Span::styled(app.catalogue.total_records().to_string(), value),
            Span::styled("   Groups ", label),
            Span::styled(app.catalogue.groups.len().to_string(), value),
            Span::styled("   Copied ", label),
            Span::styled(copies.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Session ", label),
            Span::styled(format_duration(app.started.elapsed()), value),
            Span::styled("   Time ", label),
            Span::styled(chrono::Local::now().format("%H:%M:%S").to_string(), value),
        ]),
        Line::default(),
    ];

    if let Some(group) = app.active_group() {
        lines.push(Line::from(vec![
            Span::styled(" Browsing ", label),
            Span::styled(
                group.name.clone(),
                Style::default()
                    .fg(theme.group_color(group))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ({} entries)", group.records.len()), label),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_metrics(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let [text_area, chart_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(SPARKLINE_WIDTH.min(area.width / 2)),
    ])
    .areas(area);

    let label = theme.muted_style();
    let mut lines = Vec::new();

    match &app.snapshot {
        Some(snapshot) => {
            let health = snapshot.health();
            let color = theme.load_color(100.0 - f64::from(health.score));
            lines.push(Line::from(vec![
                Span::styled(" Health ", label),
                Span::styled(
                    format!("{}/100 {}", health.score, health.status.label()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(load_line(snapshot, theme));
            lines.push(Line::from(vec![
                Span::styled(" Host ", label),
                Span::styled(
                    or_na(&snapshot.host.hostname),
                    theme.text_style(),
                ),
                Span::styled("   Up ", label),
                Span::styled(format_duration(snapshot.host.uptime), theme.text_style()),
            ]));
        }
        None => lines.push(Line::from(vec![
            Span::styled(" Health ", label),
            Span::styled("collecting\u{2026}", theme.muted_style()),
        ])),
    }

    if app.fetch_in_flight {
        lines.push(Line::from(Span::styled(
            format!(" {} refreshing", spinner(app.clock.frame())),
            Style::default().fg(theme.accent),
        )));
    }

    frame.render_widget(Paragraph::new(lines), text_area);

    if chart_area.width > 0 && !app.history.cpu.is_empty() {
        let values: Vec<u64> = app
            .history
            .cpu
            .iter()
            .map(|v| v.clamp(0.0, 100.0).round() as u64)
            .collect();
        let sparkline = Sparkline::default()
            .block(Block::default().title(Span::styled("CPU history", label)))
            .data(values.as_slice())
            .max(100)
            .style(Style::default().fg(theme.accent));
        frame.render_widget(sparkline, chart_area);
    }
}

fn load_line<'a>(snapshot: &Snapshot, theme: &Theme) -> Line<'a> {
    let label = theme.muted_style();
    let cpu = snapshot.cpu.usage;
    let mem = snapshot.memory.percent;
    Line::from(vec![
        Span::styled(" CPU ", label),
        Span::styled(format!("{cpu:.1}%"), Style::default().fg(theme.load_color(cpu))),
        Span::styled("   MEM ", label),
        Span::styled(format!("{mem:.1}%"), Style::default().fg(theme.load_color(mem))),
        Span::styled("   NET ", label),
        Span::styled(
            format!(
                "\u{2193}{} \u{2191}{}",
                format_bytes(snapshot.total_bytes_recv()),
                format_bytes(snapshot.total_bytes_sent())
            ),
            theme.text_style(),
        ),
    ])
}
