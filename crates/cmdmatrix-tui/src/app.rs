use std::collections::HashMap;
use std::time::Instant;

use cmdmatrix::{Catalogue, Group, History, Record, Severity, Snapshot};
use crossterm::event::Event;

use crate::action::{Action, AppCommand};
use crate::clock::{Clock, Countdown};
use crate::config::{EngineConfig, ViewKind};
use crate::filter::filter_indices;
use crate::hitbox::{self, Button, HitInputs, HitKind, HitRegistry};
use crate::input::{self, InputEvent};
use crate::layout::{Geometry, compute_layout};
use crate::metrics::metric_catalogue;
use crate::notification::Notifications;
use crate::theme::Theme;

/// Longest accepted search query, in characters.
pub const MAX_QUERY_LEN: usize = 64;
const PAGE_SIZE: isize = 10;

const NOTICE_TICKS: u16 = 30;
const COPY_CONFIRM_TICKS: u16 = 25;
const ALERT_TICKS: u16 = 50;
const ALERT_THRESHOLD: f64 = 90.0;

/// UI mode the app is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Searching,
    HelpOverlay,
}

/// What the terminal currently allows us to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    /// No size reported yet.
    Unsized,
    /// Below the configured minimum; only a placeholder is drawn.
    TooSmall { width: u16, height: u16 },
    Ready(Geometry),
}

#[derive(Debug, Clone, Copy)]
struct LastClick {
    at: Instant,
    row: usize,
}

/// The dashboard state. This is a pure state machine:
/// inputs produce commands (side effects), actions update state.
pub struct App {
    pub config: EngineConfig,
    /// Groups currently browsed. Rebuilt from each snapshot in the metrics view.
    pub catalogue: Catalogue,
    pub active_group: usize,
    /// Positions into the active group's records that match the query.
    pub filtered: Vec<usize>,
    /// Selected position in `filtered`.
    pub selected: usize,
    /// First visible position in `filtered`.
    pub scroll_offset: usize,
    pub query: String,
    pub mode: Mode,
    pub viewport: Viewport,
    /// Clickable regions for the current frame.
    pub hitboxes: HitRegistry,
    pub clock: Clock,
    pub notifications: Notifications,
    /// Running while the copy button shows its confirmation.
    pub copy_confirm: Countdown,
    /// Successful copies per record id.
    pub usage: HashMap<String, u32>,

    /// Latest snapshot (metrics view).
    pub snapshot: Option<Snapshot>,
    pub history: History,
    pub fetch_in_flight: bool,
    /// Colours the renderer draws with; `t` steps through the presets.
    pub theme: Theme,
    pub started: Instant,

    last_click: Option<LastClick>,
}

impl App {
    pub fn new(catalogue: Catalogue, config: EngineConfig) -> Self {
        let clock = Clock::new(config.refresh_ticks);
        let mut app = Self {
            config,
            catalogue,
            active_group: 0,
            filtered: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            query: String::new(),
            mode: Mode::Normal,
            viewport: Viewport::Unsized,
            hitboxes: HitRegistry::default(),
            clock,
            notifications: Notifications::default(),
            copy_confirm: Countdown::default(),
            usage: HashMap::new(),
            snapshot: None,
            history: History::default(),
            fetch_in_flight: false,
            theme: Theme::default(),
            started: Instant::now(),
            last_click: None,
        };
        app.refilter();
        app
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// A metrics dashboard showing `N/A` until the first snapshot arrives.
    pub fn metrics(config: EngineConfig) -> Self {
        Self::new(metric_catalogue(&Snapshot::default()), config)
    }

    /// Command to run before the first event, if any.
    pub fn initial_command(&mut self) -> AppCommand {
        match self.config.kind {
            ViewKind::Metrics => self.request_fetch(),
            ViewKind::Catalogue => AppCommand::None,
        }
    }

    /// Handle a terminal event, returning a command for the event loop.
    pub fn handle_event(&mut self, event: Event) -> AppCommand {
        self.handle_event_at(event, Instant::now())
    }

    /// Same as [`App::handle_event`] with an explicit timestamp for click timing.
    pub fn handle_event_at(&mut self, event: Event, now: Instant) -> AppCommand {
        match input::translate(&event, self.mode) {
            Some(input) => self.handle_input(input, now),
            None => AppCommand::None,
        }
    }

    pub fn handle_input(&mut self, input: InputEvent, now: Instant) -> AppCommand {
        let command = self.dispatch(input, now);
        self.rebuild_hitboxes();
        command
    }

    /// Handle an async action (result from a background task).
    pub fn handle_action(&mut self, action: Action) -> AppCommand {
        match action {
            Action::SnapshotLoaded(result) => {
                self.fetch_in_flight = false;
                match *result {
                    Ok(snapshot) => self.apply_snapshot(snapshot),
                    Err(msg) => {
                        tracing::warn!(error = %msg, "snapshot collection failed");
                        self.notify(format!("Collection failed: {msg}"), Severity::Warning);
                        if self.snapshot.is_none() {
                            self.snapshot = Some(Snapshot::default());
                        }
                    }
                }
            }
            Action::CopyCompleted {
                record_id,
                text,
                result,
            } => match result {
                Ok(()) => {
                    self.copy_confirm = Countdown::new(COPY_CONFIRM_TICKS);
                    self.notify(format!("Copied: {text}"), Severity::Success);
                    *self.usage.entry(record_id).or_default() += 1;
                }
                Err(msg) => {
                    tracing::warn!(error = %msg, "clipboard write failed");
                    self.notify("Failed to copy!", Severity::Error);
                }
            },
            Action::ExportCompleted(result) => match result {
                Ok(path) => {
                    self.notify(format!("Report saved: {}", path.display()), Severity::Success);
                }
                Err(msg) => {
                    tracing::warn!(error = %msg, "report export failed");
                    self.notify(format!("Export failed: {msg}"), Severity::Error);
                }
            },
        }
        self.rebuild_hitboxes();
        AppCommand::None
    }

    /// Tick the app forward (called on interval). Drives animation,
    /// notification expiry and the periodic refresh.
    pub fn tick(&mut self) -> AppCommand {
        self.notifications.decay();
        self.copy_confirm.tick();
        if self.clock.advance(self.fetch_in_flight) && self.config.is_metrics() {
            return self.request_fetch();
        }
        AppCommand::None
    }

    /// Recompute geometry for a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = if self.config.fits(width, height) {
            Viewport::Ready(compute_layout(
                width,
                height,
                self.catalogue.groups.len(),
            ))
        } else {
            tracing::debug!(width, height, "terminal below minimum size");
            Viewport::TooSmall { width, height }
        };
        if self.geometry().is_some() {
            self.ensure_visible();
        }
        self.rebuild_hitboxes();
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        match &self.viewport {
            Viewport::Ready(geometry) => Some(geometry),
            Viewport::Unsized | Viewport::TooSmall { .. } => None,
        }
    }

    /// Last size reported by the terminal.
    pub fn size(&self) -> Option<(u16, u16)> {
        match self.viewport {
            Viewport::Unsized => None,
            Viewport::TooSmall { width, height } => Some((width, height)),
            Viewport::Ready(geometry) => Some((geometry.width, geometry.height)),
        }
    }

    pub fn visible_rows(&self) -> usize {
        self.geometry().map_or(1, Geometry::visible_rows)
    }

    pub fn active_group(&self) -> Option<&Group> {
        self.catalogue.groups.get(self.active_group)
    }

    pub fn active_records(&self) -> &[Record] {
        self.active_group().map_or(&[][..], |g| g.records.as_slice())
    }

    pub fn filtered_records(&self) -> impl Iterator<Item = &Record> {
        let records = self.active_records();
        self.filtered.iter().filter_map(move |&i| records.get(i))
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.filtered
            .get(self.selected)
            .and_then(|&i| self.active_records().get(i))
    }

    pub fn usage_count(&self, record_id: &str) -> u32 {
        self.usage.get(record_id).copied().unwrap_or(0)
    }

    /// Text put on the clipboard when `record` is activated.
    pub fn copy_text(&self, record: &Record) -> String {
        match self.config.kind {
            ViewKind::Catalogue => record.id.clone(),
            ViewKind::Metrics => format!("{}: {}", record.id, record.description),
        }
    }

    fn dispatch(&mut self, input: InputEvent, now: Instant) -> AppCommand {
        match input {
            InputEvent::Quit => return AppCommand::Quit,
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                return AppCommand::None;
            }
            _ => {}
        }

        if matches!(self.viewport, Viewport::TooSmall { .. }) {
            return AppCommand::None;
        }

        match self.mode {
            Mode::Normal => self.handle_normal(input, now),
            Mode::Searching => self.handle_search(input, now),
            Mode::HelpOverlay => self.handle_help(input),
        }
    }

    fn handle_normal(&mut self, input: InputEvent, now: Instant) -> AppCommand {
        match input {
            InputEvent::MoveUp => self.move_by(-1),
            InputEvent::MoveDown => self.move_by(1),
            InputEvent::PageUp => self.move_by(-PAGE_SIZE),
            InputEvent::PageDown => self.move_by(PAGE_SIZE),
            InputEvent::Top => self.move_to(0),
            InputEvent::Bottom => self.move_to(self.filtered.len().saturating_sub(1)),
            InputEvent::NextGroup => self.cycle_group(1),
            InputEvent::PrevGroup => self.cycle_group(-1),
            InputEvent::JumpGroup(index) => self.select_group(index),
            InputEvent::OpenSearch => self.mode = Mode::Searching,
            InputEvent::OpenHelp => self.mode = Mode::HelpOverlay,
            InputEvent::ClearQuery => {
                if !self.query.is_empty() {
                    self.query.clear();
                    self.requery();
                }
            }
            InputEvent::Activate => return self.activate(),
            InputEvent::Refresh => return self.request_refresh(),
            InputEvent::Export => return self.request_export(),
            InputEvent::CycleTheme => self.cycle_theme(),
            InputEvent::Click { column, row } => return self.handle_click(column, row, now),
            InputEvent::ScrollUp => self.scroll_by(-1),
            InputEvent::ScrollDown => self.scroll_by(1),
            InputEvent::CloseSearch
            | InputEvent::QueryInput(_)
            | InputEvent::QueryBackspace
            | InputEvent::CloseHelp
            | InputEvent::Quit
            | InputEvent::Resize { .. } => {}
        }
        AppCommand::None
    }

    fn handle_search(&mut self, input: InputEvent, now: Instant) -> AppCommand {
        match input {
            InputEvent::CloseSearch => self.mode = Mode::Normal,
            InputEvent::MoveUp => self.move_by(-1),
            InputEvent::MoveDown => self.move_by(1),
            InputEvent::QueryInput(c) => {
                if self.query.chars().count() < MAX_QUERY_LEN {
                    self.query.push(c);
                    self.requery();
                }
            }
            InputEvent::QueryBackspace => {
                if self.query.pop().is_some() {
                    self.requery();
                }
            }
            InputEvent::Click { column, row } => return self.handle_click(column, row, now),
            InputEvent::ScrollUp => self.scroll_by(-1),
            InputEvent::ScrollDown => self.scroll_by(1),
            _ => {}
        }
        AppCommand::None
    }

    fn handle_help(&mut self, input: InputEvent) -> AppCommand {
        if matches!(input, InputEvent::CloseHelp | InputEvent::Click { .. }) {
            self.mode = Mode::Normal;
        }
        AppCommand::None
    }

    fn handle_click(&mut self, column: u16, row: u16, now: Instant) -> AppCommand {
        let Some(hit) = self.hitboxes.resolve(column, row) else {
            self.last_click = None;
            return AppCommand::None;
        };

        if !matches!(hit.kind, HitKind::Row(_)) {
            self.last_click = None;
        }

        match hit.kind {
            HitKind::Row(index) => return self.click_row(index, now),
            HitKind::Group(index) => self.select_group(index),
            HitKind::SearchBar => self.mode = Mode::Searching,
            HitKind::Button(Button::Copy) => return self.activate(),
            HitKind::Button(Button::Help) => self.mode = Mode::HelpOverlay,
            HitKind::Button(Button::Refresh) => return self.request_refresh(),
            HitKind::Button(Button::Export) => return self.request_export(),
        }
        AppCommand::None
    }

    fn click_row(&mut self, index: usize, now: Instant) -> AppCommand {
        if index >= self.filtered.len() {
            return AppCommand::None;
        }
        let is_double = self.is_double_click(index, now);
        self.move_to(index);
        if is_double {
            self.activate()
        } else {
            AppCommand::None
        }
    }

    /// Check whether a click on `row` completes a double-click.
    /// Updates the last click state; a completed double-click resets it so a
    /// third click starts over.
    fn is_double_click(&mut self, row: usize, now: Instant) -> bool {
        let window = self.config.double_click;
        let is_double = self
            .last_click
            .is_some_and(|last| last.row == row && now.saturating_duration_since(last.at) < window);

        self.last_click = if is_double {
            None
        } else {
            Some(LastClick { at: now, row })
        };
        is_double
    }

    fn activate(&mut self) -> AppCommand {
        match self.selected_record() {
            Some(record) => AppCommand::Copy {
                record_id: record.id.clone(),
                text: self.copy_text(record),
            },
            None => AppCommand::None,
        }
    }

    fn request_fetch(&mut self) -> AppCommand {
        if self.fetch_in_flight {
            return AppCommand::None;
        }
        self.fetch_in_flight = true;
        tracing::debug!("requesting snapshot");
        AppCommand::FetchSnapshot
    }

    fn request_refresh(&mut self) -> AppCommand {
        if !self.config.is_metrics() {
            return AppCommand::None;
        }
        self.clock.restart_refresh();
        self.request_fetch()
    }

    fn request_export(&mut self) -> AppCommand {
        if !self.config.is_metrics() {
            return AppCommand::None;
        }
        match &self.snapshot {
            Some(snapshot) => AppCommand::Export(Box::new(snapshot.clone())),
            None => {
                self.notify("No data to export yet", Severity::Warning);
                AppCommand::None
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        tracing::debug!(
            cpu = snapshot.cpu.usage,
            memory = snapshot.memory.percent,
            "snapshot received"
        );
        self.history.record(&snapshot);
        if snapshot.cpu.usage > ALERT_THRESHOLD {
            self.notifications
                .push("High CPU usage detected!", Severity::Warning, ALERT_TICKS);
        }
        if snapshot.memory.percent > ALERT_THRESHOLD {
            self.notifications
                .push("High memory usage detected!", Severity::Warning, ALERT_TICKS);
        }

        self.catalogue = metric_catalogue(&snapshot);
        if self.active_group >= self.catalogue.groups.len() {
            self.active_group = 0;
        }
        self.snapshot = Some(snapshot);
        self.refilter();
        if let Some((width, height)) = self.size() {
            self.resize(width, height);
        }
    }

    fn cycle_theme(&mut self) {
        self.theme = self.theme.cycled();
        let name = self.theme.name().unwrap_or("custom");
        tracing::debug!(theme = name, "theme changed");
        self.notify(format!("Theme: {name}"), Severity::Info);
    }

    fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications.push(message, severity, NOTICE_TICKS);
    }

    // --- Selection ---

    fn move_by(&mut self, delta: isize) {
        let target = self.selected.saturating_add_signed(delta);
        self.move_to(target);
    }

    fn move_to(&mut self, index: usize) {
        self.selected = index.min(self.filtered.len().saturating_sub(1));
        self.ensure_visible();
    }

    /// Keep the selection inside the visible window.
    fn ensure_visible(&mut self) {
        let rows = self.visible_rows();
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + rows {
            self.scroll_offset = self.selected + 1 - rows;
        }
        let max = self.filtered.len().saturating_sub(rows);
        self.scroll_offset = self.scroll_offset.min(max);
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.filtered.len().saturating_sub(self.visible_rows());
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta).min(max);
    }

    fn cycle_group(&mut self, step: isize) {
        let count = self.catalogue.groups.len();
        if count == 0 {
            return;
        }
        let next = (self.active_group as isize + step).rem_euclid(count as isize);
        self.select_group(next as usize);
    }

    fn select_group(&mut self, index: usize) {
        if index >= self.catalogue.groups.len() {
            return;
        }
        self.active_group = index;
        self.selected = 0;
        self.scroll_offset = 0;
        self.last_click = None;
        self.refilter();
    }

    /// Query changed: refilter and start from the top.
    fn requery(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
        self.refilter();
    }

    /// Recompute the filtered view, keeping the selection in bounds.
    fn refilter(&mut self) {
        self.filtered = filter_indices(self.active_records(), &self.query);
        self.move_to(self.selected);
    }

    fn rebuild_hitboxes(&mut self) {
        let Viewport::Ready(geometry) = self.viewport else {
            self.hitboxes.clear();
            return;
        };

        let records = self
            .catalogue
            .groups
            .get(self.active_group)
            .map_or(&[][..], |g| g.records.as_slice());
        let selected = self.filtered.get(self.selected).and_then(|&i| records.get(i));

        let inputs = HitInputs {
            group_count: self.catalogue.groups.len(),
            scroll_offset: self.scroll_offset,
            filtered_len: self.filtered.len(),
            selected,
            action_buttons: self.config.is_metrics(),
        };
        hitbox::rebuild(&mut self.hitboxes, &geometry, &inputs);
    }
}
