use std::time::Duration;

/// Which dashboard the engine drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Browse the command catalogue.
    Catalogue,
    /// Live system metrics projected into groups.
    Metrics,
}

/// Per-view engine parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub kind: ViewKind,
    pub title: String,
    pub tick: Duration,
    pub double_click: Duration,
    pub min_width: u16,
    pub min_height: u16,
    /// Ticks between background refreshes. Metrics only.
    pub refresh_ticks: Option<u64>,
}

impl EngineConfig {
    pub fn catalogue() -> Self {
        Self {
            kind: ViewKind::Catalogue,
            title: "CMDMATRIX".into(),
            tick: Duration::from_millis(80),
            double_click: Duration::from_millis(300),
            min_width: 50,
            min_height: 15,
            refresh_ticks: None,
        }
    }

    pub fn metrics() -> Self {
        Self {
            kind: ViewKind::Metrics,
            title: "SYSTEM MONITOR".into(),
            tick: Duration::from_millis(100),
            double_click: Duration::from_millis(300),
            min_width: 60,
            min_height: 20,
            refresh_ticks: Some(300),
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_double_click(mut self, window: Duration) -> Self {
        self.double_click = window;
        self
    }

    pub fn with_refresh_ticks(mut self, ticks: u64) -> Self {
        if self.kind == ViewKind::Metrics {
            self.refresh_ticks = Some(ticks);
        }
        self
    }

    pub fn is_metrics(&self) -> bool {
        self.kind == ViewKind::Metrics
    }

    pub fn fits(&self, width: u16, height: u16) -> bool {
        width >= self.min_width && height >= self.min_height
    }
}
