use std::path::{Path, PathBuf};
use std::time::Duration;

use cmdmatrix_tui::config::EngineConfig;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Theme preset name.
    #[serde(default)]
    pub theme: Option<String>,
    /// Log level used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_level: Option<String>,
    /// User catalogue replacing the built-in one.
    #[serde(default)]
    pub catalogue: Option<PathBuf>,
    /// Directory exported reports are written to.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
    #[serde(default)]
    pub catalogue_view: ViewOverrides,
    #[serde(default)]
    pub metrics_view: ViewOverrides,
}

/// Per-view timing overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewOverrides {
    pub tick_ms: Option<u64>,
    pub double_click_ms: Option<u64>,
    /// Ticks between background refreshes. Ignored for the catalogue view.
    pub refresh_ticks: Option<u64>,
}

impl ViewOverrides {
    /// Apply the overrides on top of a preset. Zero values are ignored.
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(ms) = self.tick_ms.filter(|&ms| ms > 0) {
            config = config.with_tick(Duration::from_millis(ms));
        }
        if let Some(ms) = self.double_click_ms.filter(|&ms| ms > 0) {
            config = config.with_double_click(Duration::from_millis(ms));
        }
        if let Some(ticks) = self.refresh_ticks.filter(|&t| t > 0) {
            config = config.with_refresh_ticks(ticks);
        }
        config
    }
}

impl AppConfig {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

/// Config file path: `~/.config/cmdmatrix/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cmdmatrix").join("config.toml"))
}

/// Outcome of reading the config file.
#[derive(Debug)]
pub enum Loaded {
    Found(AppConfig),
    Missing,
    /// The file exists but could not be read or parsed; defaults apply.
    Invalid { path: PathBuf, reason: String },
}

impl Loaded {
    pub fn into_config(self) -> AppConfig {
        match self {
            Self::Found(config) => config,
            Self::Missing | Self::Invalid { .. } => AppConfig::default(),
        }
    }
}

/// Load config from `path`, falling back to defaults if missing.
pub fn load_from(path: &Path) -> Loaded {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Loaded::Missing,
        Err(e) => {
            return Loaded::Invalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            };
        }
    };

    match toml::from_str::<AppConfig>(&contents) {
        Ok(config) => Loaded::Found(config),
        Err(e) => Loaded::Invalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    }
}

pub fn load_config() -> Loaded {
    match config_path() {
        Some(path) => load_from(&path),
        None => Loaded::Missing,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    // --- Parsing ---

    #[test]
    fn empty_file_is_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn parse_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
theme = "matrix"
log_level = "debug"
catalogue = "/home/me/commands.toml"
export_dir = "/tmp/reports"

[catalogue_view]
tick_ms = 50

[metrics_view]
tick_ms = 200
double_click_ms = 400
refresh_ticks = 150
"#,
        )
        .unwrap();

        assert_eq!(config.theme.as_deref(), Some("matrix"));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.catalogue, Some(PathBuf::from("/home/me/commands.toml")));
        assert_eq!(config.export_dir, Some(PathBuf::from("/tmp/reports")));
        assert_eq!(config.catalogue_view.tick_ms, Some(50));
        assert_eq!(config.metrics_view.refresh_ticks, Some(150));
    }

    // --- Overrides ---

    #[test]
    fn overrides_apply_to_preset() {
        let overrides = ViewOverrides {
            tick_ms: Some(200),
            double_click_ms: Some(400),
            refresh_ticks: Some(150),
        };
        let config = overrides.apply(EngineConfig::metrics());
        assert_eq!(config.tick, Duration::from_millis(200));
        assert_eq!(config.double_click, Duration::from_millis(400));
        assert_eq!(config.refresh_ticks, Some(150));
    }

    #[test]
    fn zero_overrides_are_ignored() {
        let overrides = ViewOverrides {
            tick_ms: Some(0),
            double_click_ms: Some(0),
            refresh_ticks: Some(0),
        };
        assert_eq!(overrides.apply(EngineConfig::metrics()), EngineConfig::metrics());
    }

    #[test]
    fn catalogue_view_never_refreshes() {
        let overrides = ViewOverrides {
            refresh_ticks: Some(10),
            ..ViewOverrides::default()
        };
        assert_eq!(overrides.apply(EngineConfig::catalogue()).refresh_ticks, None);
    }

    // --- Loading ---

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_from(&dir.path().join("config.toml"));
        assert!(matches!(loaded, Loaded::Missing));
        assert_eq!(loaded.into_config(), AppConfig::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let file = write_config("theme = [");
        let loaded = load_from(file.path());
        assert!(matches!(loaded, Loaded::Invalid { .. }));
        assert_eq!(loaded.into_config(), AppConfig::default());
    }

    #[test]
    fn valid_file_is_loaded() {
        let file = write_config("theme = \"mono\"\n");
        match load_from(file.path()) {
            Loaded::Found(config) => assert_eq!(config.theme.as_deref(), Some("mono")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
