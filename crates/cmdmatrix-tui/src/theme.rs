use cmdmatrix::{Group, Severity};
use ratatui::style::{Color, Modifier, Style};

/// Colours used by the renderer. Passed by reference into every draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    /// Whether group accents from the catalogue are honoured.
    pub group_accents: bool,
}

impl Theme {
    pub const PRESETS: [&'static str; 3] = ["neon", "matrix", "mono"];

    pub fn neon() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            text: Color::Rgb(230, 230, 240),
            muted: Color::Rgb(110, 110, 130),
            success: Color::Rgb(0, 255, 136),
            warning: Color::Rgb(255, 200, 0),
            error: Color::Rgb(255, 70, 70),
            highlight_fg: Color::Black,
            highlight_bg: Color::Rgb(255, 0, 255),
            group_accents: true,
        }
    }

    pub fn matrix() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 65),
            text: Color::Rgb(180, 255, 180),
            muted: Color::Rgb(0, 120, 40),
            success: Color::Rgb(0, 255, 65),
            warning: Color::Rgb(200, 255, 0),
            error: Color::Rgb(255, 60, 60),
            highlight_fg: Color::Black,
            highlight_bg: Color::Rgb(0, 200, 50),
            group_accents: false,
        }
    }

    pub fn mono() -> Self {
        Self {
            accent: Color::White,
            text: Color::Gray,
            muted: Color::DarkGray,
            success: Color::White,
            warning: Color::White,
            error: Color::White,
            highlight_fg: Color::Black,
            highlight_bg: Color::White,
            group_accents: false,
        }
    }

    pub fn presets() -> [Self; 3] {
        [Self::neon(), Self::matrix(), Self::mono()]
    }

    /// Preset name, if this theme is one of the presets.
    pub fn name(&self) -> Option<&'static str> {
        Self::presets()
            .iter()
            .position(|p| p == self)
            .map(|i| Self::PRESETS[i])
    }

    /// The preset after this one, wrapping around. A custom theme moves to
    /// the first preset.
    pub fn cycled(&self) -> Self {
        let presets = Self::presets();
        let next = presets
            .iter()
            .position(|p| p == self)
            .map_or(0, |i| (i + 1) % presets.len());
        presets[next]
    }

    /// Look up a preset by name, case-insensitively.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "neon" => Some(Self::neon()),
            "matrix" => Some(Self::matrix()),
            "mono" => Some(Self::mono()),
            _ => None,
        }
    }

    pub fn group_color(&self, group: &Group) -> Color {
        match group.accent_rgb() {
            Some((r, g, b)) if self.group_accents => Color::Rgb(r, g, b),
            _ => self.accent,
        }
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Info => self.accent,
            Severity::Success => self.success,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }

    /// Colour for a 0..=100 load value.
    pub fn load_color(&self, percent: f64) -> Color {
        if percent > 90.0 {
            self.error
        } else if percent > 70.0 {
            self.warning
        } else {
            self.success
        }
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_by_name() {
        for name in Theme::PRESETS {
            assert!(Theme::by_name(name).is_some(), "{name}");
        }
        assert_eq!(Theme::by_name("MONO"), Some(Theme::mono()));
        assert!(Theme::by_name("sepia").is_none());
    }

    #[test]
    fn cycling_visits_every_preset_and_wraps() {
        let mut theme = Theme::neon();
        let mut names = Vec::new();
        for _ in 0..Theme::PRESETS.len() {
            theme = theme.cycled();
            names.push(theme.name().unwrap());
        }
        assert_eq!(names, vec!["matrix", "mono", "neon"]);
    }

    #[test]
    fn custom_theme_cycles_to_first_preset() {
        let custom = Theme {
            accent: Color::Red,
            ..Theme::mono()
        };
        assert_eq!(custom.name(), None);
        assert_eq!(custom.cycled(), Theme::neon());
    }

    #[test]
    fn group_accent_overrides_only_when_enabled() {
        let group = Group::new("g", "G", "#102030");
        assert_eq!(Theme::neon().group_color(&group), Color::Rgb(16, 32, 48));
        assert_eq!(Theme::mono().group_color(&group), Color::White);
    }

    #[test]
    fn invalid_accent_falls_back_to_theme() {
        let group = Group::new("g", "G", "teal");
        assert_eq!(Theme::neon().group_color(&group), Theme::neon().accent);
    }
}
