/// How a transient notification should be presented.
///
/// Clipboard, export and collection results are reported back to the user
/// as notifications instead of being printed, so the caller decides whether
/// they land in a status bar, a log, or stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral progress or status update.
    Info,
    /// An operation the user asked for went through.
    Success,
    /// Something noteworthy happened but nothing failed.
    Warning,
    /// An operation failed. Never fatal to the interactive view.
    Error,
}

impl Severity {
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn is_warning(self) -> bool {
        matches!(self, Self::Warning)
    }

    /// Short glyph shown before the message.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Success => "\u{2713}",
            Self::Warning => "!",
            Self::Error => "\u{2717}",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}
