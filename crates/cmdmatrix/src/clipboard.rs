use std::io::Write;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Errors surfaced by a clipboard writer.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("failed to write clipboard escape: {0}")]
    Io(#[from] std::io::Error),

    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Places text on the user's clipboard.
pub trait ClipboardWriter: Send + Sync {
    fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

impl<T: ClipboardWriter + ?Sized> ClipboardWriter for Arc<T> {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        (**self).write(text)
    }
}

/// Clipboard via the OSC 52 terminal escape, which most modern terminals
/// (and tmux with `set-clipboard on`) forward to the system clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct Osc52Clipboard;

impl ClipboardWriter for Osc52Clipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(osc52_sequence(text).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// The OSC 52 "set clipboard" sequence for `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}
