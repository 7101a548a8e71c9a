use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Where log lines go.
pub enum Sink {
    /// Interactive views own the terminal, so they log to a file.
    File,
    Stderr,
}

/// `<cache>/cmdmatrix/cmdmatrix.log`
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("cmdmatrix").join("cmdmatrix.log"))
}

/// Initialize the global subscriber. `RUST_LOG` wins over `level`.
pub fn init(level: &str, sink: Sink) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match sink {
        Sink::Stderr => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        Sink::File => match open_log_file() {
            Some(file) => {
                let _ = builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            None => {
                let _ = builder.with_writer(std::io::sink).try_init();
            }
        },
    }
}

fn open_log_file() -> Option<std::fs::File> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
