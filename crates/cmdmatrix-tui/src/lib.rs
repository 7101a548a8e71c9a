pub mod action;
pub mod app;
pub mod clock;
pub mod config;
pub mod detail;
pub mod filter;
pub mod hitbox;
pub mod input;
pub mod layout;
pub mod metrics;
pub mod notification;
mod render;
pub mod theme;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cmdmatrix::report::report_file_name;
use cmdmatrix::{ClipboardWriter, ReportExporter, SystemInfoProvider};
use crossterm::ExecutableCommand;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};

use crate::action::{Action, AppCommand};
use crate::app::App;

/// Collaborators the event loop hands side effects to.
#[derive(Clone)]
pub struct Services {
    pub provider: Arc<dyn SystemInfoProvider>,
    pub clipboard: Arc<dyn ClipboardWriter>,
    pub exporter: Arc<dyn ReportExporter>,
    /// Directory reports are written into.
    pub export_dir: PathBuf,
}

/// Launch the interactive dashboard. Returns when the user quits.
pub async fn run(app: App, services: Services) -> anyhow::Result<()> {
    // Terminal setup.
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, app, services).await;

    // Terminal teardown (always runs).
    disable_raw_mode()?;
    std::io::stdout().execute(DisableMouseCapture)?;
    std::io::stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut app: App,
    services: Services,
) -> anyhow::Result<()> {
    use futures::StreamExt;

    let (action_tx, mut action_rx) = mpsc::channel::<Action>(32);
    let mut event_stream = EventStream::new();
    let mut tick_interval = interval(app.config.tick.max(Duration::from_millis(1)));
    tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(view = ?app.config.kind, "dashboard started");

    let initial = app.initial_command();
    execute(initial, &services, &action_tx);

    loop {
        // Keep geometry and hitboxes in step with the terminal before drawing.
        let size = terminal.size()?;
        if app.size() != Some((size.width, size.height)) {
            app.resize(size.width, size.height);
        }

        terminal.draw(|frame| render::render(frame, &app, &app.theme))?;

        let command = tokio::select! {
            Some(event_result) = event_stream.next() => {
                match event_result {
                    Ok(event) => {
                        // Only key presses (not release/repeat), mouse and resize events.
                        match &event {
                            Event::Key(key) if key.kind != KeyEventKind::Press => continue,
                            Event::Key(_) | Event::Mouse(_) | Event::Resize(..) => {}
                            _ => continue,
                        }
                        app.handle_event(event)
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "terminal event stream error");
                        continue;
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.handle_action(action)
            }
            _ = tick_interval.tick() => {
                app.tick()
            }
        };

        if !execute(command, &services, &action_tx) {
            break;
        }
    }

    tracing::info!("dashboard stopped");
    Ok(())
}

/// Start the side effect for `command`. Returns `false` when the loop should
/// stop.
///
/// Every effect runs on a blocking thread and reports back through `tx`.
fn execute(command: AppCommand, services: &Services, tx: &mpsc::Sender<Action>) -> bool {
    match command {
        AppCommand::None => {}
        AppCommand::Quit => return false,
        AppCommand::Copy { record_id, text } => {
            let clipboard = Arc::clone(&services.clipboard);
            let tx = tx.clone();
            tokio::spawn(async move {
                let payload = text.clone();
                let result = tokio::task::spawn_blocking(move || {
                    clipboard.write(&payload).map_err(|e| e.to_string())
                })
                .await
                .unwrap_or_else(|e| Err(format!("Task panicked: {e}")));
                let _ = tx
                    .send(Action::CopyCompleted {
                        record_id,
                        text,
                        result,
                    })
                    .await;
            });
        }
        AppCommand::FetchSnapshot => {
            let provider = Arc::clone(&services.provider);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = tokio::task::spawn_blocking(move || {
                    provider.collect().map_err(|e| e.to_string())
                })
                .await
                .unwrap_or_else(|e| Err(format!("Task panicked: {e}")));
                let _ = tx.send(Action::SnapshotLoaded(Box::new(result))).await;
            });
        }
        AppCommand::Export(snapshot) => {
            let exporter = Arc::clone(&services.exporter);
            let destination = services
                .export_dir
                .join(report_file_name(chrono::Local::now()));
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = tokio::task::spawn_blocking(move || {
                    exporter
                        .export(&snapshot, &destination)
                        .map(|()| destination)
                        .map_err(|e| e.to_string())
                })
                .await
                .unwrap_or_else(|e| Err(format!("Task panicked: {e}")));
                if let Ok(path) = &result {
                    tracing::info!(path = %path.display(), "report exported");
                }
                let _ = tx.send(Action::ExportCompleted(result)).await;
            });
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use cmdmatrix::Snapshot;
    use cmdmatrix::test_support::{
        FailingClipboard, MemoryExporter, RecordingClipboard, StaticProvider,
    };

    use super::*;

    fn services(
        clipboard: Arc<dyn ClipboardWriter>,
        provider: Arc<StaticProvider>,
        exporter: Arc<MemoryExporter>,
    ) -> Services {
        Services {
            provider,
            clipboard,
            exporter,
            export_dir: PathBuf::from("/reports"),
        }
    }

    fn defaults() -> (Arc<RecordingClipboard>, Arc<StaticProvider>, Arc<MemoryExporter>) {
        (
            Arc::new(RecordingClipboard::default()),
            Arc::new(StaticProvider::new(Snapshot::default())),
            Arc::new(MemoryExporter::default()),
        )
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let (clipboard, provider, exporter) = defaults();
        let services = services(clipboard, provider, exporter);
        let (tx, _rx) = mpsc::channel(4);
        assert!(!execute(AppCommand::Quit, &services, &tx));
        assert!(execute(AppCommand::None, &services, &tx));
    }

    #[tokio::test]
    async fn copy_writes_clipboard_and_reports_back() {
        let (clipboard, provider, exporter) = defaults();
        let services = services(clipboard.clone(), provider, exporter);
        let (tx, mut rx) = mpsc::channel(4);

        execute(
            AppCommand::Copy {
                record_id: "ls".into(),
                text: "ls -la".into(),
            },
            &services,
            &tx,
        );

        match rx.recv().await {
            Some(Action::CopyCompleted {
                record_id,
                text,
                result,
            }) => {
                assert_eq!(record_id, "ls");
                assert_eq!(text, "ls -la");
                assert!(result.is_ok());
            }
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(clipboard.writes(), vec!["ls -la".to_owned()]);
    }

    #[tokio::test]
    async fn copy_failure_is_reported() {
        let (_, provider, exporter) = defaults();
        let services = services(Arc::new(FailingClipboard), provider, exporter);
        let (tx, mut rx) = mpsc::channel(4);

        execute(
            AppCommand::Copy {
                record_id: "ls".into(),
                text: "ls".into(),
            },
            &services,
            &tx,
        );

        match rx.recv().await {
            Some(Action::CopyCompleted { result, .. }) => assert!(result.is_err()),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_collects_from_provider() {
        let (clipboard, provider, exporter) = defaults();
        let services = services(clipboard, provider.clone(), exporter);
        let (tx, mut rx) = mpsc::channel(4);

        execute(AppCommand::FetchSnapshot, &services, &tx);

        match rx.recv().await {
            Some(Action::SnapshotLoaded(result)) => assert!(result.is_ok()),
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn failing_provider_reports_error() {
        let (clipboard, _, exporter) = defaults();
        let services = services(clipboard, Arc::new(StaticProvider::failing()), exporter);
        let (tx, mut rx) = mpsc::channel(4);

        execute(AppCommand::FetchSnapshot, &services, &tx);

        match rx.recv().await {
            Some(Action::SnapshotLoaded(result)) => assert!(result.is_err()),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn export_writes_into_export_dir() {
        let (clipboard, provider, exporter) = defaults();
        let services = services(clipboard, provider, exporter.clone());
        let (tx, mut rx) = mpsc::channel(4);

        execute(
            AppCommand::Export(Box::new(Snapshot::default())),
            &services,
            &tx,
        );

        let path = match rx.recv().await {
            Some(Action::ExportCompleted(Ok(path))) => path,
            other => panic!("unexpected action: {other:?}"),
        };
        assert!(path.starts_with("/reports"));
        assert_eq!(exporter.exports(), vec![path]);
    }
}
