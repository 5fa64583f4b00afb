//! Per-client diagnostic sink.
//!
//! Each [`RestClient`](crate::RestClient) owns its own `tracing` dispatcher
//! instead of installing a global subscriber, so two clients in one process can
//! log to different files. Client operations run inside [`Diagnostics::in_scope`].

use crate::config::LogConfig;
use std::borrow::Cow;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Owned logging pipeline: console at INFO (ERROR only when disabled), optional file at DEBUG.
pub struct Diagnostics {
    dispatch: Dispatch,
    file_sink: Option<PathBuf>,
    // Dropping the guard flushes pending file writes.
    _guard: Option<WorkerGuard>,
}

impl Diagnostics {
    /// Build the sink. Never fails: a file sink that cannot be opened is
    /// reported through the console sink and skipped.
    ///
    /// The console sink is always installed. `console: false` only lowers it
    /// to ERROR, so failures (including file sink setup) still reach stderr.
    pub fn new(config: &LogConfig) -> Self {
        Self::with_console_writer(config, std::io::stderr)
    }

    pub(crate) fn with_console_writer<W>(config: &LogConfig, console_writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let console_level = if config.console {
            LevelFilter::INFO
        } else {
            LevelFilter::ERROR
        };
        let console = tracing_subscriber::fmt::layer()
            .with_writer(console_writer)
            .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
            .with_target(false)
            .with_ansi(false)
            .with_filter(crate_targets(console_level));

        let mut setup_error = None;
        let mut file_sink = None;
        let mut guard = None;
        let file_layer = match config.file.as_deref() {
            Some(path) => match open_log_file(path) {
                Ok(file) => {
                    let (writer, worker_guard) = tracing_appender::non_blocking(file);
                    guard = Some(worker_guard);
                    file_sink = Some(path.to_path_buf());
                    Some(
                        tracing_subscriber::fmt::layer()
                            .with_writer(writer)
                            .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
                            .with_target(false)
                            .with_ansi(false)
                            .with_filter(crate_targets(LevelFilter::DEBUG)),
                    )
                }
                Err(e) => {
                    setup_error = Some((path.to_path_buf(), e));
                    None
                }
            },
            None => None,
        };

        let subscriber = tracing_subscriber::registry().with(console).with(file_layer);
        let diagnostics = Self {
            dispatch: Dispatch::new(subscriber),
            file_sink,
            _guard: guard,
        };

        diagnostics.in_scope(|| match (&setup_error, &diagnostics.file_sink) {
            (Some((path, e)), _) => {
                tracing::error!("Failed to set up file logging at {}: {}", path.display(), e)
            }
            (None, Some(path)) => tracing::info!("File logging configured: {}", path.display()),
            (None, None) => {}
        });

        diagnostics
    }

    /// Run `f` with this client's dispatcher as the thread's default.
    pub fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Path of the active file sink, `None` when logging to console only.
    pub fn file_sink(&self) -> Option<&Path> {
        self.file_sink.as_deref()
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("file_sink", &self.file_sink)
            .finish()
    }
}

fn crate_targets(level: LevelFilter) -> Targets {
    Targets::new().with_target(env!("CARGO_CRATE_NAME"), level)
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Truncate `text` to at most `max_chars` characters for logging.
pub(crate) fn truncate_for_log(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// [`truncate_for_log`] with a `...` marker when something was cut.
pub(crate) fn preview_for_log(text: &str, max_chars: usize) -> Cow<'_, str> {
    let shown = truncate_for_log(text, max_chars);
    if shown.len() < text.len() {
        Cow::Owned(format!("{}...", shown))
    } else {
        Cow::Borrowed(shown)
    }
}

/// In-memory log writer for tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl CapturedLogs {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Run `f` with a DEBUG subscriber writing into `self` as the thread default.
    pub(crate) fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }
}

#[cfg(test)]
impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
