//! Logging utilities wrapping `tracing` initialisation
//!
//! Log lines are written as `timestamp - LEVEL - message` to stdout, and
//! optionally appended to a file.

use crate::config::LoggingOptions;
use crate::error::{Error, Result};
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::time::{FormatTime, UtcTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialise the global tracing subscriber according to the provided logging options.
///
/// Subsequent calls are ignored to avoid reinitialisation panics.
pub fn init(options: &LoggingOptions) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_new(options.level.as_str())
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {e}", options.level)))?;

    Registry::default()
        .with(env_filter)
        .with(file_layer::<LayeredEnvFilter>(options)?)
        .with(stdout_layer::<_>(options.color))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))
}

type LayeredEnvFilter = Layered<EnvFilter, Registry>;
type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

fn file_layer<S>(options: &LoggingOptions) -> Result<Option<BoxedLayer<S>>>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    let path = match options.file.as_ref() {
        Some(path) => path,
        None => return Ok(None),
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| Error::Config(format!("Failed to open log file {}: {e}", path.display())))?;

    let (non_blocking, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);
    // Store guard to keep background thread alive.
    let _ = FILE_GUARD.set(guard);

    Ok(Some(
        fmt::layer()
            .event_format(LineFormat::new(UtcTime::rfc_3339()))
            .with_ansi(false)
            .with_writer(non_blocking)
            .boxed(),
    ))
}

fn stdout_layer<S>(color: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    fmt::layer()
        .event_format(LineFormat::new(UtcTime::rfc_3339()))
        .with_writer(io::stdout)
        .with_ansi(color)
        .boxed()
}

/// Formats events as `timestamp - LEVEL - message key=value...`
#[derive(Debug, Clone)]
pub struct LineFormat<T> {
    timer: T,
}

impl<T> LineFormat<T> {
    /// Create a formatter stamping lines with `timer`
    pub fn new(timer: T) -> Self {
        Self { timer }
    }
}

impl<S, N, T> FormatEvent<S, N> for LineFormat<T>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    N: for<'writer> FormatFields<'writer> + 'static,
    T: FormatTime,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        if self.timer.format_time(&mut writer).is_err() {
            writer.write_str("<unknown time>")?;
        }

        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            write!(writer, " - \x1b[{}m{level}\x1b[0m - ", level_color(level))?;
        } else {
            write!(writer, " - {level} - ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_color(level: Level) -> u8 {
    match level {
        Level::ERROR => 31,
        Level::WARN => 33,
        Level::INFO => 32,
        Level::DEBUG => 34,
        Level::TRACE => 35,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    struct FixedTime;

    impl FormatTime for FixedTime {
        fn format_time(&self, w: &mut format::Writer<'_>) -> std::fmt::Result {
            w.write_str("2024-01-01T00:00:00Z")
        }
    }

    fn capture_line(color: bool, emit: impl FnOnce()) -> String {
        let capture = Capture::default();
        let subscriber = Registry::default().with(
            fmt::layer()
                .event_format(LineFormat::new(FixedTime))
                .with_ansi(color)
                .with_writer(capture.clone()),
        );
        tracing::subscriber::with_default(subscriber, emit);
        let bytes = capture.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_line_format() {
        let line = capture_line(false, || {
            tracing::error!("Failed to create directory qr_codes: denied");
        });
        assert_eq!(
            line,
            "2024-01-01T00:00:00Z - ERROR - Failed to create directory qr_codes: denied\n"
        );
    }

    #[test]
    fn test_line_format_includes_fields() {
        let line = capture_line(false, || {
            tracing::warn!(path = "out.png", "Skipped");
        });
        assert!(line.starts_with("2024-01-01T00:00:00Z - WARN - Skipped"), "{line}");
        assert!(line.contains("path=\"out.png\""), "{line}");
    }

    #[test]
    fn test_line_format_colors_level() {
        let line = capture_line(true, || tracing::info!("ready"));
        assert!(line.contains("\x1b[32mINFO\x1b[0m"), "{line:?}");
    }
}
