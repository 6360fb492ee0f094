use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;

use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Where log lines go.
pub enum LogSink<'a> {
    Stderr,
    /// Append to a file; discard everything when `None` or when the file cannot be opened.
    File(Option<&'a Path>),
}

/// Installs the global subscriber. `TASKBOARD_LOG` wins over `level`.
pub fn init_logging(level: Option<&str>, sink: LogSink<'_>) {
    let directive = std::env::var("TASKBOARD_LOG")
        .ok()
        .or_else(|| level.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string());
    let env_filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter).with_target(true);

    let init_result = match sink {
        LogSink::Stderr => builder
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .try_init(),
        LogSink::File(Some(path)) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).try_init(),
            Err(e) => {
                eprintln!("Could not open log file {}: {}. Logging disabled.", path.display(), e);
                builder.with_writer(std::io::sink).try_init()
            }
        },
        LogSink::File(None) => builder.with_writer(std::io::sink).try_init(),
    };

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
}
