use std::io::{self, IsTerminal};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        w.write_str(&now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

/// Installs the global subscriber.
///
/// - `RUST_LOG` wins, otherwise [`DEFAULT_FILTER`]
/// - compact single-line events with target, file and line
/// - ANSI colors only when stdout is a terminal
pub fn init() -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let format = fmt::format()
        .compact()
        .with_timer(ChronoRfc3339Utc)
        .with_target(true)
        .with_source_location(true);

    let layer = fmt::layer()
        .with_ansi(io::stdout().is_terminal())
        .event_format(format);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
}
