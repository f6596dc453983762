//! Logging infrastructure for packfill
//!
//! Structured logging through `tracing`. Log output always goes to stderr so
//! JSON printed on stdout stays machine-readable.

use std::io::IsTerminal;
use std::time::Duration;
use tracing::{Level, info, span};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Check if colored output should be used.
///
/// Returns true only if stderr is a terminal and `NO_COLOR` is not set.
fn use_color() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Default filter directive when `RUST_LOG` is not set
#[must_use]
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "packfill=debug,packfill_optimizer=debug,packfill_store=debug,packfill_config=debug,info"
    } else {
        "warn"
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the `verbose` default. Verbose mode adds
/// targets and span close events with timings.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_color())
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_line_number(false)
                    .with_file(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_color())
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_line_number(false)
                    .with_file(false)
                    .compact(),
            )
            .try_init()?;
    }

    Ok(())
}

/// Span wrapping a single pack calculation
pub fn calculation_span(quantity: u64) -> tracing::Span {
    span!(Level::INFO, "pack_calculation", quantity = quantity)
}

/// Log a completed calculation with its outcome and duration
pub fn log_calculation_complete(
    quantity: u64,
    total_items: u64,
    total_packs: u64,
    elapsed: Duration,
) {
    info!(
        quantity,
        total_items,
        total_packs,
        overage = total_items.saturating_sub(quantity),
        duration_ms = elapsed.as_millis() as u64,
        "Pack calculation completed"
    );
}
