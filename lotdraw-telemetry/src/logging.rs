//! ## lotdraw-telemetry::logging
//! **Structured logging with tracing**
//!
//! Installs the global `fmt` subscriber and provides the audit helper used for
//! draw and reset records.

use tracing::info_span;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber. `RUST_LOG` overrides `default_level`.
    ///
    /// Logs go to stderr so command output on stdout stays machine readable.
    pub fn init(default_level: &str) {
        // Fails only when a global subscriber is already set (tests, repeat init).
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::NONE)
            .try_init();
    }

    /// Emits one audit record inside an `audit_event` span.
    #[inline]
    pub fn log_event(event_type: &str, metadata: &[(&str, String)]) {
        let span = info_span!("audit_event", event_type = event_type);
        let _guard = span.enter();
        tracing::info!(metadata = ?metadata, "Audit event recorded");
    }
}
