//! Tracing and logging (shared setup for both binaries).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, output format).
pub mod tracing;

/// HTTP request logging middleware.
pub mod http;

pub use self::http::log_requests;
pub use self::tracing::LogFormat;
