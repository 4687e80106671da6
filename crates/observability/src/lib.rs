//! Tracing and logging (shared setup).

/// Initialize process-wide observability.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init(level: &str, environment: &str) {
    tracing::init(level, environment);
}

/// Tracing configuration (filters, output format).
pub mod tracing;
