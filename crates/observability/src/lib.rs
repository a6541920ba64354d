//! Tracing and operation logging (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Injectable per-operation logger.
pub mod logging;

pub use logging::{CapturingLogger, LogLevel, LogRecord, OperationLogger, TracingLogger};
