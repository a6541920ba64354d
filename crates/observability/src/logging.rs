//! Operation logger passed explicitly into services.
//!
//! Services log through `Arc<dyn OperationLogger>` instead of calling the `tracing`
//! macros directly, so tests can swap in a [`CapturingLogger`] and assert on the
//! exact lines an operation produced.

use std::sync::Mutex;

/// Fire-and-forget sink for operation log lines.
pub trait OperationLogger: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to the process-wide `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl OperationLogger for TracingLogger {
    fn info(&self, message: &str) {
        ::tracing::info!(target: "catalog::operations", "{message}");
    }

    fn error(&self, message: &str) {
        ::tracing::error!(target: "catalog::operations", "{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// In-memory logger for tests.
#[derive(Debug, Default)]
pub struct CapturingLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl CapturingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, oldest first.
    pub fn records(&self) -> Vec<LogRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .map(|r| r.message)
            .collect()
    }

    fn push(&self, level: LogLevel, message: &str) {
        let record = LogRecord {
            level,
            message: message.to_string(),
        };
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }
}

impl OperationLogger for CapturingLogger {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capturing_logger_keeps_order_and_level() {
        let logger = CapturingLogger::new();
        logger.info("first");
        logger.error("second");
        logger.info("third");

        let records = logger.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], LogRecord { level: LogLevel::Error, message: "second".into() });
        assert_eq!(logger.messages(LogLevel::Info), vec!["first", "third"]);
    }

    #[test]
    fn tracing_logger_is_usable_without_a_subscriber() {
        let logger: &dyn OperationLogger = &TracingLogger;
        logger.info("no subscriber installed");
        logger.error("still fine");
    }
}
