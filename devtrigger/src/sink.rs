//! Diagnostic stream abstraction.
//!
//! The engine reports per-path outcomes through a sink instead of binding
//! to a concrete logging transport; anything that accepts a severity and a
//! message line works. A mock sink is provided for tests.

/// Severity tier of one diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational per-path records (written, absent).
    Debug,
    /// Recoverable conditions (degraded enumeration).
    Warn,
    /// Real per-path failures.
    Error,
}

/// Accepts (severity, message) diagnostic records.
pub trait DiagnosticSink {
    fn emit(&mut self, severity: Severity, message: &str);
}

/// Routes diagnostics to the `tracing` macros.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!("{}", message),
            Severity::Warn => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
        }
    }
}

/// Collects diagnostics in memory for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Records in emission order.
    pub records: Vec<(Severity, String)>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded at the given severity, in order.
    pub fn messages_at(&self, severity: Severity) -> Vec<&str> {
        self.records
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&mut self, severity: Severity, message: &str) {
        self.records.push((severity, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_preserves_order_and_severity() {
        let mut sink = MemorySink::new();
        sink.emit(Severity::Debug, "first");
        sink.emit(Severity::Error, "second");
        sink.emit(Severity::Debug, "third");

        assert_eq!(sink.records.len(), 3);
        assert_eq!(sink.messages_at(Severity::Debug), vec!["first", "third"]);
        assert_eq!(sink.messages_at(Severity::Error), vec!["second"]);
    }
}
