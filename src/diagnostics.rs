//! Diagnostics
//!
//! Collects the warnings and errors a translation run accumulates.
//! Each engine instance owns its own sink, so concurrent independent runs
//! never share diagnostic state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Severity
// =============================================================================

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// A single diagnostic message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Originating channel, e.g. "simbridge.reverse"
    pub channel: String,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.channel, self.severity, self.text)
    }
}

// =============================================================================
// DiagnosticsSink
// =============================================================================

/// Severity- and channel-filtered collector of diagnostics.
///
/// Append-only during a run; written by the single calling thread; safe for
/// one reader after the run completes. `reset` is invoked at the start of
/// every translate so a sink never mixes runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsSink {
    entries: Vec<Diagnostic>,
    /// Minimum severity retained
    min_severity: Severity,
    /// If set, only entries whose channel starts with this prefix are kept
    channel_prefix: Option<String>,
}

impl Default for DiagnosticsSink {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            min_severity: Severity::Warning,
            channel_prefix: None,
        }
    }
}

impl DiagnosticsSink {
    /// Sink retaining warning-and-above from every channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum retained severity
    pub fn with_min_severity(mut self, min: Severity) -> Self {
        self.min_severity = min;
        self
    }

    /// Keep only entries from channels starting with `prefix`, isolating one
    /// engine's messages from co-resident subsystems
    pub fn with_channel_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.channel_prefix = Some(prefix.into());
        self
    }

    /// Discard all entries; called at the start of every run
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Append a diagnostic, subject to the severity and channel filters
    pub fn push(&mut self, severity: Severity, channel: &str, text: impl Into<String>) {
        if severity < self.min_severity {
            return;
        }
        if let Some(prefix) = &self.channel_prefix {
            if !channel.starts_with(prefix.as_str()) {
                return;
            }
        }
        self.entries.push(Diagnostic {
            severity,
            channel: channel.to_string(),
            timestamp: Utc::now(),
            text: text.into(),
        });
    }

    pub fn info(&mut self, channel: &str, text: impl Into<String>) {
        self.push(Severity::Info, channel, text);
    }

    pub fn warning(&mut self, channel: &str, text: impl Into<String>) {
        self.push(Severity::Warning, channel, text);
    }

    pub fn error(&mut self, channel: &str, text: impl Into<String>) {
        self.push(Severity::Error, channel, text);
    }

    /// Warning entries only, in append order. The snapshot is cloned, so it
    /// stays valid and restartable however the sink is used afterwards.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .cloned()
            .collect()
    }

    /// Error-and-above entries, in append order
    pub fn errors(&self) -> Vec<Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity >= Severity::Error)
            .cloned()
            .collect()
    }

    /// All retained entries
    pub fn all(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity >= Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for DiagnosticsSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        write!(
            f,
            "{} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(Severity::Trace < Severity::Debug);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_min_severity_filter() {
        let mut sink = DiagnosticsSink::new();
        sink.info("simbridge.reverse", "dropped");
        sink.warning("simbridge.reverse", "kept");
        sink.error("simbridge.reverse", "kept too");
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.warning_count(), 1);
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn test_channel_prefix_filter() {
        let mut sink = DiagnosticsSink::new().with_channel_prefix("simbridge.reverse");
        sink.warning("simbridge.reverse.rules", "kept");
        sink.warning("simbridge.forward", "dropped");
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.all()[0].channel, "simbridge.reverse.rules");
    }

    #[test]
    fn test_snapshots_preserve_order() {
        let mut sink = DiagnosticsSink::new().with_min_severity(Severity::Trace);
        sink.warning("c", "first");
        sink.error("c", "second");
        sink.warning("c", "third");
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].text, "first");
        assert_eq!(warnings[1].text, "third");
        // The snapshot is independent of later writes
        sink.warning("c", "fourth");
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_reset_clears_entries() {
        let mut sink = DiagnosticsSink::new();
        sink.error("c", "stale");
        sink.reset();
        assert!(sink.is_empty());
    }
}
