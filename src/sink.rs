//! Text sinks for formatted span lines.
//!
//! The engine formats a line, picks a severity channel, and hands both to a
//! [`SpanSink`] together with the span's operation tag; the sink decides transport.
//!
//! - [`TracingSink`] is the default and forwards lines through the `tracing` macros.
//! - [`NullSink`] discards every line, following the Null Object Pattern; correlation
//!   bookkeeping still works, only emission is muted.
//! - [`CaptureSink`] records lines in memory so tests can inspect exactly which
//!   channel a line went through.

use std::sync::Mutex;

/// Severity channel a span line was emitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
}

/// A sink accepting an operation tag and a pre-formatted line on one of two
/// severity channels.
///
/// Emission is synchronous; for a single calling thread, emission order matches
/// call order.
pub trait SpanSink: Send + Sync {
    /// Emit a line on the debug channel.
    fn debug(&self, tag: &str, line: &str);

    /// Emit a line on the info channel.
    fn info(&self, tag: &str, line: &str);
}

/// Default sink forwarding lines through the `tracing` macros.
///
/// The tag travels as the `op` field since `tracing` targets must be compile-time
/// constants.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl SpanSink for TracingSink {
    fn debug(&self, tag: &str, line: &str) {
        tracing::debug!(op = tag, "{}", line);
    }

    fn info(&self, tag: &str, line: &str) {
        tracing::info!(op = tag, "{}", line);
    }
}

/// A sink that silently discards all lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SpanSink for NullSink {
    fn debug(&self, _tag: &str, _line: &str) {
        // Do nothing
    }

    fn info(&self, _tag: &str, _line: &str) {
        // Do nothing
    }
}

/// A line captured by [`CaptureSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine {
    pub severity: Severity,
    pub tag: String,
    pub line: String,
}

/// Thread-safe in-memory sink for asserting on emitted lines in tests.
#[derive(Debug, Default)]
pub struct CaptureSink {
    lines: Mutex<Vec<CapturedLine>>,
}

impl CaptureSink {
    /// Create a new, empty capture sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything captured so far, in emission order.
    pub fn drain(&self) -> Vec<CapturedLine> {
        std::mem::take(&mut *self.lines.lock().unwrap())
    }

    /// Number of captured lines.
    pub fn len(&self) -> usize {
        self.lines.lock().unwrap().len()
    }

    /// Check whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().unwrap().is_empty()
    }

    fn push(&self, severity: Severity, tag: &str, line: &str) {
        let mut lines = self.lines.lock().unwrap();
        lines.push(CapturedLine {
            severity,
            tag: tag.to_string(),
            line: line.to_string(),
        });
    }
}

impl SpanSink for CaptureSink {
    fn debug(&self, tag: &str, line: &str) {
        self.push(Severity::Debug, tag, line);
    }

    fn info(&self, tag: &str, line: &str) {
        self.push(Severity::Info, tag, line);
    }
}
