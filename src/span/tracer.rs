//! The span begin/end protocol.
//!
//! [`SpanTracer`] composes the correlation store, the line formatter, and a text
//! sink into the public start/end surface. Spans are matched by correlation id,
//! never by stack discipline: any number of spans may be open at once, they may
//! close in any order relative to their opening order, and a span may close on a
//! different thread than the one that opened it. That property is what makes the
//! mechanism usable across asynchronous boundaries.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use bracketlog::prelude::*;
//!
//! let tracer = SpanTracer::new();
//! let started = tracer.start_persisted("importer", "Load", Some("Load"), None, None);
//! // ... later, possibly on another thread ...
//! let end = tracer.end(started.id, Some(1), None);
//! assert!(end.matched);
//! ```

use super::format;
use super::store::{CorrelationStore, SpanRecord};
use crate::error::{BracketlogError, Result};
use crate::loggable::Loggable;
use crate::sink::{SpanSink, TracingSink};
use crate::stopwatch::{Stopwatch, WallclockStopwatch};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Configuration for a single span opening.
///
/// The preset constructors cover the common flag combinations; the `with_*`
/// methods fill in the textual fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanOptions {
    /// Free-form descriptive text carried into both lines.
    pub caption: Option<String>,
    /// Extra parameter text appended to the open line.
    pub params: Option<String>,
    /// Where the span was opened from; rendered as `???` when absent.
    pub origin: Option<String>,
    /// Emit through the debug channel instead of info.
    pub debug_mode: bool,
    /// Register the span in the correlation store for a later close by id.
    pub persist: bool,
    /// Start a stopwatch at open time; only honored for persisted spans.
    pub measure_timing: bool,
}

impl SpanOptions {
    /// Emit the open line and nothing else; the span cannot be closed later.
    pub fn fire_and_forget() -> Self {
        Self::default()
    }

    /// Register the span for a later close by id and measure elapsed time.
    pub fn persisted_with_timing() -> Self {
        Self {
            persist: true,
            measure_timing: true,
            ..Self::default()
        }
    }

    /// Set the caption text.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the parameter text.
    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = Some(params.into());
        self
    }

    /// Set the origin tag.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Switch emission to the debug channel.
    pub fn debug(mut self) -> Self {
        self.debug_mode = true;
        self
    }
}

/// Outcome of a span opening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanStart {
    /// Correlation id to close the span with; nil when the span was not
    /// persisted.
    pub id: Uuid,
    /// The emitted open line.
    pub line: String,
}

/// Outcome of a span close.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanEnd {
    /// Whether an open span was found and consumed for the given id.
    pub matched: bool,
    /// The emitted close line; empty when unmatched.
    pub line: String,
    /// Milliseconds between open and close, when timing was requested at open.
    pub elapsed_ms: Option<i64>,
}

impl SpanEnd {
    fn unmatched() -> Self {
        Self {
            matched: false,
            line: String::new(),
            elapsed_ms: None,
        }
    }
}

/// The public begin/end surface of the engine.
///
/// A tracer owns one correlation store and one sink; clones of the `Arc`s inside
/// are cheap, so a single tracer is meant to be shared across every thread that
/// opens or closes spans. The stopwatch type is a generic parameter with
/// [`WallclockStopwatch`] as the default, so any concrete timer satisfying
/// [`Stopwatch`] may be plugged in.
pub struct SpanTracer<W: Stopwatch = WallclockStopwatch> {
    store: Arc<CorrelationStore<W>>,
    sink: Arc<dyn SpanSink>,
}

impl SpanTracer<WallclockStopwatch> {
    /// Tracer over the wallclock stopwatch, emitting through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }
}

impl<W: Stopwatch> SpanTracer<W> {
    /// Tracer emitting through the given sink.
    pub fn with_sink(sink: Arc<dyn SpanSink>) -> Self {
        Self {
            store: Arc::new(CorrelationStore::new()),
            sink,
        }
    }

    /// Open a span with the full flag set.
    ///
    /// Builds the open line from the caller's [`Loggable::describe`], emits it
    /// on the channel selected by `opts.debug_mode`, and, only when
    /// `opts.persist` is set, registers the span and returns its fresh
    /// correlation id. Unpersisted spans return a nil id and exist only as
    /// their emitted line.
    ///
    /// # Arguments
    ///
    /// * `source` - The component issuing the span
    /// * `name` - Operation name, used as the sink tag
    /// * `opts` - Flags and textual fields for this opening
    pub fn start_with(&self, source: &dyn Loggable, name: &str, opts: SpanOptions) -> SpanStart {
        let caption = opts.caption.as_deref().unwrap_or("");
        let params = opts.params.as_deref().unwrap_or("");
        let (thread_label, thread_id) = format::thread_identity();
        let line = format::format_open(
            &thread_label,
            &thread_id,
            caption,
            &source.describe(),
            params,
            opts.origin.as_deref(),
        );

        if opts.debug_mode {
            self.sink.debug(name, &line);
        } else {
            self.sink.info(name, &line);
        }

        if !opts.persist {
            return SpanStart {
                id: Uuid::nil(),
                line,
            };
        }

        let stopwatch = if opts.measure_timing {
            let mut watch = W::default();
            watch.start();
            Some(watch)
        } else {
            None
        };

        let id = self.store.register(SpanRecord {
            name: name.to_string(),
            caption: caption.to_string(),
            debug_mode: opts.debug_mode,
            stopwatch,
        });

        SpanStart { id, line }
    }

    /// Fire-and-forget opening on the info channel.
    pub fn start(
        &self,
        source: &dyn Loggable,
        name: &str,
        caption: Option<&str>,
        params: Option<&str>,
        origin: Option<&str>,
    ) -> SpanStart {
        self.start_with(source, name, preset(caption, params, origin, false, false))
    }

    /// Fire-and-forget opening on the debug channel.
    pub fn start_debug(
        &self,
        source: &dyn Loggable,
        name: &str,
        caption: Option<&str>,
        params: Option<&str>,
        origin: Option<&str>,
    ) -> SpanStart {
        self.start_with(source, name, preset(caption, params, origin, true, false))
    }

    /// Persisted-with-timing opening on the info channel.
    pub fn start_persisted(
        &self,
        source: &dyn Loggable,
        name: &str,
        caption: Option<&str>,
        params: Option<&str>,
        origin: Option<&str>,
    ) -> SpanStart {
        self.start_with(source, name, preset(caption, params, origin, false, true))
    }

    /// Persisted-with-timing opening on the debug channel.
    pub fn start_persisted_debug(
        &self,
        source: &dyn Loggable,
        name: &str,
        caption: Option<&str>,
        params: Option<&str>,
        origin: Option<&str>,
    ) -> SpanStart {
        self.start_with(source, name, preset(caption, params, origin, true, true))
    }

    /// Close a span by correlation id.
    ///
    /// A nil id reports unmatched immediately, the contract for "the caller
    /// never asked to persist". A stale or already-consumed id also reports
    /// unmatched; `end` never panics and is safe against double-close. On a
    /// match, the close line is built from the record's saved name and caption
    /// and emitted on the channel the span was *opened* with: severity is
    /// replayed from the record, not taken from the calling context.
    ///
    /// # Arguments
    ///
    /// * `id` - Correlation id returned by a persisted opening
    /// * `result` - Numeric outcome; rendered as `NaN` when absent
    /// * `params` - Extra parameter text for the close line
    pub fn end(&self, id: Uuid, result: Option<i64>, params: Option<&str>) -> SpanEnd {
        let record = match self.store.take(id) {
            Some(record) => record,
            None => return SpanEnd::unmatched(),
        };

        let elapsed_ms = record.stopwatch.as_ref().map(|watch| watch.elapsed_ms());
        let (thread_label, thread_id) = format::thread_identity();
        let line = format::format_close(
            &thread_label,
            &thread_id,
            &record.caption,
            params.unwrap_or(""),
            elapsed_ms,
            result,
        );

        let tag = format::close_tag(&record.name);
        if record.debug_mode {
            self.sink.debug(&tag, &line);
        } else {
            self.sink.info(&tag, &line);
        }

        SpanEnd {
            matched: true,
            line,
            elapsed_ms,
        }
    }

    /// Close a span, treating an unmatched close as an error.
    ///
    /// # Errors
    ///
    /// Returns [`BracketlogError::UnmatchedSpan`] when no open span exists for
    /// `id`.
    pub fn end_checked(&self, id: Uuid, result: Option<i64>, params: Option<&str>) -> Result<SpanEnd> {
        let end = self.end(id, result, params);
        if end.matched {
            Ok(end)
        } else {
            Err(BracketlogError::UnmatchedSpan(id))
        }
    }

    /// Number of spans currently open.
    pub fn open_spans(&self) -> usize {
        self.store.len()
    }

    /// Snapshot of every still-open span as `(id, name)` pairs.
    pub fn unmatched_spans(&self) -> Vec<(Uuid, String)> {
        self.store.unmatched_spans()
    }
}

impl Default for SpanTracer<WallclockStopwatch> {
    fn default() -> Self {
        Self::new()
    }
}

fn preset(
    caption: Option<&str>,
    params: Option<&str>,
    origin: Option<&str>,
    debug_mode: bool,
    persist: bool,
) -> SpanOptions {
    SpanOptions {
        caption: caption.map(str::to_string),
        params: params.map(str::to_string),
        origin: origin.map(str::to_string),
        debug_mode,
        persist,
        measure_timing: persist,
    }
}
