//! Call-span bracket logging with correlation.
//!
//! This subsystem turns a logical operation into a matched pair of bracketed
//! trace lines: an open line emitted when the operation starts and a close line
//! emitted when it ends, linked by a randomly generated correlation id so the
//! two halves can be reported from different threads.
//!
//! # Architecture
//!
//! - **[`format`]**: pure builders for the open and close lines
//! - **[`store`]**: thread-safe mapping from correlation id to in-flight span
//!   metadata, the locus of all concurrency concerns
//! - **[`tracer`]**: the public begin/end protocol composing store, formatter,
//!   and sink
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use bracketlog::prelude::*;
//!
//! let tracer = SpanTracer::new();
//! let started = tracer.start_persisted("worker", "Load", Some("Load"), None, None);
//! let end = tracer.end(started.id, Some(1), None);
//! assert!(end.matched);
//! ```

pub mod format;
pub mod store;
pub mod tracer;

// Re-export main types
pub use store::{CorrelationStore, SpanRecord};
pub use tracer::{SpanEnd, SpanOptions, SpanStart, SpanTracer};
