pub mod error;
pub mod global;
pub mod loggable;
pub mod sink;
pub mod span;
pub mod stopwatch;

pub use error::{BracketlogError, Result};
pub use loggable::Loggable;
pub use span::{SpanEnd, SpanOptions, SpanStart, SpanTracer};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{BracketlogError, Result};
    pub use crate::global::{global, install_global};
    pub use crate::loggable::Loggable;
    pub use crate::sink::{CaptureSink, NullSink, Severity, SpanSink, TracingSink};
    pub use crate::span::{SpanEnd, SpanOptions, SpanStart, SpanTracer};
    pub use crate::stopwatch::{Stopwatch, WallclockStopwatch};
}
