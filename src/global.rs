//! Process-wide default tracer.
//!
//! A [`SpanTracer`] is normally constructed once per logging-capable scope and
//! passed around as a shared handle. For call sites that cannot thread a tracer
//! through, this module offers a single installation point for one process-wide
//! default.

use crate::error::{BracketlogError, Result};
use crate::span::SpanTracer;
use std::sync::OnceLock;

static GLOBAL_TRACER: OnceLock<SpanTracer> = OnceLock::new();

/// Install `tracer` as the process-wide default.
///
/// # Errors
///
/// Returns [`BracketlogError::GlobalAlreadyInstalled`] if a tracer has already
/// been installed.
pub fn install_global(tracer: SpanTracer) -> Result<()> {
    GLOBAL_TRACER
        .set(tracer)
        .map_err(|_| BracketlogError::GlobalAlreadyInstalled)
}

/// The installed process-wide tracer, if any.
pub fn global() -> Option<&'static SpanTracer> {
    GLOBAL_TRACER.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns the whole global lifecycle; OnceLock state is shared
    // across the test process.
    #[test]
    fn test_global_install_lifecycle() {
        assert!(global().is_none());

        install_global(SpanTracer::new()).unwrap();
        assert!(global().is_some());

        let err = install_global(SpanTracer::new()).unwrap_err();
        assert!(matches!(err, BracketlogError::GlobalAlreadyInstalled));

        let tracer = global().unwrap();
        let started = tracer.start_persisted("global", "Load", None, None, None);
        assert!(tracer.end(started.id, None, None).matched);
    }
}
