//! Demonstrates bracketed span logging with correlation across threads.
//!
//! Run with: cargo run --example bracket_demo

use bracketlog::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

struct JobRunner {
    shard: u32,
}

impl Loggable for JobRunner {
    fn describe(&self) -> String {
        format!("JobRunner[shard={}]", self.shard)
    }
}

fn main() {
    // Initialize tracing for demo output
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let tracer = Arc::new(SpanTracer::new());
    let runner = JobRunner { shard: 3 };

    // Fire-and-forget: one open line, nothing to close.
    tracer.start(&runner, "Ping", Some("health probe"), None, Some("main"));

    // Persisted span opened here, closed on a worker thread.
    let started = tracer.start_persisted(
        &runner,
        "Load",
        Some("Load"),
        Some(" items=42"),
        Some("main"),
    );
    let id = started.id;

    let worker = {
        let tracer = tracer.clone();
        thread::Builder::new()
            .name("loader".to_string())
            .spawn(move || {
                thread::sleep(Duration::from_millis(50));
                tracer.end(id, Some(1), None)
            })
            .expect("spawn loader thread")
    };

    let end = worker.join().expect("join loader thread");
    println!("matched={} elapsed_ms={:?}", end.matched, end.elapsed_ms);
    println!("open spans at exit: {}", tracer.open_spans());
}
