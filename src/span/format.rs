//! Pure builders for the bracketed open and close lines.
//!
//! Formatting never touches a lock or a sink; callers decide severity and
//! transport. The open marker is a run of `>` characters, the close marker a run
//! of `<`, so the two directions are distinguishable when scanning logs, and the
//! close tag prefixes the operation name with `~` to pair it with its opening.

use std::thread;

pub(crate) const OPEN_MARKER: &str = ">>>>>>>> _TR_:";
pub(crate) const CLOSE_MARKER: &str = "<<<<<<<< _TR_:";

/// Token rendered for an absent elapsed time or result value.
const NOT_AVAILABLE: &str = "NaN";

/// Placeholder for a span opened without an origin tag.
const UNKNOWN_ORIGIN: &str = "???";

/// Printable identity of the calling thread as `(label, id token)`.
///
/// The label is the thread's name where one was set; the id token is the numeric
/// part of the standard thread id.
pub fn thread_identity() -> (String, String) {
    let current = thread::current();
    let label = current.name().unwrap_or("<unnamed>").to_string();
    (label, thread_id_token(current.id()))
}

fn thread_id_token(id: thread::ThreadId) -> String {
    // ThreadId exposes no numeric accessor; reduce its "ThreadId(12)" debug
    // form to the digits.
    let raw = format!("{:?}", id);
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        raw
    } else {
        digits
    }
}

/// Build the opening line for a span.
pub fn format_open(
    thread_label: &str,
    thread_id: &str,
    caption: &str,
    description: &str,
    params: &str,
    origin: Option<&str>,
) -> String {
    format!(
        "{}{}({})| {}| {}{}[from {}]",
        OPEN_MARKER,
        thread_label,
        thread_id,
        caption,
        description,
        params,
        origin.unwrap_or(UNKNOWN_ORIGIN)
    )
}

/// Build the closing line for a span.
///
/// Absent elapsed time and absent result each render as `NaN`.
pub fn format_close(
    thread_label: &str,
    thread_id: &str,
    caption: &str,
    params: &str,
    elapsed_ms: Option<i64>,
    result: Option<i64>,
) -> String {
    format!(
        "{}{}({})| {}| {} | TIME=__{}__ | RESULT=__{}__",
        CLOSE_MARKER,
        thread_label,
        thread_id,
        caption,
        params,
        value_token(elapsed_ms),
        value_token(result)
    )
}

/// Tag for a closing line: the opening name prefixed with `~`.
pub fn close_tag(name: &str) -> String {
    format!("~{}", name)
}

fn value_token(value: Option<i64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_open_line_shape() {
        let line = format_open(
            "main",
            "1",
            "Load",
            "Importer[batch=4]",
            " items=42",
            Some("scheduler"),
        );
        assert_eq!(
            line,
            ">>>>>>>> _TR_:main(1)| Load| Importer[batch=4] items=42[from scheduler]"
        );
    }

    #[test]
    fn test_open_line_defaults_origin() {
        let line = format_open("main", "1", "", "", "", None);
        assert!(line.ends_with("[from ???]"));
    }

    #[test]
    fn test_close_line_shape() {
        let line = format_close("worker", "5", "Load", " rows=10", Some(52), Some(1));
        assert_eq!(
            line,
            "<<<<<<<< _TR_:worker(5)| Load|  rows=10 | TIME=__52__ | RESULT=__1__"
        );
    }

    #[test]
    fn test_close_line_renders_nan_tokens() {
        let line = format_close("worker", "5", "Load", "", None, None);
        assert!(line.contains("TIME=__NaN__"));
        assert!(line.contains("RESULT=__NaN__"));
    }

    #[test]
    fn test_markers_are_distinct_runs() {
        let open = Regex::new(r"^>{8} _TR_:").unwrap();
        let close = Regex::new(r"^<{8} _TR_:").unwrap();
        let open_line = format_open("main", "1", "", "", "", None);
        let close_line = format_close("main", "1", "", "", None, None);
        assert!(open.is_match(&open_line));
        assert!(close.is_match(&close_line));
        assert!(!close.is_match(&open_line));
    }

    #[test]
    fn test_close_tag_prefixes_name() {
        assert_eq!(close_tag("Load"), "~Load");
    }

    #[test]
    fn test_thread_identity_is_printable() {
        let (label, id) = thread_identity();
        assert!(!label.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }
}
