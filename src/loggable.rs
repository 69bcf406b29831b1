//! The Loggable capability.
//!
//! Any component that wants its spans to carry a self-description implements
//! [`Loggable`]. This is the only thing the span protocol requires from a calling
//! component: a short, synchronous, side-effect-free description of the instance
//! issuing the span, called once per span opening.

/// Capability to supply a short self-description for span lines.
pub trait Loggable {
    /// Describe the instance issuing the span, e.g. an identity or state summary.
    fn describe(&self) -> String;
}

impl Loggable for str {
    fn describe(&self) -> String {
        self.to_string()
    }
}

impl Loggable for String {
    fn describe(&self) -> String {
        self.clone()
    }
}
