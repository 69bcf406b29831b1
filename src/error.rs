//! Error types and result aliases for the bracketlog library.
//!
//! This module defines the core error type [`BracketlogError`] and the [`Result`] type
//! alias used by the fallible parts of the library. The span protocol itself never
//! fails (an unmatched close is reported through the `matched` flag of
//! [`SpanEnd`](crate::span::SpanEnd)), so the error surface is limited to global
//! installation and the opt-in strict close.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BracketlogError {
    #[error("global span tracer already installed")]
    GlobalAlreadyInstalled,

    #[error("no open span found for correlation id {0}")]
    UnmatchedSpan(Uuid),
}

pub type Result<T> = std::result::Result<T, BracketlogError>;
