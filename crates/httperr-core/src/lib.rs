//! Structured, serializable HTTP error documents
//!
//! An [`ErrorResponse`] carries a status code and message chosen by an
//! [`ErrorCategory`] plus any number of [`InnerError`]s, each optionally
//! wrapping a cause chain. The JSON form never includes causes; the
//! [`Formatter`] walks every chain in document order to produce a trace.

#![allow(clippy::must_use_candidate)]

pub mod category;
pub mod chain;
pub mod document;
mod error;
pub mod format;
pub mod inner;
mod response;

pub use category::{CategoryEntry, ErrorCategory};
pub use chain::{ChainQueue, DetailFormattable, Link, NestedChain, Node, Pending, Traced, Unwrappable};
pub use document::{ErrorDocument, ErrorResponse};
pub use error::{Error, HttpError, Result};
pub use format::{Formatter, Printer, Trace, render};
pub use inner::{Cause, InnerError};
pub use response::error_json;
