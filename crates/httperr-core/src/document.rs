use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::chain::{ChainQueue, DetailFormattable, Link, Unwrappable};
use crate::format::Printer;
use crate::{ErrorCategory, InnerError, Result};

/// Structured error body: status code, message and inner errors
///
/// The code and message come from the category registry and are fixed once
/// built; inner errors keep the order they were supplied in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDocument {
    errors: Vec<InnerError>,
    code: u16,
    message: String,
    #[serde(skip)]
    caller: Option<&'static Location<'static>>,
}

impl ErrorDocument {
    /// Build a document for `category` holding `errors`
    #[track_caller]
    pub fn new(category: ErrorCategory, errors: impl IntoIterator<Item = InnerError>) -> Self {
        let entry = category.entry();

        Self {
            errors: errors.into_iter().collect(),
            code: entry.status.as_u16(),
            message: entry.message.to_owned(),
            caller: Some(Location::caller()),
        }
    }

    /// Append one more inner error
    #[must_use]
    pub fn with_error(mut self, error: InnerError) -> Self {
        self.errors.push(error);
        self
    }

    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Status as an HTTP status code, 500 if the code is not a valid status
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &[InnerError] {
        &self.errors
    }

    pub const fn caller(&self) -> Option<&'static Location<'static>> {
        self.caller
    }

    /// Serializable `{errors, code, message}` form; causes are left out
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be encoded
    pub fn to_structured(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Virtual chain spanning every inner error in order
    ///
    /// `None` without inner errors, the inner error itself when there is only
    /// one, and a [`ChainQueue`] over all of them otherwise.
    pub fn unwrap_chain(&self) -> Option<Link<'_>> {
        match self.errors.as_slice() {
            [] => None,
            [only] => Some(Link::from(only)),
            [first, rest @ ..] => Some(Link::Queue(ChainQueue::new(first, rest))),
        }
    }
}

impl fmt::Display for ErrorDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ErrorDocument {}

impl Unwrappable for ErrorDocument {
    fn unwrap_one(&self) -> Option<Link<'_>> {
        self.unwrap_chain()
    }
}

impl DetailFormattable for ErrorDocument {
    fn format_details(&self, printer: &mut Printer) {
        printer.print(&self.message);

        if printer.detail() {
            printer.print(format_args!(" ({})", self.code));
        }

        if printer.locations()
            && let Some(caller) = self.caller
        {
            printer.print(format_args!(" ({caller})"));
        }
    }
}

/// Top-level error response, serialized as `{"error": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    error: ErrorDocument,
}

impl ErrorResponse {
    /// Build the response for `category`; no errors serialize as `[]`
    #[track_caller]
    pub fn new(category: ErrorCategory, errors: impl IntoIterator<Item = InnerError>) -> Self {
        Self {
            error: ErrorDocument::new(category, errors),
        }
    }

    /// Append one more inner error
    #[must_use]
    pub fn with_error(self, error: InnerError) -> Self {
        Self {
            error: self.error.with_error(error),
        }
    }

    pub const fn document(&self) -> &ErrorDocument {
        &self.error
    }

    pub fn into_document(self) -> ErrorDocument {
        self.error
    }

    pub const fn code(&self) -> u16 {
        self.error.code
    }

    pub fn status(&self) -> StatusCode {
        self.error.status()
    }

    /// Full wire shape as a JSON value
    ///
    /// # Errors
    ///
    /// Returns an error if the response cannot be encoded
    pub fn to_structured(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Compact JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the response cannot be encoded
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<ErrorDocument> for ErrorResponse {
    fn from(error: ErrorDocument) -> Self {
        Self { error }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HTTP Status {}] {}", self.error.code, self.error.message)
    }
}

impl StdError for ErrorResponse {}

impl Unwrappable for ErrorResponse {
    fn unwrap_one(&self) -> Option<Link<'_>> {
        self.error.unwrap_chain()
    }
}

impl DetailFormattable for ErrorResponse {
    fn format_details(&self, printer: &mut Printer) {
        printer.print(self);

        if printer.locations()
            && let Some(caller) = self.error.caller
        {
            printer.print(format_args!(" ({caller})"));
        }
    }
}
