use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chain::{DetailFormattable, Link, Unwrappable};
use crate::format::Printer;

/// Shared, externally owned cause attached to an [`InnerError`]
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// A single field-level failure inside an error document
///
/// Serializes to `{domain, reason, location, locationType, message}`. The
/// optional cause is kept only for diagnostic traces and never leaves the
/// process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerError {
    /// Service or scope that raised the error (`global`, `usage`, ...)
    domain: String,
    /// Machine-readable reason (`invalidParameter`, `required`, ...)
    reason: String,
    /// Where the failure was found (`Authorization`, a parameter name, ...)
    location: String,
    /// Kind of location (`header`, `parameter`, `requestBody`, ...)
    location_type: String,
    /// Human-readable description
    message: String,
    #[serde(skip)]
    cause: Option<Cause>,
    #[serde(skip)]
    caller: Option<&'static Location<'static>>,
}

impl InnerError {
    /// Create an inner error without a cause
    #[track_caller]
    pub fn new(
        domain: impl Into<String>,
        reason: impl Into<String>,
        location: impl Into<String>,
        location_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            reason: reason.into(),
            location: location.into(),
            location_type: location_type.into(),
            message: message.into(),
            cause: None,
            caller: Some(Location::caller()),
        }
    }

    /// Attach the underlying error that led to this one
    #[must_use]
    pub fn with_cause<E>(self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_shared_cause(Arc::new(cause))
    }

    /// Attach an already shared cause
    #[must_use]
    pub fn with_shared_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn location_type(&self) -> &str {
        &self.location_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Source location that constructed this error, if known
    pub const fn caller(&self) -> Option<&'static Location<'static>> {
        self.caller
    }
}

impl fmt::Display for InnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for InnerError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn StdError + 'static))
    }
}

impl Unwrappable for InnerError {
    fn unwrap_one(&self) -> Option<Link<'_>> {
        self.source().map(Link::from_error)
    }
}

impl DetailFormattable for InnerError {
    fn format_details(&self, printer: &mut Printer) {
        printer.print(&self.message);

        if printer.detail() {
            printer.print(format_args!(" [{}.{}]", self.domain, self.reason));
            match (self.location_type.is_empty(), self.location.is_empty()) {
                (_, true) => {}
                (true, false) => printer.print(format_args!(" at {}", self.location)),
                (false, false) => printer.print(format_args!(" at {}:{}", self.location_type, self.location)),
            }
        }

        if printer.locations()
            && let Some(caller) = self.caller
        {
            printer.print(format_args!(" ({caller})"));
        }
    }
}
