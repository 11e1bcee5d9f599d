use http::StatusCode;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Symbolic error category selecting a status code and default message
///
/// Based on the Google Cloud JSON API status table. The string form is the
/// camelCase reason (e.g. `invalidArgument`) and parses case-insensitively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCategory {
    // 400
    BadRequest,
    InvalidAltValue,
    InvalidArgument,
    InvalidParameter,
    ParseError,
    Required,
    TurnedDown,

    // 401
    /// Credentials were expected but missing or unreadable
    AuthenticationError,
    /// Credentials were present but rejected
    NotAuthenticated,
    /// Identified caller lacks permission for the operation
    NotAuthorized,

    // 403
    AccountDisabled,
    CountryBlocked,
    Forbidden,
    InsufficientPermissions,
    SslRequired,

    // 404
    NotFound,

    // 405
    MethodNotAllowed,

    // 409
    Conflict,

    // 410
    Gone,

    // 411
    LengthRequired,

    // 412
    ConditionNotMet,

    // 413
    PayloadTooLarge,

    // 416
    RequestedRangeNotSatisfiable,

    // 429
    RateLimitExceeded,
    UserRateLimitExceeded,

    // 500
    InternalServerError,

    // 502
    BadGateway,

    // 503
    ServiceUnavailable,
}

/// Registry entry for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEntry {
    /// HTTP status reported for the category
    pub status: StatusCode,
    /// Default human-readable message
    pub message: &'static str,
}

impl ErrorCategory {
    /// Look up the fixed status code and message for this category
    pub const fn entry(self) -> CategoryEntry {
        let (status, message) = match self {
            Self::BadRequest => (StatusCode::BAD_REQUEST, "Bad request"),
            Self::InvalidAltValue => (StatusCode::BAD_REQUEST, "Invalid alt value"),
            Self::InvalidArgument => (StatusCode::BAD_REQUEST, "Invalid argument"),
            Self::InvalidParameter => (StatusCode::BAD_REQUEST, "Invalid parameter"),
            Self::ParseError => (StatusCode::BAD_REQUEST, "Failed to parse"),
            Self::Required => (
                StatusCode::BAD_REQUEST,
                "Required parameter or request body is missing",
            ),
            Self::TurnedDown => (StatusCode::BAD_REQUEST, "No longer available endpoint"),
            Self::AuthenticationError => (StatusCode::UNAUTHORIZED, "Authentication required"),
            Self::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Authentication failed"),
            Self::NotAuthorized => (StatusCode::UNAUTHORIZED, "Authorization failed"),
            Self::AccountDisabled => (StatusCode::FORBIDDEN, "Account has been disabled"),
            Self::CountryBlocked => (StatusCode::FORBIDDEN, "Restricted by law with your country"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Not allowed endpoint"),
            Self::InsufficientPermissions => (StatusCode::FORBIDDEN, "Insufficient permissions"),
            Self::SslRequired => (StatusCode::FORBIDDEN, "SSL is required"),
            Self::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            Self::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Not allowed method"),
            Self::Conflict => (StatusCode::CONFLICT, "Conflict"),
            Self::Gone => (StatusCode::GONE, "Resources or session has gone"),
            Self::LengthRequired => (StatusCode::LENGTH_REQUIRED, "Content-Length header is required"),
            Self::ConditionNotMet => (StatusCode::PRECONDITION_FAILED, "Pre-condition did not hold"),
            Self::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "Too large payload"),
            Self::RequestedRangeNotSatisfiable => (
                StatusCode::RANGE_NOT_SATISFIABLE,
                "Requested range cannot be satisfied",
            ),
            Self::RateLimitExceeded => (StatusCode::TOO_MANY_REQUESTS, "Rate quota was exceeded"),
            Self::UserRateLimitExceeded => (StatusCode::TOO_MANY_REQUESTS, "Per-user rate quota was exceeded"),
            Self::InternalServerError => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            Self::BadGateway => (StatusCode::BAD_GATEWAY, "Bad gateway"),
            Self::ServiceUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "Temporarily service unavailable"),
        };

        CategoryEntry { status, message }
    }

    /// HTTP status for this category
    pub const fn status(self) -> StatusCode {
        self.entry().status
    }

    /// Default message for this category
    pub const fn message(self) -> &'static str {
        self.entry().message
    }

    /// The camelCase reason string, e.g. `rateLimitExceeded`
    pub fn reason(self) -> &'static str {
        self.into()
    }
}
