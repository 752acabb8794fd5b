//! Library-wide error types.

use thiserror::Error;

/// Result type alias using `TallyError`.
pub type TallyResult<T> = Result<T, TallyError>;

/// Errors surfaced by decoding and by ledger sequences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TallyError {
    /// The payload did not have the expected structure.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A monetary string could not be parsed.
    #[error("Malformed magnitude: {raw:?}")]
    MalformedMagnitude {
        /// The string as received.
        raw: String,
    },

    /// Another `advance()` is already in flight on the same sequence.
    #[error("Operation already in progress")]
    OperationInProgress,

    /// The transport reported a failure.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportFailure),
}

impl TallyError {
    /// Creates a malformed response error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Creates a malformed magnitude error.
    #[must_use]
    pub fn magnitude(raw: impl Into<String>) -> Self {
        Self::MalformedMagnitude { raw: raw.into() }
    }

    /// Returns a stable code identifying the error kind.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedResponse(_) => "MALFORMED_RESPONSE",
            Self::MalformedMagnitude { .. } => "MALFORMED_MAGNITUDE",
            Self::OperationInProgress => "OPERATION_IN_PROGRESS",
            Self::Transport(failure) => failure.error_code(),
        }
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

/// Classified failure returned by a transport.
///
/// The core passes these through without reinterpretation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// The requested resource does not exist.
    #[error("not found")]
    NotFound,

    /// The caller is authenticated but not allowed to read the resource.
    #[error("not authorised")]
    NotAuthorised,

    /// The request carried no valid credentials.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The service rejected the request arguments.
    #[error("bad request")]
    BadRequest,

    /// The service failed internally.
    #[error("server error")]
    ServerError,

    /// The caller exceeded the service's request rate.
    #[error("rate limited")]
    RateLimited,

    /// The request never produced a response.
    #[error("connection failed: {0}")]
    Connection(String),
}

impl TransportFailure {
    /// Classifies an HTTP status code.
    ///
    /// Returns `None` for success statuses.
    #[must_use]
    pub const fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(Self::NotAuthenticated),
            403 => Some(Self::NotAuthorised),
            404 => Some(Self::NotFound),
            429 => Some(Self::RateLimited),
            400..=499 => Some(Self::BadRequest),
            _ => Some(Self::ServerError),
        }
    }

    /// Returns the canonical HTTP status code for this failure.
    ///
    /// Connection failures have no status and report `0`.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotAuthenticated => 401,
            Self::NotAuthorised => 403,
            Self::NotFound => 404,
            Self::RateLimited => 429,
            Self::ServerError => 500,
            Self::Connection(_) => 0,
        }
    }

    /// Returns the error code for this failure.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::NotAuthorised => "NOT_AUTHORISED",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::BadRequest => "BAD_REQUEST",
            Self::ServerError => "SERVER_ERROR",
            Self::RateLimited => "RATE_LIMITED",
            Self::Connection(_) => "CONNECTION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(200, None)]
    #[case(204, None)]
    #[case(400, Some(TransportFailure::BadRequest))]
    #[case(401, Some(TransportFailure::NotAuthenticated))]
    #[case(403, Some(TransportFailure::NotAuthorised))]
    #[case(404, Some(TransportFailure::NotFound))]
    #[case(422, Some(TransportFailure::BadRequest))]
    #[case(429, Some(TransportFailure::RateLimited))]
    #[case(500, Some(TransportFailure::ServerError))]
    #[case(503, Some(TransportFailure::ServerError))]
    fn test_from_status(#[case] status: u16, #[case] expected: Option<TransportFailure>) {
        assert_eq!(TransportFailure::from_status(status), expected);
    }

    #[test]
    fn test_status_code_round_trips_through_classification() {
        for failure in [
            TransportFailure::NotFound,
            TransportFailure::NotAuthorised,
            TransportFailure::NotAuthenticated,
            TransportFailure::BadRequest,
            TransportFailure::ServerError,
            TransportFailure::RateLimited,
        ] {
            assert_eq!(
                TransportFailure::from_status(failure.status_code()),
                Some(failure)
            );
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            TallyError::malformed("x").error_code(),
            "MALFORMED_RESPONSE"
        );
        assert_eq!(TallyError::magnitude("x").error_code(), "MALFORMED_MAGNITUDE");
        assert_eq!(
            TallyError::OperationInProgress.error_code(),
            "OPERATION_IN_PROGRESS"
        );
        assert_eq!(
            TallyError::from(TransportFailure::RateLimited).error_code(),
            "RATE_LIMITED"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            TallyError::malformed("missing key `depth`").to_string(),
            "Malformed response: missing key `depth`"
        );
        assert_eq!(
            TallyError::magnitude("12a").to_string(),
            "Malformed magnitude: \"12a\""
        );
        assert_eq!(
            TallyError::Transport(TransportFailure::NotFound).to_string(),
            "Transport failure: not found"
        );
    }

    #[test]
    fn test_json_errors_are_malformed_responses() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            TallyError::from(err),
            TallyError::MalformedResponse(_)
        ));
    }
}
