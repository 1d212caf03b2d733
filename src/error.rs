use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoStaticStr;
#[cfg(feature = "server")]
use utoipa::ToSchema;

/// Body returned for every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct ErrorResponse {
    pub detail: String,
}

/// Why a completion call failed.
///
/// Every variant surfaces to clients the same way (HTTP 500), but they are
/// kept apart so logs and callers of the library can tell them apart.
#[derive(Debug, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum UpstreamError {
    /// The request never produced an HTTP response (DNS, connect, TLS, body read).
    Transport(reqwest::Error),
    /// The provider rejected the credential (401/403).
    Authentication { status: u16, message: String },
    /// Any other non-success status from the provider.
    Provider { status: u16, message: String },
    /// A success status whose body did not carry a usable first choice.
    MalformedResponse(String),
}

impl UpstreamError {
    /// Short machine-readable label, e.g. `"authentication"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Classify a non-success HTTP status returned by the provider.
    #[must_use]
    pub fn from_status(
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        match status {
            401 | 403 => UpstreamError::Authentication { status, message },
            _ => UpstreamError::Provider { status, message },
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        UpstreamError::MalformedResponse(msg.into())
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            UpstreamError::Transport(err) => write!(f, "Upstream request failed: {err}"),
            UpstreamError::Authentication { status, message } => {
                write!(f, "Upstream authentication failed ({status}): {message}")
            }
            UpstreamError::Provider { status, message } => write!(f, "Upstream provider error ({status}): {message}"),
            UpstreamError::MalformedResponse(msg) => write!(f, "Malformed upstream response: {msg}"),
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err)
    }
}

#[cfg(feature = "server")]
pub use server_error::ApiError;

#[cfg(feature = "server")]
mod server_error {
    use super::{ErrorResponse, UpstreamError};
    use actix_web::http::StatusCode;
    use actix_web::{HttpResponse, ResponseError};
    use std::fmt;

    /// Errors produced at the HTTP boundary.
    #[derive(Debug)]
    pub enum ApiError {
        /// Forwarding failed for any reason; always a 500.
        Upstream(UpstreamError),
        /// The request body did not match the expected schema.
        UnprocessableEntity(String),
        /// The request body exceeded the configured size limit.
        PayloadTooLarge(String),
    }

    impl fmt::Display for ApiError {
        fn fmt(
            &self,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            match self {
                ApiError::Upstream(err) => write!(f, "{err}"),
                ApiError::UnprocessableEntity(msg) | ApiError::PayloadTooLarge(msg) => write!(f, "{msg}"),
            }
        }
    }

    impl ResponseError for ApiError {
        fn status_code(&self) -> StatusCode {
            match self {
                ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            }
        }

        fn error_response(&self) -> HttpResponse {
            HttpResponse::build(self.status_code()).json(ErrorResponse {
                detail: self.to_string(),
            })
        }
    }

    impl From<UpstreamError> for ApiError {
        fn from(err: UpstreamError) -> Self {
            ApiError::Upstream(err)
        }
    }

    impl ApiError {
        pub fn unprocessable_entity(msg: impl Into<String>) -> Self {
            ApiError::UnprocessableEntity(msg.into())
        }

        pub fn payload_too_large(msg: impl Into<String>) -> Self {
            ApiError::PayloadTooLarge(msg.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(UpstreamError::from_status(401, "bad key").kind(), "authentication");
        assert_eq!(UpstreamError::from_status(403, "forbidden").kind(), "authentication");
        assert_eq!(UpstreamError::from_status(429, "slow down").kind(), "provider");
        assert_eq!(UpstreamError::from_status(500, "boom").kind(), "provider");
        assert_eq!(UpstreamError::malformed("no choices").kind(), "malformed_response");
    }

    #[test]
    fn test_display_is_never_empty() {
        let errors = [
            UpstreamError::from_status(401, ""),
            UpstreamError::from_status(502, ""),
            UpstreamError::malformed(""),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_display_carries_provider_message() {
        let err = UpstreamError::from_status(401, "Incorrect API key provided");
        assert_eq!(
            err.to_string(),
            "Upstream authentication failed (401): Incorrect API key provided"
        );
    }

    #[cfg(feature = "server")]
    #[test]
    fn test_api_error_status_codes() {
        use actix_web::ResponseError;
        use actix_web::http::StatusCode;

        let upstream = ApiError::from(UpstreamError::from_status(401, "nope"));
        assert_eq!(upstream.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let invalid = ApiError::unprocessable_entity("missing field `messages`");
        assert_eq!(invalid.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(invalid.error_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let oversized = ApiError::payload_too_large("JSON payload (3000000 bytes) is larger than allowed");
        assert_eq!(oversized.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
