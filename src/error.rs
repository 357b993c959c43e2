use std::error::Error as StdError;

use crate::config::ConfigError;
use crate::domain::{ErrorCode, MessageId, ValidationError};

#[derive(Debug, thiserror::Error)]
/// Errors returned by every [`crate::GatewayClient`] backend and the [`crate::Sms`] facade.
///
/// Soft failures are not errors: an invalid destination on `send`/`send_otp`
/// is a `Rejected` response and a missing challenge on `verify_otp` is
/// `success: false`.
pub enum GoSmsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// GoSMS.ge answered with an `errorCode`.
    #[error("API error: {message}; code: {error_code}")]
    Api {
        message: String,
        error_code: ErrorCode,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The simulated gateway has no message with this id.
    #[error("message {message_id} not found")]
    NotFound { message_id: MessageId },

    /// The simulated gateway debits on send and the balance is exhausted.
    #[error("insufficient balance: {balance}")]
    InsufficientBalance { balance: i64 },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Settings could not be loaded or are inconsistent.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_code() {
        let err = GoSmsError::Api {
            message: "Invalid api key".to_owned(),
            error_code: ErrorCode::new(100),
        };
        assert_eq!(err.to_string(), "API error: Invalid api key; code: 100");
    }

    #[test]
    fn not_found_display_names_the_id() {
        let err = GoSmsError::NotFound {
            message_id: MessageId::new(9),
        };
        assert_eq!(err.to_string(), "message 9 not found");
    }
}
