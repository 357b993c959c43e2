use serde::{Deserialize, Serialize};

use super::TransportError;
use super::wire::WireInt;
use crate::domain::ErrorCode;

/// Error payload the gateway sends instead of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorEnvelope {
    pub message: String,
    pub error_code: ErrorCode,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct ApiErrorJson {
    #[serde(rename = "errorCode", default, skip_serializing_if = "Option::is_none")]
    error_code: Option<WireInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Inspect a response body for the error envelope.
///
/// Returns `Ok(None)` when `errorCode` is absent, `null`, zero, or an empty
/// string; any other value marks the response as failed.
pub fn decode_api_error(json: &str) -> Result<Option<ApiErrorEnvelope>, TransportError> {
    let parsed: ApiErrorJson = serde_json::from_str(json)?;
    let code = match parsed.error_code {
        None => return Ok(None),
        Some(WireInt::String(value)) if value.trim().is_empty() => return Ok(None),
        Some(code) => code.into_i64(ErrorCode::FIELD)?,
    };
    if code == 0 {
        return Ok(None);
    }

    Ok(Some(ApiErrorEnvelope {
        message: parsed.message.unwrap_or_default(),
        error_code: ErrorCode::new(code),
    }))
}

pub fn render_api_error_json(envelope: &ApiErrorEnvelope) -> Result<String, TransportError> {
    let json = ApiErrorJson {
        error_code: Some(WireInt::from(envelope.error_code.as_i64())),
        message: Some(envelope.message.clone()),
    };
    Ok(serde_json::to_string(&json)?)
}
