//! Transport layer: wire-format details (form encoding, JSON decoding and rendering).
//!
//! Encoders/decoders used by [`crate::RemoteClient`] live next to the form
//! decoders and JSON renderers used by the simulated gateway's HTTP face, so
//! both sides share one definition of each payload.

mod api_error;
mod balance;
mod check_status;
mod message;
mod otp;
mod send_sms;
mod wire;

pub use api_error::{ApiErrorEnvelope, decode_api_error, render_api_error_json};
pub use balance::{decode_balance_json_response, render_balance_json};
pub use check_status::{
    decode_check_status_form, decode_check_status_json_response, encode_check_status_form,
    render_check_status_json,
};
pub use otp::{
    decode_send_otp_form, decode_send_otp_json_response, decode_verify_otp_form,
    decode_verify_otp_json_response, encode_send_otp_form, encode_verify_otp_form,
    render_send_otp_json, render_verify_otp_json,
};
pub use send_sms::{
    decode_send_sms_form, decode_send_sms_json_response, encode_send_sms_form,
    render_send_sms_json,
};
pub use wire::form_value;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}
