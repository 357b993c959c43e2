use serde::{Deserialize, Serialize};

use super::TransportError;
use super::message::{ENCODE_FIELD, SEGMENT_FIELD, SEND_AT_FIELD, SMS_CHARACTERS_FIELD, TO_FIELD};
use super::wire::{WireInt, required, required_form_value};
use crate::domain::{
    Encoding, OtpCode, OtpHash, OtpSent, PhoneNumber, SendOtp, SendOtpResponse, VerifyOtp,
    VerifyOtpResponse,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct SendOtpJsonResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<WireInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    #[serde(rename = "sendAt", default, skip_serializing_if = "Option::is_none")]
    send_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    encode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    segment: Option<WireInt>,
    #[serde(rename = "smsCharacters", default, skip_serializing_if = "Option::is_none")]
    sms_characters: Option<WireInt>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct VerifyOtpJsonResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    verify: bool,
}

pub fn encode_send_otp_form(request: &SendOtp) -> Vec<(String, String)> {
    vec![(PhoneNumber::FIELD.to_owned(), request.phone().to_owned())]
}

pub fn encode_verify_otp_form(request: &VerifyOtp) -> Vec<(String, String)> {
    vec![
        (PhoneNumber::FIELD.to_owned(), request.phone().to_owned()),
        (OtpHash::FIELD.to_owned(), request.hash().as_str().to_owned()),
        (OtpCode::FIELD.to_owned(), request.code().value().to_string()),
    ]
}

pub fn decode_send_otp_json_response(json: &str) -> Result<SendOtpResponse, TransportError> {
    let parsed: SendOtpJsonResponse = serde_json::from_str(json)?;
    if !parsed.success {
        return Ok(SendOtpResponse::Rejected);
    }

    Ok(SendOtpResponse::Sent(OtpSent {
        hash: OtpHash::new(required(parsed.hash, OtpHash::FIELD)?),
        code: OtpCode::new(required(parsed.code, OtpCode::FIELD)?.into_u32(OtpCode::FIELD)?),
        to: required(parsed.to, TO_FIELD)?,
        sent_at: required(parsed.send_at, SEND_AT_FIELD)?,
        encoding: Encoding::from_wire(&required(parsed.encode, ENCODE_FIELD)?),
        segment_count: required(parsed.segment, SEGMENT_FIELD)?.into_u32(SEGMENT_FIELD)?,
        character_count: required(parsed.sms_characters, SMS_CHARACTERS_FIELD)?
            .into_u32(SMS_CHARACTERS_FIELD)?,
    }))
}

pub fn decode_verify_otp_json_response(json: &str) -> Result<VerifyOtpResponse, TransportError> {
    let parsed: VerifyOtpJsonResponse = serde_json::from_str(json)?;
    Ok(VerifyOtpResponse {
        success: parsed.success,
        verify: parsed.verify,
    })
}

pub fn decode_send_otp_form(params: &[(String, String)]) -> Result<SendOtp, TransportError> {
    Ok(SendOtp::new(required_form_value(params, PhoneNumber::FIELD)?))
}

pub fn decode_verify_otp_form(params: &[(String, String)]) -> Result<VerifyOtp, TransportError> {
    let phone = required_form_value(params, PhoneNumber::FIELD)?;
    let hash = required_form_value(params, OtpHash::FIELD)?;
    let code = WireInt::String(required_form_value(params, OtpCode::FIELD)?.to_owned())
        .into_u32(OtpCode::FIELD)?;
    Ok(VerifyOtp::new(phone, OtpHash::new(hash), OtpCode::new(code)))
}

pub fn render_send_otp_json(response: &SendOtpResponse) -> Result<String, TransportError> {
    let json = match response {
        SendOtpResponse::Sent(sent) => SendOtpJsonResponse {
            success: true,
            hash: Some(sent.hash.as_str().to_owned()),
            code: Some(WireInt::from(i64::from(sent.code.value()))),
            to: Some(sent.to.clone()),
            send_at: Some(sent.sent_at.clone()),
            encode: Some(sent.encoding.as_str().to_owned()),
            segment: Some(WireInt::from(i64::from(sent.segment_count))),
            sms_characters: Some(WireInt::from(i64::from(sent.character_count))),
        },
        SendOtpResponse::Rejected => SendOtpJsonResponse::default(),
    };
    Ok(serde_json::to_string(&json)?)
}

pub fn render_verify_otp_json(response: &VerifyOtpResponse) -> Result<String, TransportError> {
    let json = VerifyOtpJsonResponse {
        success: response.success,
        verify: response.verify,
    };
    Ok(serde_json::to_string(&json)?)
}
