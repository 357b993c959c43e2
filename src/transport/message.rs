use serde::{Deserialize, Serialize};

use super::TransportError;
use super::wire::{WireInt, required};
use crate::domain::{DeliveryStatus, Encoding, MessageId, SentSms};

pub const FROM_FIELD: &str = "from";
pub const TO_FIELD: &str = "to";
pub const TEXT_FIELD: &str = "text";
pub const SEND_AT_FIELD: &str = "sendAt";
pub const BALANCE_FIELD: &str = "balance";
pub const ENCODE_FIELD: &str = "encode";
pub const SEGMENT_FIELD: &str = "segment";
pub const SMS_CHARACTERS_FIELD: &str = "smsCharacters";
pub const STATUS_FIELD: &str = "status";

/// Message body shared by `sendsms` and `checksms`.
///
/// Every field is optional on the way in so that `{"success": false}` parses;
/// [`MessageJson::into_sent`] enforces presence.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MessageJson {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "messageId", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<WireInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "sendAt", default, skip_serializing_if = "Option::is_none")]
    pub send_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<WireInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<WireInt>,
    #[serde(rename = "smsCharacters", default, skip_serializing_if = "Option::is_none")]
    pub sms_characters: Option<WireInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl MessageJson {
    pub fn rejected() -> Self {
        Self::default()
    }

    pub fn from_sent(sent: &SentSms) -> Result<Self, TransportError> {
        let id = sent.message_id.value();
        let message_id = i64::try_from(id).map_err(|_| TransportError::InvalidField {
            field: MessageId::FIELD,
            value: id.to_string(),
        })?;
        Ok(Self {
            success: true,
            message_id: Some(WireInt::Int(message_id)),
            from: Some(sent.from.clone()),
            to: Some(sent.to.clone()),
            text: Some(sent.text.clone()),
            send_at: Some(sent.sent_at.clone()),
            balance: Some(WireInt::Int(sent.balance)),
            encode: Some(sent.encoding.as_str().to_owned()),
            segment: Some(WireInt::Int(i64::from(sent.segment_count))),
            sms_characters: Some(WireInt::Int(i64::from(sent.character_count))),
            status: None,
        })
    }

    pub fn with_status(mut self, status: &DeliveryStatus) -> Self {
        self.status = Some(status.as_str().to_owned());
        self
    }

    pub fn into_sent(self) -> Result<SentSms, TransportError> {
        Ok(SentSms {
            message_id: MessageId::new(
                required(self.message_id, MessageId::FIELD)?.into_u64(MessageId::FIELD)?,
            ),
            from: required(self.from, FROM_FIELD)?,
            to: required(self.to, TO_FIELD)?,
            text: required(self.text, TEXT_FIELD)?,
            sent_at: required(self.send_at, SEND_AT_FIELD)?,
            balance: required(self.balance, BALANCE_FIELD)?.into_i64(BALANCE_FIELD)?,
            encoding: Encoding::from_wire(&required(self.encode, ENCODE_FIELD)?),
            segment_count: required(self.segment, SEGMENT_FIELD)?.into_u32(SEGMENT_FIELD)?,
            character_count: required(self.sms_characters, SMS_CHARACTERS_FIELD)?
                .into_u32(SMS_CHARACTERS_FIELD)?,
        })
    }
}
