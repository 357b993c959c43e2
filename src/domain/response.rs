use crate::domain::value::{DeliveryStatus, Encoding, MessageId, OtpCode, OtpHash};

/// Result of `sendsms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendSmsResponse {
    /// The gateway accepted the message.
    Sent(SentSms),
    /// The gateway answered `success: false` (invalid destination).
    Rejected,
}

impl SendSmsResponse {
    /// Mirrors the wire `success` flag.
    pub fn success(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    pub fn sent(&self) -> Option<&SentSms> {
        match self {
            Self::Sent(sent) => Some(sent),
            Self::Rejected => None,
        }
    }

    pub fn into_sent(self) -> Option<SentSms> {
        match self {
            Self::Sent(sent) => Some(sent),
            Self::Rejected => None,
        }
    }
}

/// Message details returned by `sendsms` and repeated by `checksms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub message_id: MessageId,
    pub from: String,
    pub to: String,
    pub text: String,
    /// ISO-8601 timestamp as reported by the gateway.
    pub sent_at: String,
    /// Account balance reported alongside the send.
    pub balance: i64,
    pub encoding: Encoding,
    pub segment_count: u32,
    pub character_count: u32,
}

/// Result of `checksms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsStatusResponse {
    pub message: SentSms,
    pub status: DeliveryStatus,
}

/// Result of `sms-balance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceResponse {
    pub success: bool,
    pub balance: i64,
}

/// Result of `otp/send`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOtpResponse {
    Sent(OtpSent),
    /// The gateway answered `success: false` (invalid phone).
    Rejected,
}

impl SendOtpResponse {
    pub fn success(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    pub fn sent(&self) -> Option<&OtpSent> {
        match self {
            Self::Sent(sent) => Some(sent),
            Self::Rejected => None,
        }
    }

    pub fn into_sent(self) -> Option<OtpSent> {
        match self {
            Self::Sent(sent) => Some(sent),
            Self::Rejected => None,
        }
    }
}

/// Challenge details returned by `otp/send`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpSent {
    pub hash: OtpHash,
    pub code: OtpCode,
    pub to: String,
    pub sent_at: String,
    pub encoding: Encoding,
    pub segment_count: u32,
    pub character_count: u32,
}

/// Result of `otp/verify`.
///
/// `success` means a challenge existed to check against; `verify` is the
/// actual match result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub verify: bool,
}
