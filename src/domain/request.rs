use crate::domain::value::{MessageId, OtpCode, OtpHash};

/// `sendsms` request.
///
/// The recipient is deliberately unvalidated: the gateway answers an invalid
/// destination with `success: false`, not with an error, and callers see the
/// same through [`crate::SendSmsResponse::Rejected`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSms {
    from: String,
    to: String,
    text: String,
}

impl SendSms {
    pub fn new(from: impl Into<String>, to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: text.into(),
        }
    }

    /// Sender name shown to the recipient (`from` on the wire).
    pub fn sender(&self) -> &str {
        &self.from
    }

    /// Recipient phone number as given.
    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// `checksms` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckStatus {
    message_id: MessageId,
}

impl CheckStatus {
    pub fn new(message_id: MessageId) -> Self {
        Self { message_id }
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }
}

/// `otp/send` request. The phone is unvalidated for the same reason as
/// [`SendSms`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOtp {
    phone: String,
}

impl SendOtp {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// `otp/verify` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOtp {
    phone: String,
    hash: OtpHash,
    code: OtpCode,
}

impl VerifyOtp {
    pub fn new(phone: impl Into<String>, hash: OtpHash, code: OtpCode) -> Self {
        Self {
            phone: phone.into(),
            hash,
            code,
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn hash(&self) -> &OtpHash {
        &self.hash
    }

    pub fn code(&self) -> OtpCode {
        self.code
    }
}
