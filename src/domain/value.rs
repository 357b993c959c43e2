use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// GoSMS.ge `api_key` token.
///
/// Invariant: non-empty after trimming. `Debug` does not print the key.
pub struct ApiKey(String);

impl ApiKey {
    /// Form field name used by GoSMS.ge (`api_key`).
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Message id assigned by the gateway on a successful send (`messageId`).
pub struct MessageId(u64);

impl MessageId {
    /// Form/JSON field name used by GoSMS.ge (`messageId`).
    pub const FIELD: &'static str = "messageId";

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Opaque token returned with an OTP code (`hash`); required together with the
/// code to verify.
pub struct OtpHash(String);

impl OtpHash {
    /// Form/JSON field name used by GoSMS.ge (`hash`).
    pub const FIELD: &'static str = "hash";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Numeric OTP code (`code`).
///
/// Codes issued by the simulated gateway are always four digits
/// (`MIN..=MAX`). Codes supplied for verification are not range checked: a
/// wrong code is a verification failure, not a validation error.
pub struct OtpCode(u32);

impl OtpCode {
    /// Form/JSON field name used by GoSMS.ge (`code`).
    pub const FIELD: &'static str = "code";

    pub const MIN: u32 = 1000;
    pub const MAX: u32 = 9999;

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Character encoding reported for a sent message (`encode`).
///
/// Unknown values are preserved in [`Encoding::Other`].
pub enum Encoding {
    Unicode,
    Default,
    Other(String),
}

impl Encoding {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "unicode" => Self::Unicode,
            "default" => Self::Default,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unicode => "unicode",
            Self::Default => "default",
            Self::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery status reported by `checksms` (`status`).
///
/// The simulated gateway only ever reports [`DeliveryStatus::Delivered`];
/// anything else the real gateway sends is preserved in
/// [`DeliveryStatus::Other`].
pub enum DeliveryStatus {
    Delivered,
    Other(String),
}

impl DeliveryStatus {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "DELIVERED" => Self::Delivered,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Delivered => "DELIVERED",
            Self::Other(value) => value,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Error code carried by the gateway's error envelope (`errorCode`).
///
/// Preserved as-is; the crate does not interpret individual codes.
pub struct ErrorCode(i64);

impl ErrorCode {
    /// JSON field name used by GoSMS.ge (`errorCode`).
    pub const FIELD: &'static str = "errorCode";

    pub fn new(code: i64) -> Self {
        Self(code)
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
