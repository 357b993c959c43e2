//! Domain layer: strong types with validation and invariants (no I/O).

mod phone;
mod request;
mod response;
mod validation;
mod value;

pub use phone::{
    COUNTRY_PREFIX, PhoneNumber, SUBSCRIBER_DIGITS, normalize_phone_number, validate_phone_number,
};
pub use request::{CheckStatus, SendOtp, SendSms, VerifyOtp};
pub use response::{
    BalanceResponse, OtpSent, SendOtpResponse, SendSmsResponse, SentSms, SmsStatusResponse,
    VerifyOtpResponse,
};
pub use validation::ValidationError;
pub use value::{ApiKey, DeliveryStatus, Encoding, ErrorCode, MessageId, OtpCode, OtpHash};
