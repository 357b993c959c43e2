//! Typed Rust client for the GoSMS.ge SMS/OTP HTTP API.
//!
//! The crate is layered like a typical API binding: a domain layer of strong
//! types, a transport layer for wire-format quirks, and a small client layer
//! orchestrating requests. Two backends implement [`GatewayClient`]:
//!
//! - [`RemoteClient`] posts to the real gateway;
//! - [`SimulatedGateway`] answers in-process with the same contract, for
//!   development and tests.
//!
//! [`Sms`] picks one from [`Settings`].
//!
//! ```rust,no_run
//! use gosms::{Settings, Sms};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), gosms::GoSmsError> {
//!     let mut settings = Settings::new("api-key");
//!     settings.dev_mode = true;
//!     let sms = Sms::from_settings(&settings)?;
//!
//!     let otp = sms.send_otp("995500000001").await?;
//!     if let Some(challenge) = otp.sent() {
//!         let check = sms
//!             .verify_otp("995500000001", challenge.hash.clone(), challenge.code)
//!             .await?;
//!         assert!(check.verify);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
mod error;
mod gateway;
pub mod simulator;
mod sms;
mod transport;

pub use client::{HttpResponse, HttpTransport, RemoteClient, RemoteClientBuilder};
pub use config::{Backend, ConfigError, Endpoints, Operation, Settings};
pub use domain::{
    ApiKey, BalanceResponse, CheckStatus, DeliveryStatus, Encoding, ErrorCode, MessageId, OtpCode,
    OtpHash, OtpSent, PhoneNumber, SendOtp, SendOtpResponse, SendSms, SendSmsResponse, SentSms,
    SmsStatusResponse, ValidationError, VerifyOtp, VerifyOtpResponse, validate_phone_number,
};
pub use error::GoSmsError;
pub use gateway::GatewayClient;
pub use simulator::{SimulatedGateway, SimulatorOptions};
pub use sms::Sms;
