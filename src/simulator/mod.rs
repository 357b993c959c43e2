//! In-process GoSMS.ge double.
//!
//! [`SimulatedGateway`] keeps messages, OTP challenges and the balance in
//! memory and answers the five operations the way the real service does,
//! including its soft failures (`success: false` for an invalid destination).
//! It can be used directly as a [`crate::GatewayClient`], or as an
//! [`crate::HttpTransport`] behind a [`crate::RemoteClient`] to exercise the
//! full wire path without a network.

mod http;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::Deserialize;
use tracing::debug;

use crate::client::BoxFuture;
use crate::config::Endpoints;
use crate::domain::{
    BalanceResponse, CheckStatus, DeliveryStatus, Encoding, MessageId, OtpCode, OtpHash, OtpSent,
    PhoneNumber, SendOtp, SendOtpResponse, SendSms, SendSmsResponse, SentSms, SmsStatusResponse,
    VerifyOtp, VerifyOtpResponse, validate_phone_number,
};
use crate::error::GoSmsError;
use crate::gateway::GatewayClient;

pub use http::{API_KEY_REQUIRED_CODE, INSUFFICIENT_BALANCE_CODE, MESSAGE_NOT_FOUND_CODE};

/// Balance a fresh simulator starts with.
pub const DEFAULT_STARTING_BALANCE: i64 = 94;

/// Nominal length of the OTP message template reported by `otp/send`.
pub const OTP_CHARACTER_COUNT: u32 = 57;

const OTP_HASH_LEN: usize = 30;
const SEGMENTS_PER_MESSAGE: u32 = 1;

/// Knobs for [`SimulatedGateway`], also read from the `simulator` table of [`crate::Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulatorOptions {
    /// Balance reported by `checkbalance` before any send.
    pub starting_balance: i64,
    /// Charge one unit per accepted message. Off by default: the balance then
    /// never moves, as with the reference double.
    pub debit_on_send: bool,
}

impl Default for SimulatorOptions {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            debit_on_send: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OtpChallenge {
    hash: OtpHash,
    code: OtpCode,
}

struct SimulatorState {
    last_message_id: u64,
    messages: BTreeMap<MessageId, SentSms>,
    // Keyed by normalized number so `5xx...` and `9955xx...` share a challenge.
    challenges: HashMap<PhoneNumber, OtpChallenge>,
    balance: i64,
    rng: Box<dyn RngCore + Send>,
}

/// In-memory implementation of the gateway.
///
/// Every operation takes the state lock once and finishes its mutation before
/// releasing it, so ids are never duplicated or skipped under concurrent use.
pub struct SimulatedGateway {
    options: SimulatorOptions,
    endpoints: Endpoints,
    state: Mutex<SimulatorState>,
}

impl SimulatedGateway {
    pub fn new() -> Self {
        Self::with_options(SimulatorOptions::default())
    }

    pub fn with_options(options: SimulatorOptions) -> Self {
        Self::with_rng(options, StdRng::from_entropy())
    }

    /// Use `rng` for OTP hashes and codes. Pass a seeded RNG for reproducible tests.
    pub fn with_rng(options: SimulatorOptions, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            options,
            endpoints: Endpoints::default(),
            state: Mutex::new(SimulatorState {
                last_message_id: 0,
                messages: BTreeMap::new(),
                challenges: HashMap::new(),
                balance: options.starting_balance,
                rng: Box::new(rng),
            }),
        }
    }

    /// Endpoints the HTTP face answers on. Defaults to the real gateway's URLs.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn options(&self) -> SimulatorOptions {
        self.options
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Number of messages accepted so far.
    pub fn message_count(&self) -> usize {
        self.lock().messages.len()
    }

    /// Accept or reject a message.
    ///
    /// An invalid destination is [`SendSmsResponse::Rejected`] and consumes no
    /// id. Fails only with [`GoSmsError::InsufficientBalance`] when debiting
    /// is enabled.
    pub fn send_sms(&self, request: &SendSms) -> Result<SendSmsResponse, GoSmsError> {
        if !validate_phone_number(request.to()) {
            debug!(to = request.to(), "simulated send rejected: invalid destination");
            return Ok(SendSmsResponse::Rejected);
        }

        let mut state = self.lock();
        if self.options.debit_on_send {
            let cost = i64::from(SEGMENTS_PER_MESSAGE);
            if state.balance < cost {
                return Err(GoSmsError::InsufficientBalance {
                    balance: state.balance,
                });
            }
            state.balance -= cost;
        }

        state.last_message_id += 1;
        let message_id = MessageId::new(state.last_message_id);
        let sent = SentSms {
            message_id,
            from: request.sender().to_owned(),
            to: request.to().to_owned(),
            text: request.text().to_owned(),
            sent_at: now(),
            balance: state.balance,
            encoding: Encoding::Unicode,
            segment_count: SEGMENTS_PER_MESSAGE,
            character_count: char_count(request.text()),
        };
        state.messages.insert(message_id, sent.clone());
        drop(state);

        debug!(%message_id, to = request.to(), "simulated send accepted");
        Ok(SendSmsResponse::Sent(sent))
    }

    /// Look up a message. Every known message reports `DELIVERED`.
    pub fn check_status(&self, request: CheckStatus) -> Result<SmsStatusResponse, GoSmsError> {
        let message_id = request.message_id();
        let message = self
            .lock()
            .messages
            .get(&message_id)
            .cloned()
            .ok_or(GoSmsError::NotFound { message_id })?;

        Ok(SmsStatusResponse {
            message,
            status: DeliveryStatus::Delivered,
        })
    }

    pub fn check_balance(&self) -> BalanceResponse {
        BalanceResponse {
            success: true,
            balance: self.lock().balance,
        }
    }

    /// Issue a fresh challenge, replacing any previous one for the same number.
    pub fn issue_otp(&self, request: &SendOtp) -> SendOtpResponse {
        let Ok(phone) = PhoneNumber::parse(request.phone()) else {
            debug!(phone = request.phone(), "simulated otp rejected: invalid phone");
            return SendOtpResponse::Rejected;
        };

        let challenge = {
            let mut state = self.lock();
            let challenge = OtpChallenge {
                hash: random_hash(&mut state.rng),
                code: OtpCode::new(state.rng.gen_range(OtpCode::MIN..=OtpCode::MAX)),
            };
            state.challenges.insert(phone, challenge.clone());
            challenge
        };

        debug!(phone = request.phone(), "simulated otp issued");
        SendOtpResponse::Sent(OtpSent {
            hash: challenge.hash,
            code: challenge.code,
            to: request.phone().to_owned(),
            sent_at: now(),
            encoding: Encoding::Default,
            segment_count: SEGMENTS_PER_MESSAGE,
            character_count: OTP_CHARACTER_COUNT,
        })
    }

    /// Compare against the live challenge without consuming it.
    pub fn check_otp(&self, request: &VerifyOtp) -> VerifyOtpResponse {
        let no_challenge = VerifyOtpResponse {
            success: false,
            verify: false,
        };
        let Ok(phone) = PhoneNumber::parse(request.phone()) else {
            return no_challenge;
        };

        match self.lock().challenges.get(&phone) {
            None => no_challenge,
            Some(challenge) => VerifyOtpResponse {
                success: true,
                verify: challenge.hash == *request.hash() && challenge.code == request.code(),
            },
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimulatorState> {
        // Every mutation completes between statements, so a poisoned state is
        // still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SimulatedGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedGateway")
            .field("options", &self.options)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl GatewayClient for SimulatedGateway {
    fn send(&self, request: SendSms) -> BoxFuture<'_, Result<SendSmsResponse, GoSmsError>> {
        Box::pin(async move { self.send_sms(&request) })
    }

    fn status(
        &self,
        request: CheckStatus,
    ) -> BoxFuture<'_, Result<SmsStatusResponse, GoSmsError>> {
        Box::pin(async move { self.check_status(request) })
    }

    fn balance(&self) -> BoxFuture<'_, Result<BalanceResponse, GoSmsError>> {
        Box::pin(async move { Ok(self.check_balance()) })
    }

    fn send_otp(&self, request: SendOtp) -> BoxFuture<'_, Result<SendOtpResponse, GoSmsError>> {
        Box::pin(async move { Ok(self.issue_otp(&request)) })
    }

    fn verify_otp(
        &self,
        request: VerifyOtp,
    ) -> BoxFuture<'_, Result<VerifyOtpResponse, GoSmsError>> {
        Box::pin(async move { Ok(self.check_otp(&request)) })
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn char_count(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}

fn random_hash(rng: &mut impl Rng) -> OtpHash {
    let hash: String = (0..OTP_HASH_LEN)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect();
    OtpHash::new(hash)
}
