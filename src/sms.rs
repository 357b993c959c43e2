use std::sync::Arc;

use tracing::debug;

use crate::client::RemoteClient;
use crate::config::{Backend, Settings};
use crate::domain::{
    ApiKey, BalanceResponse, CheckStatus, MessageId, OtpCode, OtpHash, SendOtp, SendOtpResponse,
    SendSms, SendSmsResponse, SmsStatusResponse, VerifyOtp, VerifyOtpResponse,
};
use crate::error::GoSmsError;
use crate::gateway::GatewayClient;
use crate::simulator::SimulatedGateway;

/// Entry point: one value exposing the five gateway operations over whichever
/// backend [`Settings`] selected.
///
/// ```rust,no_run
/// use gosms::{Settings, Sms};
///
/// #[tokio::main]
/// async fn main() -> Result<(), gosms::GoSmsError> {
///     let sms = Sms::from_settings(&Settings::from_env()?)?;
///     let sent = sms.send("ALERT", "995500000001", "hello").await?;
///     if let Some(message) = sent.sent() {
///         let status = sms.status(message.message_id).await?;
///         println!("{:?}", status.status);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Sms {
    backend: Option<Backend>,
    client: Arc<dyn GatewayClient>,
}

impl Sms {
    /// Wrap any backend.
    pub fn new(client: impl GatewayClient + 'static) -> Self {
        Self {
            backend: None,
            client: Arc::new(client),
        }
    }

    /// Facade over a fresh [`SimulatedGateway`] with default options.
    pub fn simulated() -> Self {
        Self {
            backend: Some(Backend::Simulated),
            client: Arc::new(SimulatedGateway::new()),
        }
    }

    /// Build the backend `settings` selects (see [`Settings::backend`]).
    pub fn from_settings(settings: &Settings) -> Result<Self, GoSmsError> {
        let api_key = ApiKey::new(settings.api_key.as_str())?;
        settings.endpoints.validate()?;

        let backend = settings.backend();
        let client: Arc<dyn GatewayClient> = match backend {
            Backend::Remote => {
                let mut builder = RemoteClient::builder(api_key).endpoints(settings.endpoints.clone());
                if let Some(timeout) = settings.timeout() {
                    builder = builder.timeout(timeout);
                }
                Arc::new(builder.build()?)
            }
            Backend::Simulated => Arc::new(
                SimulatedGateway::with_options(settings.simulator)
                    .with_endpoints(settings.endpoints.clone()),
            ),
        };
        debug!(backend = backend.as_str(), "gosms client ready");

        Ok(Self {
            backend: Some(backend),
            client,
        })
    }

    /// Backend chosen from settings; `None` for a client injected with [`Sms::new`].
    pub fn backend(&self) -> Option<Backend> {
        self.backend
    }

    pub fn client(&self) -> &dyn GatewayClient {
        self.client.as_ref()
    }

    pub async fn send(
        &self,
        sender: impl Into<String>,
        to: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<SendSmsResponse, GoSmsError> {
        self.client.send(SendSms::new(sender, to, text)).await
    }

    pub async fn status(&self, message_id: MessageId) -> Result<SmsStatusResponse, GoSmsError> {
        self.client.status(CheckStatus::new(message_id)).await
    }

    pub async fn balance(&self) -> Result<BalanceResponse, GoSmsError> {
        self.client.balance().await
    }

    pub async fn send_otp(&self, phone: impl Into<String>) -> Result<SendOtpResponse, GoSmsError> {
        self.client.send_otp(SendOtp::new(phone)).await
    }

    pub async fn verify_otp(
        &self,
        phone: impl Into<String>,
        hash: OtpHash,
        code: OtpCode,
    ) -> Result<VerifyOtpResponse, GoSmsError> {
        self.client.verify_otp(VerifyOtp::new(phone, hash, code)).await
    }
}
