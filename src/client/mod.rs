//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod http;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{Endpoints, Operation};
use crate::domain::{
    ApiKey, BalanceResponse, CheckStatus, SendOtp, SendOtpResponse, SendSms, SendSmsResponse,
    SmsStatusResponse, VerifyOtp, VerifyOtpResponse,
};
use crate::error::GoSmsError;
use crate::gateway::GatewayClient;
use crate::transport;

pub use http::{BoxFuture, HttpResponse, HttpTransport, ReqwestTransport};

#[derive(Clone)]
/// Builder for [`RemoteClient`].
///
/// Use this when you need to customize endpoints, timeout, user-agent, or the
/// HTTP transport itself.
pub struct RemoteClientBuilder {
    api_key: ApiKey,
    endpoints: Endpoints,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl RemoteClientBuilder {
    /// Create a builder with the default GoSMS.ge endpoints.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            endpoints: Endpoints::default(),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Replace all five endpoints.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Override the endpoint URL of a single operation.
    pub fn endpoint(mut self, operation: Operation, url: impl Into<String>) -> Self {
        self.endpoints.set_url(operation, url);
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Post through `transport` instead of a `reqwest` client.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`RemoteClient`].
    pub fn build(self) -> Result<RemoteClient, GoSmsError> {
        self.endpoints.validate()?;

        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| GoSmsError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport::new(client))
            }
        };

        Ok(RemoteClient {
            api_key: self.api_key,
            endpoints: self.endpoints,
            http,
        })
    }
}

#[derive(Clone)]
/// GoSMS.ge client speaking the real gateway protocol.
///
/// Every call posts a form (`api_key` plus the operation's fields) to the
/// operation's endpoint and decodes the JSON answer. A body carrying a
/// non-zero `errorCode` becomes [`GoSmsError::Api`]. No retries.
pub struct RemoteClient {
    api_key: ApiKey,
    endpoints: Endpoints,
    http: Arc<dyn HttpTransport>,
}

impl RemoteClient {
    /// Create a client using the default endpoints.
    ///
    /// For more customization, use [`RemoteClient::builder`].
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            endpoints: Endpoints::default(),
            http: Arc::new(ReqwestTransport::default()),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> RemoteClientBuilder {
        RemoteClientBuilder::new(api_key)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send an SMS. An invalid destination comes back as
    /// [`SendSmsResponse::Rejected`].
    pub async fn send(&self, request: SendSms) -> Result<SendSmsResponse, GoSmsError> {
        let body = self
            .post(Operation::SmsSend, transport::encode_send_sms_form(&request))
            .await?;
        transport::decode_send_sms_json_response(&body).map_err(parse_error)
    }

    /// Check the delivery status of a previously sent message.
    pub async fn status(&self, request: CheckStatus) -> Result<SmsStatusResponse, GoSmsError> {
        let body = self
            .post(
                Operation::SmsCheck,
                transport::encode_check_status_form(&request),
            )
            .await?;
        transport::decode_check_status_json_response(&body).map_err(parse_error)
    }

    pub async fn balance(&self) -> Result<BalanceResponse, GoSmsError> {
        let body = self.post(Operation::BalanceCheck, Vec::new()).await?;
        transport::decode_balance_json_response(&body).map_err(parse_error)
    }

    pub async fn send_otp(&self, request: SendOtp) -> Result<SendOtpResponse, GoSmsError> {
        let body = self
            .post(Operation::OtpSend, transport::encode_send_otp_form(&request))
            .await?;
        transport::decode_send_otp_json_response(&body).map_err(parse_error)
    }

    pub async fn verify_otp(&self, request: VerifyOtp) -> Result<VerifyOtpResponse, GoSmsError> {
        let body = self
            .post(
                Operation::OtpVerify,
                transport::encode_verify_otp_form(&request),
            )
            .await?;
        transport::decode_verify_otp_json_response(&body).map_err(parse_error)
    }

    /// Post `form` with the API key attached and return the body once it is
    /// known not to be an error.
    ///
    /// An `errorCode` envelope takes precedence over the HTTP status so that a
    /// 4xx carrying a gateway error still reports the gateway's message.
    async fn post(
        &self,
        operation: Operation,
        form: Vec<(String, String)>,
    ) -> Result<String, GoSmsError> {
        let mut params = Vec::with_capacity(form.len() + 1);
        params.push((ApiKey::FIELD.to_owned(), self.api_key.as_str().to_owned()));
        params.extend(form);

        let url = self.endpoints.url(operation);
        debug!(operation = operation.key(), url, "posting to gateway");

        let response = self
            .http
            .post_form(url, params)
            .await
            .map_err(GoSmsError::Transport)?;

        match transport::decode_api_error(&response.body) {
            Ok(Some(envelope)) => {
                warn!(
                    operation = operation.key(),
                    error_code = envelope.error_code.as_i64(),
                    message = %envelope.message,
                    "gateway returned an error"
                );
                return Err(GoSmsError::Api {
                    message: envelope.message,
                    error_code: envelope.error_code,
                });
            }
            Ok(None) => {}
            Err(err) if response.is_success() => return Err(parse_error(err)),
            Err(_) => {}
        }

        if !response.is_success() {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(GoSmsError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}

fn parse_error(err: transport::TransportError) -> GoSmsError {
    GoSmsError::Parse(Box::new(err))
}

impl GatewayClient for RemoteClient {
    fn send(&self, request: SendSms) -> BoxFuture<'_, Result<SendSmsResponse, GoSmsError>> {
        Box::pin(RemoteClient::send(self, request))
    }

    fn status(
        &self,
        request: CheckStatus,
    ) -> BoxFuture<'_, Result<SmsStatusResponse, GoSmsError>> {
        Box::pin(RemoteClient::status(self, request))
    }

    fn balance(&self) -> BoxFuture<'_, Result<BalanceResponse, GoSmsError>> {
        Box::pin(RemoteClient::balance(self))
    }

    fn send_otp(&self, request: SendOtp) -> BoxFuture<'_, Result<SendOtpResponse, GoSmsError>> {
        Box::pin(RemoteClient::send_otp(self, request))
    }

    fn verify_otp(
        &self,
        request: VerifyOtp,
    ) -> BoxFuture<'_, Result<VerifyOtpResponse, GoSmsError>> {
        Box::pin(RemoteClient::verify_otp(self, request))
    }
}
