use std::error::Error as StdError;

use tracing::debug;

use super::SimulatedGateway;
use crate::client::{BoxFuture, HttpResponse, HttpTransport};
use crate::config::Operation;
use crate::domain::{ApiKey, ErrorCode};
use crate::error::GoSmsError;
use crate::transport::{self, ApiErrorEnvelope, TransportError};

/// `errorCode` answered when the form carries no `api_key`.
pub const API_KEY_REQUIRED_CODE: i64 = 100;
/// `errorCode` answered when debiting is enabled and the balance is exhausted.
pub const INSUFFICIENT_BALANCE_CODE: i64 = 402;
/// `errorCode` answered by `checksms` for an unknown message id.
pub const MESSAGE_NOT_FOUND_CODE: i64 = 404;

impl SimulatedGateway {
    /// Answer a form POST the way the real gateway would.
    ///
    /// Unknown URLs get a 404, malformed forms a 400. Gateway-level failures
    /// are a 200 carrying the `errorCode` envelope.
    pub fn handle_form(&self, url: &str, params: &[(String, String)]) -> HttpResponse {
        let Some(operation) = self.endpoints.operation_for(url) else {
            debug!(url, "simulated gateway: no such endpoint");
            return HttpResponse::new(404, format!("no endpoint at {url}"));
        };

        match self.dispatch(operation, params) {
            Ok(body) => HttpResponse::new(200, body),
            Err(response) => response,
        }
    }

    fn dispatch(
        &self,
        operation: Operation,
        params: &[(String, String)],
    ) -> Result<String, HttpResponse> {
        let has_api_key = transport::form_value(params, ApiKey::FIELD)
            .is_some_and(|key| !key.trim().is_empty());
        if !has_api_key {
            return Err(api_error(ApiErrorEnvelope {
                message: "api_key is required".to_owned(),
                error_code: ErrorCode::new(API_KEY_REQUIRED_CODE),
            }));
        }

        let rendered = match operation {
            Operation::SmsSend => {
                let request = transport::decode_send_sms_form(params).map_err(bad_request)?;
                let response = self.send_sms(&request).map_err(gateway_failure)?;
                transport::render_send_sms_json(&response)
            }
            Operation::SmsCheck => {
                let request = transport::decode_check_status_form(params).map_err(bad_request)?;
                let response = self.check_status(request).map_err(gateway_failure)?;
                transport::render_check_status_json(&response)
            }
            Operation::BalanceCheck => transport::render_balance_json(&self.check_balance()),
            Operation::OtpSend => {
                let request = transport::decode_send_otp_form(params).map_err(bad_request)?;
                transport::render_send_otp_json(&self.issue_otp(&request))
            }
            Operation::OtpVerify => {
                let request = transport::decode_verify_otp_form(params).map_err(bad_request)?;
                transport::render_verify_otp_json(&self.check_otp(&request))
            }
        };

        rendered.map_err(internal_error)
    }
}

impl HttpTransport for SimulatedGateway {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move { Ok(self.handle_form(url, &params)) })
    }
}

fn bad_request(err: TransportError) -> HttpResponse {
    HttpResponse::new(400, err.to_string())
}

fn internal_error(err: TransportError) -> HttpResponse {
    HttpResponse::new(500, err.to_string())
}

fn gateway_failure(err: GoSmsError) -> HttpResponse {
    let error_code = match &err {
        GoSmsError::NotFound { .. } => MESSAGE_NOT_FOUND_CODE,
        GoSmsError::InsufficientBalance { .. } => INSUFFICIENT_BALANCE_CODE,
        other => return HttpResponse::new(500, other.to_string()),
    };
    api_error(ApiErrorEnvelope {
        message: err.to_string(),
        error_code: ErrorCode::new(error_code),
    })
}

fn api_error(envelope: ApiErrorEnvelope) -> HttpResponse {
    match transport::render_api_error_json(&envelope) {
        Ok(body) => HttpResponse::new(200, body),
        Err(err) => internal_error(err),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::client::RemoteClient;
    use crate::config::Endpoints;
    use crate::domain::{CheckStatus, MessageId, SendOtp, SendSms, SendSmsResponse, VerifyOtp};
    use crate::simulator::SimulatorOptions;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn simulator() -> Arc<SimulatedGateway> {
        Arc::new(
            SimulatedGateway::with_rng(SimulatorOptions::default(), StdRng::seed_from_u64(1))
                .with_endpoints(Endpoints::with_base("mock://gosms/api/").unwrap()),
        )
    }

    fn remote_over(simulator: &Arc<SimulatedGateway>) -> RemoteClient {
        RemoteClient::builder(ApiKey::new("1111").unwrap())
            .endpoints(simulator.endpoints().clone())
            .transport(simulator.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn unknown_url_is_404() {
        let simulator = simulator();
        let response = simulator.handle_form("mock://gosms/api/nope", &params(&[("api_key", "k")]));
        assert_eq!(response.status, 404);
    }

    #[test]
    fn missing_api_key_is_an_error_envelope() {
        let simulator = simulator();
        let response = simulator.handle_form("mock://gosms/api/sms-balance", &[]);
        assert_eq!(response.status, 200);
        let envelope = transport::decode_api_error(&response.body).unwrap().unwrap();
        assert_eq!(envelope.error_code.as_i64(), API_KEY_REQUIRED_CODE);
    }

    #[test]
    fn malformed_form_is_400() {
        let simulator = simulator();
        let response = simulator.handle_form(
            "mock://gosms/api/checksms",
            &params(&[("api_key", "k"), ("messageId", "abc")]),
        );
        assert_eq!(response.status, 400);
    }

    #[test]
    fn send_answers_with_wire_json() {
        let simulator = simulator();
        let response = simulator.handle_form(
            "mock://gosms/api/sendsms",
            &params(&[
                ("api_key", "k"),
                ("from", "ALERT"),
                ("to", "995500000001"),
                ("text", "hello"),
            ]),
        );
        assert_eq!(response.status, 200);
        let value: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["messageId"], 1);
        assert_eq!(value["smsCharacters"], 5);
    }

    #[tokio::test]
    async fn remote_client_round_trips_through_simulator() {
        let simulator = simulator();
        let client = remote_over(&simulator);

        let sent = client
            .send(SendSms::new("ALERT", "995500000001", "hello"))
            .await
            .unwrap()
            .into_sent()
            .unwrap();
        assert_eq!(sent.message_id, MessageId::new(1));

        let status = client
            .status(CheckStatus::new(sent.message_id))
            .await
            .unwrap();
        assert!(status.status.is_delivered());
        assert_eq!(status.message, sent);

        let rejected = client
            .send(SendSms::new("ALERT", "9955000000015993", "hello"))
            .await
            .unwrap();
        assert_eq!(rejected, SendSmsResponse::Rejected);

        assert_eq!(client.balance().await.unwrap().balance, 94);
        assert_eq!(simulator.message_count(), 1);
    }

    #[tokio::test]
    async fn remote_client_sees_unknown_id_as_api_error() {
        let simulator = simulator();
        let client = remote_over(&simulator);

        let err = client
            .status(CheckStatus::new(MessageId::new(5)))
            .await
            .unwrap_err();
        match err {
            GoSmsError::Api { error_code, .. } => {
                assert_eq!(error_code.as_i64(), MESSAGE_NOT_FOUND_CODE);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn remote_client_sees_exhausted_balance_as_api_error() {
        let simulator = Arc::new(
            SimulatedGateway::with_options(SimulatorOptions {
                starting_balance: 0,
                debit_on_send: true,
            })
            .with_endpoints(Endpoints::with_base("mock://gosms/api/").unwrap()),
        );
        let client = remote_over(&simulator);

        let err = client
            .send(SendSms::new("ALERT", "995500000001", "hello"))
            .await
            .unwrap_err();
        match err {
            GoSmsError::Api { error_code, .. } => {
                assert_eq!(error_code.as_i64(), INSUFFICIENT_BALANCE_CODE);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(simulator.message_count(), 0);
    }

    #[tokio::test]
    async fn remote_client_otp_flow_through_simulator() {
        let simulator = simulator();
        let client = remote_over(&simulator);

        let challenge = client
            .send_otp(SendOtp::new("995500000001"))
            .await
            .unwrap()
            .into_sent()
            .unwrap();

        let ok = client
            .verify_otp(VerifyOtp::new(
                "995500000001",
                challenge.hash.clone(),
                challenge.code,
            ))
            .await
            .unwrap();
        assert!(ok.success && ok.verify);

        let unknown = client
            .verify_otp(VerifyOtp::new(
                "995500000002",
                challenge.hash,
                challenge.code,
            ))
            .await
            .unwrap();
        assert!(!unknown.success && !unknown.verify);
    }
}
