use std::sync::Arc;

use crate::client::BoxFuture;
use crate::domain::{
    BalanceResponse, CheckStatus, SendOtp, SendOtpResponse, SendSms, SendSmsResponse,
    SmsStatusResponse, VerifyOtp, VerifyOtpResponse,
};
use crate::error::GoSmsError;

/// The five gateway operations every backend implements.
///
/// Implementations return identical response shapes so callers can swap
/// [`crate::RemoteClient`] and [`crate::SimulatedGateway`] freely.
pub trait GatewayClient: Send + Sync {
    fn send(&self, request: SendSms) -> BoxFuture<'_, Result<SendSmsResponse, GoSmsError>>;

    fn status(&self, request: CheckStatus)
    -> BoxFuture<'_, Result<SmsStatusResponse, GoSmsError>>;

    fn balance(&self) -> BoxFuture<'_, Result<BalanceResponse, GoSmsError>>;

    fn send_otp(&self, request: SendOtp) -> BoxFuture<'_, Result<SendOtpResponse, GoSmsError>>;

    fn verify_otp(&self, request: VerifyOtp)
    -> BoxFuture<'_, Result<VerifyOtpResponse, GoSmsError>>;
}

impl<T: GatewayClient + ?Sized> GatewayClient for Arc<T> {
    fn send(&self, request: SendSms) -> BoxFuture<'_, Result<SendSmsResponse, GoSmsError>> {
        (**self).send(request)
    }

    fn status(
        &self,
        request: CheckStatus,
    ) -> BoxFuture<'_, Result<SmsStatusResponse, GoSmsError>> {
        (**self).status(request)
    }

    fn balance(&self) -> BoxFuture<'_, Result<BalanceResponse, GoSmsError>> {
        (**self).balance()
    }

    fn send_otp(&self, request: SendOtp) -> BoxFuture<'_, Result<SendOtpResponse, GoSmsError>> {
        (**self).send_otp(request)
    }

    fn verify_otp(
        &self,
        request: VerifyOtp,
    ) -> BoxFuture<'_, Result<VerifyOtpResponse, GoSmsError>> {
        (**self).verify_otp(request)
    }
}
