use serde::{Deserialize, Serialize};

use super::TransportError;
use super::message::BALANCE_FIELD;
use super::wire::{WireInt, required};
use crate::domain::BalanceResponse;

#[derive(Debug, Clone, Deserialize, Serialize)]
struct BalanceJsonResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    balance: Option<WireInt>,
}

pub fn decode_balance_json_response(json: &str) -> Result<BalanceResponse, TransportError> {
    let parsed: BalanceJsonResponse = serde_json::from_str(json)?;
    Ok(BalanceResponse {
        success: parsed.success,
        balance: required(parsed.balance, BALANCE_FIELD)?.into_i64(BALANCE_FIELD)?,
    })
}

pub fn render_balance_json(response: &BalanceResponse) -> Result<String, TransportError> {
    let json = BalanceJsonResponse {
        success: response.success,
        balance: Some(WireInt::from(response.balance)),
    };
    Ok(serde_json::to_string(&json)?)
}
