use super::TransportError;
use super::message::{MessageJson, STATUS_FIELD};
use super::wire::{WireInt, required, required_form_value};
use crate::domain::{CheckStatus, DeliveryStatus, MessageId, SmsStatusResponse};

pub fn encode_check_status_form(request: &CheckStatus) -> Vec<(String, String)> {
    vec![(
        MessageId::FIELD.to_owned(),
        request.message_id().value().to_string(),
    )]
}

pub fn decode_check_status_json_response(json: &str) -> Result<SmsStatusResponse, TransportError> {
    let mut parsed: MessageJson = serde_json::from_str(json)?;
    let status = required(parsed.status.take(), STATUS_FIELD)?;
    Ok(SmsStatusResponse {
        message: parsed.into_sent()?,
        status: DeliveryStatus::from_wire(&status),
    })
}

pub fn decode_check_status_form(params: &[(String, String)]) -> Result<CheckStatus, TransportError> {
    let raw = required_form_value(params, MessageId::FIELD)?;
    let id = WireInt::String(raw.to_owned()).into_u64(MessageId::FIELD)?;
    Ok(CheckStatus::new(MessageId::new(id)))
}

pub fn render_check_status_json(response: &SmsStatusResponse) -> Result<String, TransportError> {
    let json = MessageJson::from_sent(&response.message)?.with_status(&response.status);
    Ok(serde_json::to_string(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_form_params() {
        let request = CheckStatus::new(MessageId::new(42));
        assert_eq!(
            encode_check_status_form(&request),
            vec![("messageId".to_owned(), "42".to_owned())]
        );
    }

    #[test]
    fn decode_delivered_response() {
        let json = r#"
        {
          "success": true,
          "status": "DELIVERED",
          "messageId": 42,
          "from": "ALERT",
          "to": "995500000001",
          "text": "hello",
          "sendAt": "2026-10-18T09:30:00.000Z",
          "balance": 94,
          "encode": "unicode",
          "segment": 1,
          "smsCharacters": 5
        }
        "#;

        let response = decode_check_status_json_response(json).unwrap();
        assert!(response.status.is_delivered());
        assert_eq!(response.message.message_id, MessageId::new(42));
        assert_eq!(response.message.text, "hello");
    }

    #[test]
    fn decode_without_status_fails() {
        let json = r#"{"success": true, "messageId": 42}"#;
        let err = decode_check_status_json_response(json).unwrap_err();
        assert!(matches!(err, TransportError::MissingField { field: "status" }));
    }

    #[test]
    fn decode_form_parses_message_id() {
        let params = vec![("messageId".to_owned(), "7".to_owned())];
        let request = decode_check_status_form(&params).unwrap();
        assert_eq!(request.message_id(), MessageId::new(7));

        let params = vec![("messageId".to_owned(), "seven".to_owned())];
        assert!(matches!(
            decode_check_status_form(&params),
            Err(TransportError::InvalidField { field: "messageId", .. })
        ));
    }
}
