use super::TransportError;
use super::message::{FROM_FIELD, MessageJson, TEXT_FIELD, TO_FIELD};
use super::wire::required_form_value;
use crate::domain::{SendSms, SendSmsResponse};

pub fn encode_send_sms_form(request: &SendSms) -> Vec<(String, String)> {
    vec![
        (FROM_FIELD.to_owned(), request.sender().to_owned()),
        (TO_FIELD.to_owned(), request.to().to_owned()),
        (TEXT_FIELD.to_owned(), request.text().to_owned()),
    ]
}

pub fn decode_send_sms_json_response(json: &str) -> Result<SendSmsResponse, TransportError> {
    let parsed: MessageJson = serde_json::from_str(json)?;
    if !parsed.success {
        return Ok(SendSmsResponse::Rejected);
    }
    Ok(SendSmsResponse::Sent(parsed.into_sent()?))
}

pub fn decode_send_sms_form(params: &[(String, String)]) -> Result<SendSms, TransportError> {
    Ok(SendSms::new(
        required_form_value(params, FROM_FIELD)?,
        required_form_value(params, TO_FIELD)?,
        required_form_value(params, TEXT_FIELD)?,
    ))
}

pub fn render_send_sms_json(response: &SendSmsResponse) -> Result<String, TransportError> {
    let json = match response {
        SendSmsResponse::Sent(sent) => MessageJson::from_sent(sent)?,
        SendSmsResponse::Rejected => MessageJson::rejected(),
    };
    Ok(serde_json::to_string(&json)?)
}

#[cfg(test)]
mod tests {
    use crate::domain::{Encoding, MessageId, SentSms};

    use super::*;

    fn sample_sent() -> SentSms {
        SentSms {
            message_id: MessageId::new(1),
            from: "ALERT".to_owned(),
            to: "995500000001".to_owned(),
            text: "hello".to_owned(),
            sent_at: "2026-10-18T09:30:00.000Z".to_owned(),
            balance: 94,
            encoding: Encoding::Unicode,
            segment_count: 1,
            character_count: 5,
        }
    }

    #[test]
    fn encode_form_params() {
        let request = SendSms::new("ALERT", "995500000001", "hello");
        assert_eq!(
            encode_send_sms_form(&request),
            vec![
                ("from".to_owned(), "ALERT".to_owned()),
                ("to".to_owned(), "995500000001".to_owned()),
                ("text".to_owned(), "hello".to_owned()),
            ]
        );
    }

    #[test]
    fn decode_success_response() {
        let json = r#"
        {
          "success": true,
          "messageId": 1,
          "from": "ALERT",
          "to": "995500000001",
          "text": "hello",
          "sendAt": "2026-10-18T09:30:00.000Z",
          "balance": "94",
          "encode": "unicode",
          "segment": 1,
          "smsCharacters": 5
        }
        "#;

        let response = decode_send_sms_json_response(json).unwrap();
        assert_eq!(response, SendSmsResponse::Sent(sample_sent()));
    }

    #[test]
    fn decode_unsuccessful_response_as_rejected() {
        let response = decode_send_sms_json_response(r#"{"success": false}"#).unwrap();
        assert_eq!(response, SendSmsResponse::Rejected);
    }

    #[test]
    fn decode_success_without_message_id_fails() {
        let json = r#"{"success": true, "from": "ALERT"}"#;
        let err = decode_send_sms_json_response(json).unwrap_err();
        assert!(matches!(
            err,
            TransportError::MissingField { field: "messageId" }
        ));
    }

    #[test]
    fn render_rejects_message_id_beyond_wire_range() {
        let mut sent = sample_sent();
        sent.message_id = MessageId::new(u64::MAX);
        let err = render_send_sms_json(&SendSmsResponse::Sent(sent)).unwrap_err();
        assert!(matches!(
            err,
            TransportError::InvalidField {
                field: "messageId",
                ..
            }
        ));
    }

    #[test]
    fn render_uses_wire_field_names() {
        let json = render_send_sms_json(&SendSmsResponse::Sent(sample_sent())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["messageId"], 1);
        assert_eq!(value["sendAt"], "2026-10-18T09:30:00.000Z");
        assert_eq!(value["encode"], "unicode");
        assert_eq!(value["segment"], 1);
        assert_eq!(value["smsCharacters"], 5);
        assert!(value.get("status").is_none());

        let json = render_send_sms_json(&SendSmsResponse::Rejected).unwrap();
        assert_eq!(json, r#"{"success":false}"#);
    }

    #[test]
    fn decode_form_requires_every_field() {
        let params = vec![
            ("api_key".to_owned(), "k".to_owned()),
            ("from".to_owned(), "ALERT".to_owned()),
            ("to".to_owned(), "995500000001".to_owned()),
        ];
        assert!(matches!(
            decode_send_sms_form(&params),
            Err(TransportError::MissingField { field: "text" })
        ));
    }
}
