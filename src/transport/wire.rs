use serde::{Deserialize, Serialize};

use super::TransportError;

/// Integer returned by GoSMS.ge as either a JSON number or a numeric string.
///
/// Rendering always produces a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum WireInt {
    Int(i64),
    String(String),
}

impl WireInt {
    pub fn into_i64(self, field: &'static str) -> Result<i64, TransportError> {
        match self {
            Self::Int(value) => Ok(value),
            Self::String(value) => {
                value
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| TransportError::InvalidField {
                        field,
                        value: value.clone(),
                    })
            }
        }
    }

    pub fn into_u64(self, field: &'static str) -> Result<u64, TransportError> {
        let value = self.into_i64(field)?;
        u64::try_from(value).map_err(|_| TransportError::InvalidField {
            field,
            value: value.to_string(),
        })
    }

    pub fn into_u32(self, field: &'static str) -> Result<u32, TransportError> {
        let value = self.into_i64(field)?;
        u32::try_from(value).map_err(|_| TransportError::InvalidField {
            field,
            value: value.to_string(),
        })
    }
}

impl From<i64> for WireInt {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, TransportError> {
    value.ok_or(TransportError::MissingField { field })
}

/// Look up a form field received by the simulated gateway.
pub fn form_value<'a>(params: &'a [(String, String)], field: &'static str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == field)
        .map(|(_, value)| value.as_str())
}

pub fn required_form_value<'a>(
    params: &'a [(String, String)],
    field: &'static str,
) -> Result<&'a str, TransportError> {
    required(form_value(params, field), field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_int_accepts_numbers_and_numeric_strings() {
        let n: WireInt = serde_json::from_str("42").unwrap();
        assert_eq!(n.into_i64("balance").unwrap(), 42);

        let s: WireInt = serde_json::from_str(r#"" 42 ""#).unwrap();
        assert_eq!(s.into_i64("balance").unwrap(), 42);

        let bad: WireInt = serde_json::from_str(r#""lots""#).unwrap();
        assert!(matches!(
            bad.into_i64("balance"),
            Err(TransportError::InvalidField { field: "balance", .. })
        ));
    }

    #[test]
    fn wire_int_rejects_negative_ids() {
        let n: WireInt = serde_json::from_str("-1").unwrap();
        assert!(n.into_u64("messageId").is_err());
    }

    #[test]
    fn wire_int_renders_as_number() {
        assert_eq!(serde_json::to_string(&WireInt::from(7)).unwrap(), "7");
    }

    #[test]
    fn form_value_finds_first_match() {
        let params = vec![
            ("api_key".to_owned(), "k".to_owned()),
            ("to".to_owned(), "995500000001".to_owned()),
        ];
        assert_eq!(form_value(&params, "to"), Some("995500000001"));
        assert_eq!(form_value(&params, "from"), None);
        assert!(matches!(
            required_form_value(&params, "from"),
            Err(TransportError::MissingField { field: "from" })
        ));
    }
}
