use crate::domain::validation::ValidationError;

/// Country calling code every accepted number carries after normalization.
pub const COUNTRY_PREFIX: &str = "995";

/// Number of digits following [`COUNTRY_PREFIX`].
pub const SUBSCRIBER_DIGITS: usize = 9;

/// Returns `true` if `phone` is a number the gateway accepts.
///
/// A number that does not start with [`COUNTRY_PREFIX`] gets it prepended; the
/// result must be the prefix followed by exactly [`SUBSCRIBER_DIGITS`] ASCII
/// digits. Never panics.
pub fn validate_phone_number(phone: &str) -> bool {
    normalize_phone_number(phone).is_some()
}

/// Normalize `phone` to its prefixed form, or `None` if it is not valid.
pub fn normalize_phone_number(phone: &str) -> Option<String> {
    let normalized = if phone.starts_with(COUNTRY_PREFIX) {
        phone.to_owned()
    } else {
        format!("{COUNTRY_PREFIX}{phone}")
    };

    let subscriber = &normalized[COUNTRY_PREFIX.len()..];
    if subscriber.len() != SUBSCRIBER_DIGITS || !subscriber.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(normalized)
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number accepted by the gateway, stored in normalized form
/// (`995` followed by nine digits).
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Form field name used by the OTP endpoints (`phone`).
    pub const FIELD: &'static str = "phone";

    /// Validate and normalize a phone number.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        normalize_phone_number(input)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidPhoneNumber {
                input: input.to_owned(),
            })
    }

    /// Normalized representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_prefixed_and_bare_numbers() {
        assert!(validate_phone_number("995500000001"));
        assert!(validate_phone_number("500000001"));
        assert!(validate_phone_number("599123456"));
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert!(!validate_phone_number(""));
        assert!(!validate_phone_number("995"));
        assert!(!validate_phone_number("99550000000"));
        assert!(!validate_phone_number("9955000000015993"));
        assert!(!validate_phone_number("50000000"));
        assert!(!validate_phone_number("5000000012"));
    }

    #[test]
    fn rejects_non_digit_characters() {
        assert!(!validate_phone_number("+995500000001"));
        assert!(!validate_phone_number("995 50000000"));
        assert!(!validate_phone_number("99550000000a"));
        assert!(!validate_phone_number("50000000١"));
        assert!(!validate_phone_number("995500000001\n"));
    }

    #[test]
    fn prefixing_does_not_change_the_verdict() {
        for bare in ["500000001", "12345678", "1234567890", "abcdefghi", "", "5 0000000"] {
            assert_eq!(
                validate_phone_number(bare),
                validate_phone_number(&format!("{COUNTRY_PREFIX}{bare}")),
                "verdict differs for {bare:?}"
            );
        }
    }

    #[test]
    fn number_starting_with_prefix_is_not_prefixed_again() {
        // Nine digits that already start with 995 leave only six subscriber digits.
        assert!(!validate_phone_number("995123456"));
    }

    #[test]
    fn parse_normalizes() {
        let phone = PhoneNumber::parse("500000001").unwrap();
        assert_eq!(phone.as_str(), "995500000001");
        assert_eq!(phone, PhoneNumber::parse("995500000001").unwrap());

        assert!(matches!(
            PhoneNumber::parse("12"),
            Err(ValidationError::InvalidPhoneNumber { input }) if input == "12"
        ));
    }
}
