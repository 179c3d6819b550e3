use rayon::prelude::*;
use validator::ValidationError;

use crate::utils::{locale_utils::Messages, validation_utils::add_error};

const MIN_DIGITS: usize = 6;
const MAX_DIGITS: usize = 15;

fn is_not_empty(phone: &str, messages: &Messages) -> Result<(), String> {
    if phone.trim().is_empty() {
        Err(messages.get_validation_message("phone.empty", "Phone number must not be empty"))
    } else {
        Ok(())
    }
}

/// Digits with the usual separators; `+` only as the first character.
fn has_valid_chars(phone: &str, messages: &Messages) -> Result<(), String> {
    let number = phone.trim();
    let body = number.strip_prefix('+').unwrap_or(number);
    if body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')'))
    {
        Ok(())
    } else {
        Err(messages.get_validation_message(
            "phone.invalid_chars",
            "Phone number can only contain digits, spaces, hyphens and a leading +",
        ))
    }
}

fn has_digit_count(phone: &str, messages: &Messages) -> Result<(), String> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if (MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
        Ok(())
    } else {
        Err(messages.get_validation_message(
            "phone.digit_count",
            "Phone number must have between 6 and 15 digits",
        ))
    }
}

/// Local numbers carry no region to check against; only `+` numbers are
/// matched against the numbering plan.
fn is_dialable(phone: &str, messages: &Messages) -> Result<(), String> {
    let number = phone.trim();
    if !number.starts_with('+') {
        return Ok(());
    }
    match phonenumber::parse(None, number) {
        Ok(parsed) if phonenumber::is_valid(&parsed) => Ok(()),
        _ => Err(messages.get_validation_message(
            "phone.invalid_number",
            "Phone number is not a valid number",
        )),
    }
}

pub fn validate_phone_number(phone: &str, messages: &Messages) -> Result<(), ValidationError> {
    let validations = [is_not_empty, has_valid_chars, has_digit_count, is_dialable];

    let mut errors: Vec<String> = validations
        .par_iter()
        .filter_map(|f| f(phone, messages).err())
        .collect();
    errors.dedup();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(add_error("phone.invalid", errors.join(", "), phone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn fallback_messages() -> Messages {
        Messages {
            dashboard: Value::Null,
            validation: Value::Null,
        }
    }

    #[test]
    fn accepts_international_numbers() {
        let messages = fallback_messages();
        assert!(validate_phone_number("+1 650-253-0000", &messages).is_ok());
        assert!(validate_phone_number("+33612345678", &messages).is_ok());
    }

    #[test]
    fn accepts_local_numbers_as_entered() {
        let messages = fallback_messages();
        assert!(validate_phone_number("771234567", &messages).is_ok());
        assert!(validate_phone_number("77 123 45 67", &messages).is_ok());
        assert!(validate_phone_number("06 12 34 56 78", &messages).is_ok());
        assert!(validate_phone_number("(33) 821-0000", &messages).is_ok());
    }

    #[test]
    fn rejects_garbage_and_short_numbers() {
        let messages = fallback_messages();
        let garbage = validate_phone_number("+hello", &messages).unwrap_err();
        assert_eq!(garbage.code, "phone.invalid");
        assert!(garbage.message.unwrap().contains("digits, spaces"));

        let short = validate_phone_number("1234", &messages).unwrap_err();
        assert!(short.message.unwrap().contains("between 6 and 15"));

        assert!(validate_phone_number("77+1234567", &messages).is_err());
        assert!(validate_phone_number("   ", &messages).is_err());
    }

    #[test]
    fn international_numbers_must_fit_the_numbering_plan() {
        let messages = fallback_messages();
        let err = validate_phone_number("+999 123456", &messages).unwrap_err();
        assert!(err.message.unwrap().contains("not a valid number"));
    }
}
