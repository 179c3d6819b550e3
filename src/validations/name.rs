use rayon::prelude::*;
use validator::ValidationError;

use crate::utils::{locale_utils::Messages, validation_utils::add_error};

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 100;

fn is_joiner(c: char) -> bool {
    matches!(c, '-' | '\'' | '’')
}

/// One whitespace-separated part: letters joined by single hyphens or
/// apostrophes ("Ba-Diallo", "N'Diaye"), or an initial ("B.").
fn is_name_part(part: &str) -> bool {
    let mut chars = part.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(initial), Some('.'), None) => return initial.is_alphabetic(),
        (Some(first), _, _) if first.is_alphabetic() => {}
        _ => return false,
    }

    let mut previous = ' ';
    for c in part.chars() {
        if is_joiner(c) {
            if !previous.is_alphabetic() {
                return false;
            }
        } else if !c.is_alphabetic() {
            return false;
        }
        previous = c;
    }
    previous.is_alphabetic()
}

fn is_not_empty(name: &str, messages: &Messages) -> Result<(), String> {
    if name.trim().is_empty() {
        Err(messages.get_validation_message("name.empty", "Name must not be empty"))
    } else {
        Ok(())
    }
}

fn has_length(name: &str, messages: &Messages) -> Result<(), String> {
    let length = name.trim().chars().count();
    if (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(messages.get_validation_message(
            "name.length",
            &format!(
                "Name must be between {} and {} characters long",
                MIN_NAME_LENGTH, MAX_NAME_LENGTH
            ),
        ))
    }
}

fn has_well_formed_parts(name: &str, messages: &Messages) -> Result<(), String> {
    if name.split_whitespace().all(is_name_part) {
        Ok(())
    } else {
        Err(messages.get_validation_message(
            "name.malformed",
            "Each part of a name must be letters joined by - or ', or an initial such as B.",
        ))
    }
}

pub fn validate_name(name: &str, messages: &Messages) -> Result<(), ValidationError> {
    let validations = [is_not_empty, has_length, has_well_formed_parts];

    let errors: Vec<String> = validations
        .par_iter()
        .filter_map(|f| f(name, messages).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(add_error("name.invalid", errors.join(", "), name))
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
    fn accepts_compound_elided_and_abbreviated_names() {
        let messages = fallback_messages();
        for name in [
            "Aïssatou",
            "Ba-Diallo",
            "N'Diaye",
            "N’Diaye",
            "Mame Diarra",
            "Mame B.",
            "A. Diop",
        ] {
            assert!(validate_name(name, &messages).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_misplaced_punctuation() {
        let messages = fallback_messages();
        for name in [".Awa", "Awa-", "Ba--Diallo", "'Ndeye", "B.B", "Mame BA."] {
            assert!(validate_name(name, &messages).is_err(), "{name}");
        }
    }

    #[test]
    fn reports_every_failed_rule_at_once() {
        let messages = fallback_messages();
        let err = validate_name("4", &messages).unwrap_err();
        assert_eq!(err.code, "name.invalid");
        let message = err.message.unwrap();
        assert!(message.contains("between 2 and 100"));
        assert!(message.contains("an initial"));
    }
}
