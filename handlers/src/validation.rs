//! Field checks shared by the message and query services.

use message_core::{FieldError, MessageInput, Sender, ServiceError, ValidationErrors};

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub message_id: String,
    pub session_id: String,
    pub content: String,
    pub sender: Sender,
}

/// Checks every field of a create request and reports all failures at once.
pub fn validate_input(input: MessageInput) -> Result<ValidatedInput, ServiceError> {
    let mut errors = ValidationErrors::new();

    require_non_empty(&mut errors, "message_id", &input.message_id);
    require_non_empty(&mut errors, "session_id", &input.session_id);
    require_non_empty(&mut errors, "content", &input.content);

    let sender = parse_sender(&input.sender);
    if let Err(e) = &sender {
        errors.push(e.field.clone(), e.reason.clone());
    }

    match (errors.into_result(), sender) {
        (Ok(()), Ok(sender)) => Ok(ValidatedInput {
            message_id: input.message_id,
            session_id: input.session_id,
            content: input.content,
            sender,
        }),
        (Err(e), _) => Err(e),
        (Ok(()), Err(e)) => Err(ServiceError::Validation(e.into())),
    }
}

pub fn require_non_empty(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.is_empty() {
        errors.push(field, "must not be empty");
    }
}

pub fn parse_sender(value: &str) -> Result<Sender, FieldError> {
    value
        .parse()
        .map_err(|_| FieldError::new("sender", "must be 'user' or 'system'"))
}

/// Resolves an optional pagination parameter, rejecting negatives. Values past
/// `u32::MAX` are clamped; no session holds that many messages.
pub fn pagination_value(field: &str, value: Option<i64>, default: u32) -> Result<u32, FieldError> {
    match value {
        None => Ok(default),
        Some(v) if v < 0 => Err(FieldError::new(field, "must be a non-negative integer")),
        Some(v) => Ok(u32::try_from(v).unwrap_or(u32::MAX)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_input_ok() {
        let validated = validate_input(MessageInput::new("m1", "s1", "Hola", "system")).unwrap();
        assert_eq!(validated.sender, Sender::System);
        assert_eq!(validated.content, "Hola");
    }

    #[test]
    fn test_validate_input_reports_every_field() {
        let err = validate_input(MessageInput::new("", "", "", "robot")).unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                for field in ["message_id", "session_id", "content", "sender"] {
                    assert!(errors.contains(field), "missing {}", field);
                }
                assert_eq!(errors.fields().len(), 4);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_only_values_are_not_empty() {
        let validated = validate_input(MessageInput::new(" ", "  ", "   ", "user")).unwrap();
        assert_eq!(validated.message_id, " ");
        assert_eq!(validated.session_id, "  ");
        assert_eq!(validated.content, "   ");
    }

    #[test]
    fn test_pagination_value() {
        assert_eq!(pagination_value("limit", None, 10).unwrap(), 10);
        assert_eq!(pagination_value("limit", Some(0), 10).unwrap(), 0);
        assert_eq!(pagination_value("offset", Some(25), 0).unwrap(), 25);
        assert_eq!(pagination_value("offset", Some(-1), 0).unwrap_err().field, "offset");
        assert_eq!(pagination_value("limit", Some(5_000_000_000), 10).unwrap(), u32::MAX);
        assert_eq!(pagination_value("offset", Some(i64::MAX), 0).unwrap(), u32::MAX);
    }
}
