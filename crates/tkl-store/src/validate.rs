use tkl_types::Message;
use uuid::Uuid;

use crate::MAX_LIST_LIMIT;
use crate::error::StoreError;

/// Every field is required; the nil UUID counts as absent. Content is
/// otherwise opaque — no size limit, no formatting rules.
pub fn validate_message(msg: &Message) -> Result<(), StoreError> {
    validate_id("group_id", msg.group_id)?;
    validate_id("message_id", msg.message_id)?;
    validate_id("sender_id", msg.sender_id)?;

    if msg.content.is_empty() {
        return Err(StoreError::Validation("content must not be empty".into()));
    }

    Ok(())
}

pub fn validate_id(field: &str, id: Uuid) -> Result<(), StoreError> {
    if id.is_nil() {
        return Err(StoreError::Validation(format!(
            "{field} must be a non-nil UUID"
        )));
    }

    Ok(())
}

/// Zero is rejected; oversized limits are clamped to `MAX_LIST_LIMIT`.
pub fn validate_limit(limit: u32) -> Result<u32, StoreError> {
    if limit == 0 {
        return Err(StoreError::Validation("limit must be positive".into()));
    }

    Ok(limit.min(MAX_LIST_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn valid_message() -> Message {
        Message {
            group_id: Uuid::new_v4(),
            message_id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            timestamp: DateTime::<Utc>::from_timestamp_millis(1_715_949_045_123).unwrap(),
            content: "hi".into(),
        }
    }

    #[test]
    fn accepts_a_fully_populated_message() {
        assert!(validate_message(&valid_message()).is_ok());
    }

    #[test]
    fn rejects_nil_identifiers() {
        for field in 0..3 {
            let mut msg = valid_message();
            match field {
                0 => msg.group_id = Uuid::nil(),
                1 => msg.message_id = Uuid::nil(),
                _ => msg.sender_id = Uuid::nil(),
            }
            assert!(matches!(
                validate_message(&msg),
                Err(StoreError::Validation(_))
            ));
        }
    }

    #[test]
    fn rejects_empty_content() {
        let mut msg = valid_message();
        msg.content.clear();
        assert!(matches!(
            validate_message(&msg),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn limit_zero_rejected_and_oversized_clamped() {
        assert!(matches!(
            validate_limit(0),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(validate_limit(10).unwrap(), 10);
        assert_eq!(validate_limit(u32::MAX).unwrap(), MAX_LIST_LIMIT);
    }
}
