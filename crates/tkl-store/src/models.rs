//! Database row types — these map directly to SQLite rows.
//! Distinct from the tkl-types API models to keep the DB layer independent.

use chrono::{DateTime, Utc};
use tkl_types::Message;
use uuid::Uuid;

use crate::error::StoreError;

pub struct MessageRow {
    pub group_id: String,
    pub message_id: String,
    pub sender_id: String,
    pub timestamp_ms: i64,
    pub content: String,
}

impl MessageRow {
    /// A row that fails to parse means the stored data is corrupt, which is
    /// an engine failure from the caller's point of view.
    pub fn into_message(self) -> Result<Message, StoreError> {
        let group_id = parse_uuid("group_id", &self.group_id)?;
        let message_id = parse_uuid("message_id", &self.message_id)?;
        let sender_id = parse_uuid("sender_id", &self.sender_id)?;
        let timestamp = DateTime::<Utc>::from_timestamp_millis(self.timestamp_ms).ok_or_else(|| {
            StoreError::Unavailable(format!(
                "corrupt row: timestamp_ms {} out of range for message {}",
                self.timestamp_ms, self.message_id
            ))
        })?;

        Ok(Message {
            group_id,
            message_id,
            sender_id,
            timestamp,
            content: self.content,
        })
    }
}

fn parse_uuid(column: &str, value: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(value)
        .map_err(|e| StoreError::Unavailable(format!("corrupt row: bad {column} '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_parses_back_to_message() {
        let row = MessageRow {
            group_id: "6f2c0b1e-8a4d-4f6b-9c3e-2d1a5b7c9e0f".into(),
            message_id: "0d9e8f7a-6b5c-4d3e-a2b1-c0d9e8f7a6b5".into(),
            sender_id: "11111111-2222-3333-4444-555555555555".into(),
            timestamp_ms: 1_715_949_045_123,
            content: "hello".into(),
        };

        let msg = row.into_message().unwrap();
        assert_eq!(msg.timestamp.timestamp_millis(), 1_715_949_045_123);
        assert_eq!(msg.content, "hello");
    }

    #[test]
    fn corrupt_uuid_is_an_engine_failure() {
        let row = MessageRow {
            group_id: "not-a-uuid".into(),
            message_id: "0d9e8f7a-6b5c-4d3e-a2b1-c0d9e8f7a6b5".into(),
            sender_id: "11111111-2222-3333-4444-555555555555".into(),
            timestamp_ms: 0,
            content: "hello".into(),
        };

        assert!(matches!(
            row.into_message(),
            Err(StoreError::Unavailable(_))
        ));
    }
}
