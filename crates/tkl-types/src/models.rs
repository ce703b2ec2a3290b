use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chat message as submitted by a caller and returned by the store.
///
/// The timestamp is caller-supplied, not server-generated; the store keeps
/// millisecond precision and does not assume monotonicity across senders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub group_id: Uuid,
    pub message_id: Uuid,
    pub sender_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

impl Message {
    /// The pagination cursor that resumes listing strictly after this message.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            timestamp: self.timestamp,
            message_id: self.message_id,
        }
    }
}

/// Exclusive lower bound for paginated listing: messages are returned in
/// ascending (timestamp, message_id) order, starting after this position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub timestamp: DateTime<Utc>,
    pub message_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Message {
        Message {
            group_id: Uuid::parse_str("6f2c0b1e-8a4d-4f6b-9c3e-2d1a5b7c9e0f").unwrap(),
            message_id: Uuid::parse_str("0d9e8f7a-6b5c-4d3e-a2b1-c0d9e8f7a6b5").unwrap(),
            sender_id: Uuid::parse_str("11111111-2222-3333-4444-555555555555").unwrap(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 17, 12, 30, 45).unwrap(),
            content: "hello".into(),
        }
    }

    #[test]
    fn message_json_round_trip() {
        let msg = sample();
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn message_json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        for field in ["group_id", "message_id", "sender_id", "timestamp", "content"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn cursor_points_at_message_position() {
        let msg = sample();
        let cursor = msg.cursor();
        assert_eq!(cursor.timestamp, msg.timestamp);
        assert_eq!(cursor.message_id, msg.message_id);
    }
}
