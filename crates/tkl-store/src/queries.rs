use rusqlite::{Connection, ErrorCode, params};
use tkl_types::{Cursor, Message};
use uuid::Uuid;

use crate::MessageStore;
use crate::error::StoreError;
use crate::models::MessageRow;
use crate::validate::{validate_id, validate_limit, validate_message};

const MESSAGE_COLUMNS: &str = "group_id, message_id, sender_id, timestamp_ms, content";

impl MessageStore {
    /// One durable insert, at most one stored copy per (group_id, message_id).
    ///
    /// A second append with the same pair fails with `DuplicateMessage` and
    /// leaves the stored row untouched; a failed append leaves no visible
    /// partial record. Two concurrent appends racing on the same pair get a
    /// deterministic winner/loser outcome from the primary key.
    pub fn append(&self, msg: &Message) -> Result<(), StoreError> {
        validate_message(msg)?;

        self.with_conn(|conn| {
            let result = conn.execute(
                "INSERT INTO messages (group_id, message_id, sender_id, timestamp_ms, content)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    msg.group_id.to_string(),
                    msg.message_id.to_string(),
                    msg.sender_id.to_string(),
                    msg.timestamp.timestamp_millis(),
                    msg.content,
                ],
            );

            match result {
                Ok(_) => Ok(()),
                Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateMessage {
                    group_id: msg.group_id,
                    message_id: msg.message_id,
                }),
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Messages of a group in ascending (timestamp, message_id) order,
    /// strictly after `after` when a cursor is supplied.
    ///
    /// `limit` must be positive; values above [`crate::MAX_LIST_LIMIT`] are
    /// clamped. [`crate::DEFAULT_LIST_LIMIT`] is the conventional page size.
    ///
    /// Re-invoking with the last returned message's cursor resumes with no
    /// gaps or duplicates. A message appended after the cursor was issued
    /// shows up in a later page only if its (timestamp, message_id) sorts
    /// after the cursor — snapshot-style pagination, earlier-sorting rows
    /// are legitimately missed.
    pub fn list_by_group(
        &self,
        group_id: Uuid,
        after: Option<Cursor>,
        limit: u32,
    ) -> Result<Vec<Message>, StoreError> {
        validate_id("group_id", group_id)?;
        let limit = validate_limit(limit)?;

        self.with_conn(|conn| match after {
            Some(cursor) => query_messages_after(conn, group_id, cursor, limit),
            None => query_messages(conn, group_id, limit),
        })
    }

    /// Point lookup by the unique (group_id, message_id) pair.
    pub fn get(&self, group_id: Uuid, message_id: Uuid) -> Result<Option<Message>, StoreError> {
        validate_id("group_id", group_id)?;
        validate_id("message_id", message_id)?;

        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {MESSAGE_COLUMNS} FROM messages
                 WHERE group_id = ?1 AND message_id = ?2"
            );
            let row = conn
                .query_row(
                    &sql,
                    params![group_id.to_string(), message_id.to_string()],
                    read_row,
                )
                .optional()?;

            row.map(MessageRow::into_message).transpose()
        })
    }

    /// The greatest (timestamp, message_id) message of a group, if any.
    pub fn latest(&self, group_id: Uuid) -> Result<Option<Message>, StoreError> {
        validate_id("group_id", group_id)?;

        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {MESSAGE_COLUMNS} FROM messages
                 WHERE group_id = ?1
                 ORDER BY timestamp_ms DESC, message_id DESC
                 LIMIT 1"
            );
            let row = conn
                .query_row(&sql, params![group_id.to_string()], read_row)
                .optional()?;

            row.map(MessageRow::into_message).transpose()
        })
    }

    pub fn count_by_group(&self, group_id: Uuid) -> Result<u64, StoreError> {
        validate_id("group_id", group_id)?;

        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM messages WHERE group_id = ?1",
                params![group_id.to_string()],
                |row| row.get(0),
            )?;

            Ok(count as u64)
        })
    }
}

fn query_messages(conn: &Connection, group_id: Uuid, limit: u32) -> Result<Vec<Message>, StoreError> {
    let sql = format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages
         WHERE group_id = ?1
         ORDER BY timestamp_ms ASC, message_id ASC
         LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map(params![group_id.to_string(), limit], read_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(MessageRow::into_message).collect()
}

fn query_messages_after(
    conn: &Connection,
    group_id: Uuid,
    cursor: Cursor,
    limit: u32,
) -> Result<Vec<Message>, StoreError> {
    // Strict lower bound on the composite (timestamp_ms, message_id) key.
    // UUIDs are stored as lowercase hyphenated text, so text comparison
    // matches byte order and ties on timestamp break deterministically.
    let sql = format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages
         WHERE group_id = ?1
           AND (timestamp_ms > ?2 OR (timestamp_ms = ?2 AND message_id > ?3))
         ORDER BY timestamp_ms ASC, message_id ASC
         LIMIT ?4"
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map(
            params![
                group_id.to_string(),
                cursor.timestamp.timestamp_millis(),
                cursor.message_id.to_string(),
                limit,
            ],
            read_row,
        )?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(MessageRow::into_message).collect()
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        group_id: row.get(0)?,
        message_id: row.get(1)?,
        sender_id: row.get(2)?,
        timestamp_ms: row.get(3)?,
        content: row.get(4)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, StoreError>;
}

impl<T> OptionalExt<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, StoreError> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
