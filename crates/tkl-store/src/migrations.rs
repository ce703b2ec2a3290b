use rusqlite::Connection;
use tracing::info;

use crate::error::StoreError;

/// Idempotent schema setup — every statement checks for existence first.
///
/// Uniqueness is scoped to (group_id, message_id) via the primary key. The
/// secondary index only carries the (group_id, timestamp, message_id) sort
/// order for range scans; it must stay non-unique, or a message resubmitted
/// under a changed timestamp would slip past the pair constraint.
pub fn run(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS messages (
            group_id      TEXT NOT NULL,
            message_id    TEXT NOT NULL,
            sender_id     TEXT NOT NULL,
            timestamp_ms  INTEGER NOT NULL,
            content       TEXT NOT NULL,
            PRIMARY KEY (group_id, message_id)
        );

        CREATE INDEX IF NOT EXISTS idx_messages_group_order
            ON messages(group_id, timestamp_ms, message_id);
        ",
    )?;

    info!("Message store schema ensured");
    Ok(())
}
