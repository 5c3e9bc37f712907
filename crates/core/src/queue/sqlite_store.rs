//! SQLite-backed queue store implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{NewQueue, Queue, QueueError, QueueStore, QueueUpdate};

const SELECT_COLUMNS: &str =
    "SELECT uuid, name, description, location, date_created, voided, void_reason, date_voided FROM queues";

/// SQLite-backed queue store.
pub struct SqliteQueueStore {
    conn: Mutex<Connection>,
}

impl SqliteQueueStore {
    /// Create a new SQLite queue store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, QueueError> {
        let conn = Connection::open(path).map_err(|e| QueueError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite queue store (useful for testing).
    pub fn in_memory() -> Result<Self, QueueError> {
        let conn =
            Connection::open_in_memory().map_err(|e| QueueError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), QueueError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS queues (
                uuid TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                location TEXT,
                date_created TEXT NOT NULL,
                voided INTEGER NOT NULL DEFAULT 0,
                void_reason TEXT,
                date_voided TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_queues_name ON queues(name);
            CREATE INDEX IF NOT EXISTS idx_queues_voided ON queues(voided);
            "#,
        )
        .map_err(|e| QueueError::Database(e.to_string()))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, QueueError> {
        self.conn
            .lock()
            .map_err(|e| QueueError::Database(format!("connection lock poisoned: {}", e)))
    }

    fn row_to_queue(row: &rusqlite::Row) -> rusqlite::Result<Queue> {
        let date_created_str: String = row.get(4)?;
        let date_voided_str: Option<String> = row.get(7)?;

        // Timestamps are always written as RFC 3339 by this store
        let date_created = parse_timestamp(&date_created_str).unwrap_or_else(Utc::now);
        let date_voided = date_voided_str.as_deref().and_then(parse_timestamp);

        Ok(Queue {
            uuid: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            location: row.get(3)?,
            date_created,
            voided: row.get::<_, i64>(5)? != 0,
            void_reason: row.get(6)?,
            date_voided,
        })
    }

    fn fetch(conn: &Connection, uuid: &str) -> Result<Option<Queue>, QueueError> {
        conn.query_row(
            &format!("{} WHERE uuid = ?", SELECT_COLUMNS),
            params![uuid],
            Self::row_to_queue,
        )
        .optional()
        .map_err(|e| QueueError::Database(e.to_string()))
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

impl QueueStore for SqliteQueueStore {
    fn create(&self, queue: NewQueue) -> Result<Queue, QueueError> {
        let conn = self.conn()?;

        let uuid = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO queues (uuid, name, description, location, date_created, voided) VALUES (?, ?, ?, ?, ?, 0)",
            params![
                uuid,
                queue.name,
                queue.description,
                queue.location,
                now.to_rfc3339(),
            ],
        )
        .map_err(|e| QueueError::Database(e.to_string()))?;

        Ok(Queue {
            uuid,
            name: queue.name,
            description: queue.description,
            location: queue.location,
            date_created: now,
            voided: false,
            void_reason: None,
            date_voided: None,
        })
    }

    fn get(&self, uuid: &str) -> Result<Option<Queue>, QueueError> {
        let conn = self.conn()?;
        Self::fetch(&conn, uuid)
    }

    fn list(&self, include_voided: bool) -> Result<Vec<Queue>, QueueError> {
        let conn = self.conn()?;

        let sql = if include_voided {
            format!("{} ORDER BY name ASC, date_created ASC", SELECT_COLUMNS)
        } else {
            format!(
                "{} WHERE voided = 0 ORDER BY name ASC, date_created ASC",
                SELECT_COLUMNS
            )
        };

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| QueueError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_queue)
            .map_err(|e| QueueError::Database(e.to_string()))?;

        let mut queues = Vec::new();
        for row_result in rows {
            queues.push(row_result.map_err(|e| QueueError::Database(e.to_string()))?);
        }

        Ok(queues)
    }

    fn update(&self, uuid: &str, update: QueueUpdate) -> Result<Queue, QueueError> {
        let conn = self.conn()?;

        let mut queue =
            Self::fetch(&conn, uuid)?.ok_or_else(|| QueueError::NotFound(uuid.to_string()))?;
        update.apply_to(&mut queue);

        conn.execute(
            "UPDATE queues SET name = ?, description = ?, location = ? WHERE uuid = ?",
            params![queue.name, queue.description, queue.location, uuid],
        )
        .map_err(|e| QueueError::Database(e.to_string()))?;

        Ok(queue)
    }

    fn void(&self, uuid: &str, reason: &str) -> Result<Queue, QueueError> {
        let conn = self.conn()?;

        let mut queue =
            Self::fetch(&conn, uuid)?.ok_or_else(|| QueueError::NotFound(uuid.to_string()))?;

        if queue.voided {
            return Err(QueueError::InvalidState {
                uuid: uuid.to_string(),
                operation: "void".to_string(),
                reason: "queue is already voided".to_string(),
            });
        }

        let now = Utc::now();
        conn.execute(
            "UPDATE queues SET voided = 1, void_reason = ?, date_voided = ? WHERE uuid = ?",
            params![reason, now.to_rfc3339(), uuid],
        )
        .map_err(|e| QueueError::Database(e.to_string()))?;

        queue.voided = true;
        queue.void_reason = Some(reason.to_string());
        queue.date_voided = Some(now);
        Ok(queue)
    }

    fn purge(&self, uuid: &str) -> Result<(), QueueError> {
        let conn = self.conn()?;

        let deleted = conn
            .execute("DELETE FROM queues WHERE uuid = ?", params![uuid])
            .map_err(|e| QueueError::Database(e.to_string()))?;

        if deleted == 0 {
            return Err(QueueError::NotFound(uuid.to_string()));
        }
        Ok(())
    }
}
