//! `SQLite` record store.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use tracing::debug;

use super::RecordStore;
use crate::Result;
use crate::record::{
    MailKind, MailRecord, MailStatus, NewRecord, RecordId, RecordPatch, require_storable,
};

const SELECT_COLUMNS: &str = "SELECT id, room_number, initials, type, status, created_at FROM posts";

/// Record store backed by a `SQLite` database.
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Open the store at the given database path.
    ///
    /// Creates the database and tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                room_number TEXT NOT NULL,
                initials TEXT NOT NULL,
                type TEXT CHECK (type IN ('letter', 'package')),
                status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'received')),
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Guest lookups filter on both identifying fields
        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_posts_room_initials ON posts(room_number, initials)
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl RecordStore for SqliteRecordStore {
    async fn list(&self) -> Result<Vec<MailRecord>> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let records = rows
            .iter()
            .map(row_to_record)
            .collect::<sqlx::Result<Vec<_>>>()?;
        debug!("Listed {} mail records", records.len());
        Ok(records)
    }

    async fn list_exact(&self, room_number: &str, initials: &str) -> Result<Vec<MailRecord>> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE room_number = ? AND initials = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(room_number)
        .bind(initials)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(row_to_record)
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(Into::into)
    }

    async fn get(&self, id: RecordId) -> Result<Option<MailRecord>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(row_to_record)
            .transpose()
            .map_err(Into::into)
    }

    async fn insert(&self, record: &NewRecord) -> Result<MailRecord> {
        // Stored precision is microseconds; hand back exactly what was written
        let created_at = require_storable(record.created_at)?.trunc_subsecs(6);
        let result = sqlx::query(
            r"
            INSERT INTO posts (room_number, initials, type, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(&record.room_number)
        .bind(&record.initials)
        .bind(record.kind.as_db())
        .bind(MailStatus::Pending.as_str())
        .bind(to_stored(created_at))
        .execute(&self.pool)
        .await?;

        Ok(MailRecord {
            id: RecordId::new(result.last_insert_rowid()),
            room_number: record.room_number.clone(),
            initials: record.initials.clone(),
            kind: record.kind,
            status: MailStatus::Pending,
            created_at,
        })
    }

    async fn update(&self, id: RecordId, patch: &RecordPatch) -> Result<bool> {
        if patch.is_empty() {
            return Ok(self.get(id).await?.is_some());
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE posts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref room_number) = patch.room_number {
            separated.push("room_number = ");
            separated.push_bind_unseparated(room_number.clone());
        }
        if let Some(ref initials) = patch.initials {
            separated.push("initials = ");
            separated.push_bind_unseparated(initials.clone());
        }
        if let Some(kind) = patch.kind {
            separated.push("type = ");
            separated.push_bind_unseparated(kind.as_db());
        }
        if let Some(status) = patch.status {
            separated.push("status = ");
            separated.push_bind_unseparated(status.as_str());
        }
        if let Some(created_at) = patch.created_at {
            separated.push("created_at = ");
            separated.push_bind_unseparated(to_stored(require_storable(created_at)?));
        }

        query.push(" WHERE id = ");
        query.push_bind(id.0);

        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Fixed-width UTC text, so lexical order in SQL equals chronological order.
fn to_stored(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn from_stored(s: &str) -> sqlx::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn row_to_record(row: &SqliteRow) -> sqlx::Result<MailRecord> {
    let kind: Option<String> = row.try_get("type")?;
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(MailRecord {
        id: RecordId::new(row.try_get("id")?),
        room_number: row.try_get("room_number")?,
        initials: row.try_get("initials")?,
        kind: kind.as_deref().map_or(MailKind::Unspecified, MailKind::parse),
        status: MailStatus::parse(&status),
        created_at: from_stored(&created_at)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 12, 0, 0).unwrap()
    }

    async fn insert(
        store: &SqliteRecordStore,
        room: &str,
        initials: &str,
        at: DateTime<Utc>,
    ) -> MailRecord {
        let record = NewRecord::new(room, initials, MailKind::Unspecified)
            .unwrap()
            .created_at(at);
        store.insert(&record).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = SqliteRecordStore::in_memory().await.unwrap();

        let record = NewRecord::new("210", "kb", MailKind::Package).unwrap();
        let created = store.insert(&record).await.unwrap();

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.status, MailStatus::Pending);
        assert_eq!(fetched.initials, "KB");
    }

    #[tokio::test]
    async fn test_unspecified_kind_stored_as_null() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        let created = insert(&store, "101", "AB", day(1)).await;

        let raw: Option<String> = sqlx::query_scalar("SELECT type FROM posts WHERE id = ?")
            .bind(created.id.0)
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert!(raw.is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        insert(&store, "101", "AB", day(1)).await;
        insert(&store, "103", "EF", day(3)).await;
        insert(&store, "102", "CD", day(2)).await;

        let rooms: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.room_number)
            .collect();
        assert_eq!(rooms, ["103", "102", "101"]);
    }

    #[tokio::test]
    async fn test_list_orders_by_instant_not_text() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        // Sub-second difference must still order correctly
        let base = day(4);
        insert(&store, "1", "A", base).await;
        insert(&store, "2", "B", base + Duration::milliseconds(5)).await;

        let records = store.list().await.unwrap();
        assert_eq!(records[0].room_number, "2");
    }

    #[tokio::test]
    async fn test_list_exact_has_no_substring_matches() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        insert(&store, "210", "KB", day(1)).await;
        insert(&store, "21", "KB", day(2)).await;
        insert(&store, "21", "KBX", day(3)).await;

        let found = store.list_exact("21", "KB").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].room_number, "21");
        assert_eq!(found[0].initials, "KB");
    }

    #[tokio::test]
    async fn test_update_fields() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        let created = insert(&store, "101", "AB", day(1)).await;

        let patch = RecordPatch::new()
            .room_number("105")
            .kind(MailKind::Letter)
            .status(MailStatus::Received)
            .created_at(day(9));
        assert!(store.update(created.id, &patch).await.unwrap());

        let updated = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(updated.room_number, "105");
        assert_eq!(updated.initials, "AB");
        assert_eq!(updated.kind, MailKind::Letter);
        assert_eq!(updated.status, MailStatus::Received);
        assert_eq!(updated.created_at, day(9));
    }

    #[tokio::test]
    async fn test_update_back_to_unspecified() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        let record = NewRecord::new("7", "ZZ", MailKind::Package).unwrap();
        let created = store.insert(&record).await.unwrap();

        let patch = RecordPatch::new().kind(MailKind::Unspecified);
        store.update(created.id, &patch).await.unwrap();

        let updated = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(updated.kind, MailKind::Unspecified);
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        let patch = RecordPatch::new().status(MailStatus::Received);
        assert!(!store.update(RecordId::new(99), &patch).await.unwrap());
        assert!(!store.update(RecordId::new(99), &RecordPatch::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_value_update_still_matches() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        let created = insert(&store, "101", "AB", day(1)).await;
        let patch = RecordPatch::new().status(MailStatus::Received);

        assert!(store.update(created.id, &patch).await.unwrap());
        assert!(store.update(created.id, &patch).await.unwrap());
    }

    #[tokio::test]
    async fn test_unstorable_timestamp_is_rejected() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        let created = insert(&store, "101", "AB", day(1)).await;
        let far_future = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();

        let patch = RecordPatch::new().created_at(far_future);
        let err = store.update(created.id, &patch).await.unwrap_err();
        assert!(err.is_validation());

        let record = NewRecord::new("102", "CD", MailKind::Letter)
            .unwrap()
            .created_at(far_future);
        assert!(store.insert(&record).await.unwrap_err().is_validation());

        // Nothing was written, so listing still decodes every row
        let records = store.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].created_at, day(1));
    }

    #[test]
    fn test_stored_timestamp_round_trip() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let stored = to_stored(dt);
        assert_eq!(stored, "2024-01-15T10:30:00.000000Z");
        assert_eq!(from_stored(&stored).unwrap(), dt);
    }
}
