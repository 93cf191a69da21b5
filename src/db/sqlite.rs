use crate::db::schema::{Bucket, SQLITE_INIT};
use crate::error::BlotterError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, Transaction};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Process-wide handle on the bucket store.
///
/// Readers run concurrently on WAL snapshots. Writers additionally take the
/// `writer` lock for the whole lifetime of their transaction, so at most one
/// write transaction is open at any time.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
    writer: Arc<Mutex<()>>,
}

impl Store {
    /// Open (creating if missing) the database at `database_url` and apply the schema.
    pub async fn open(database_url: &str) -> Result<Self, BlotterError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let store = Self::new(pool);
        store.init_schema().await?;
        debug!(database_url, "store opened");
        Ok(store)
    }

    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), BlotterError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Begin a read-only transaction.
    pub async fn view(&self) -> Result<Tx, BlotterError> {
        let inner = self.pool.begin().await?;
        Ok(Tx {
            inner,
            writer: None,
        })
    }

    /// Begin a read-write transaction, waiting for any other writer to finish first.
    pub async fn update(&self) -> Result<Tx, BlotterError> {
        let guard = self.writer.clone().lock_owned().await;
        let inner = self.pool.begin().await?;
        Ok(Tx {
            inner,
            writer: Some(guard),
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A transaction over the bucket store.
///
/// Dropping a `Tx` without calling [`Tx::commit`] rolls it back, so an early
/// `?` return inside a write leaves the store untouched.
pub struct Tx {
    // declared before `writer` so the rollback is queued before the lock is released
    inner: Transaction<'static, Sqlite>,
    writer: Option<OwnedMutexGuard<()>>,
}

impl Tx {
    pub fn writable(&self) -> bool {
        self.writer.is_some()
    }

    pub async fn get(&mut self, bucket: Bucket, key: &[u8]) -> Result<Option<Vec<u8>>, BlotterError> {
        let value = sqlx::query_scalar::<_, Vec<u8>>(
            "SELECT value FROM entries WHERE bucket = ? AND key = ?",
        )
        .bind(bucket.name())
        .bind(key)
        .fetch_optional(&mut *self.inner)
        .await?;
        Ok(value)
    }

    /// Every (key, value) pair in `bucket`, ascending by key bytes.
    pub async fn scan(&mut self, bucket: Bucket) -> Result<Vec<(Vec<u8>, Vec<u8>)>, BlotterError> {
        let rows = sqlx::query_as::<_, (Vec<u8>, Vec<u8>)>(
            "SELECT key, value FROM entries WHERE bucket = ? ORDER BY key",
        )
        .bind(bucket.name())
        .fetch_all(&mut *self.inner)
        .await?;
        Ok(rows)
    }

    pub async fn put(&mut self, bucket: Bucket, key: &[u8], value: &[u8]) -> Result<(), BlotterError> {
        self.ensure_writable()?;
        sqlx::query(
            r#"
            INSERT INTO entries (bucket, key, value) VALUES (?, ?, ?)
            ON CONFLICT(bucket, key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(bucket.name())
        .bind(key)
        .bind(value)
        .execute(&mut *self.inner)
        .await?;
        Ok(())
    }

    /// Remove `key` from `bucket`. Returns whether a record was actually removed.
    pub async fn delete(&mut self, bucket: Bucket, key: &[u8]) -> Result<bool, BlotterError> {
        self.ensure_writable()?;
        let result = sqlx::query("DELETE FROM entries WHERE bucket = ? AND key = ?")
            .bind(bucket.name())
            .bind(key)
            .execute(&mut *self.inner)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Next value of the bucket's sequence. Starts at 1 and never repeats,
    /// regardless of how many records the bucket currently holds.
    pub async fn next_sequence(&mut self, bucket: Bucket) -> Result<i64, BlotterError> {
        self.ensure_writable()?;
        let value = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO sequences (bucket, value) VALUES (?, 1)
            ON CONFLICT(bucket) DO UPDATE SET value = value + 1
            RETURNING value
            "#,
        )
        .bind(bucket.name())
        .fetch_one(&mut *self.inner)
        .await?;
        Ok(value)
    }

    pub async fn commit(self) -> Result<(), BlotterError> {
        self.inner.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), BlotterError> {
        self.inner.rollback().await?;
        Ok(())
    }

    fn ensure_writable(&self) -> Result<(), BlotterError> {
        if self.writable() {
            Ok(())
        } else {
            Err(BlotterError::ReadOnlyTransaction)
        }
    }
}
