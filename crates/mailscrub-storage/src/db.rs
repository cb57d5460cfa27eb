//! Database operations

use std::path::PathBuf;

use mailscrub_core::{Record, SanitizedRecord};
use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use time::OffsetDateTime;

use crate::models::{MessageRow, Table};
use crate::{Result, StorageError};

const MIGRATIONS: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS emails (
        id INTEGER PRIMARY KEY,
        subject TEXT,
        email_from TEXT,
        email_to TEXT,
        time INTEGER,
        body TEXT
    )",
    "CREATE TABLE IF NOT EXISTS redacted_emails (
        id INTEGER PRIMARY KEY REFERENCES emails(id),
        subject TEXT NOT NULL,
        email_from TEXT NOT NULL,
        email_to TEXT NOT NULL,
        time INTEGER NOT NULL,
        body TEXT NOT NULL
    )",
];

const COLUMNS: &str = "id, subject, email_from, email_to, time, body";

const INSERT_EMAIL: &str =
    "INSERT INTO emails (id, subject, email_from, email_to, time, body) VALUES (?, ?, ?, ?, ?, ?)";
const UPSERT_REDACTED: &str = "INSERT OR REPLACE INTO redacted_emails \
    (id, subject, email_from, email_to, time, body) VALUES (?, ?, ?, ?, ?, ?)";

/// Main storage interface
#[derive(Debug, Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open the database (default location when `db_path` is `None`) and run
    /// migrations
    pub async fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = match db_path {
            Some(path) => path,
            None => Self::default_path()?,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let storage = Self { pool };
        storage.migrate().await?;
        Ok(storage)
    }

    pub fn default_path() -> Result<PathBuf> {
        directories::ProjectDirs::from("com", "mailscrub", "mailscrub")
            .map(|dirs| dirs.data_dir().join("store.db"))
            .ok_or_else(|| StorageError::Other(anyhow::anyhow!("could not resolve a data directory")))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<()> {
        for statement in MIGRATIONS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn insert_email(&self, record: &Record) -> Result<()> {
        bind_message(
            INSERT_EMAIL,
            record.id,
            &record.subject,
            &record.sender,
            &record.recipient,
            record.time,
            &record.body,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a batch of raw records in one transaction
    pub async fn insert_emails(&self, records: &[Record]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            bind_message(
                INSERT_EMAIL,
                record.id,
                &record.subject,
                &record.sender,
                &record.recipient,
                record.time,
                &record.body,
            )
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(records.len())
    }

    pub async fn get_email(&self, id: i64) -> Result<Option<Record>> {
        Ok(self.fetch_one(Table::Emails, id).await?.map(Record::from))
    }

    /// Up to `limit` raw records with an id above `after_id`, in id order
    pub async fn emails_after(&self, after_id: i64, limit: u32) -> Result<Vec<Record>> {
        let rows = self.fetch_after(Table::Emails, after_id, limit).await?;
        Ok(rows.into_iter().map(Record::from).collect())
    }

    pub async fn count_emails(&self) -> Result<i64> {
        self.count(Table::Emails).await
    }

    /// Write sanitized records in a single transaction.
    ///
    /// Existing rows with the same id are replaced. Nothing is written unless
    /// every record is.
    pub async fn save_redacted(&self, records: &[SanitizedRecord]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            bind_message(
                UPSERT_REDACTED,
                record.id,
                &record.subject,
                &record.sender,
                &record.recipient,
                record.time,
                &record.body,
            )
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(records.len())
    }

    pub async fn get_redacted(&self, id: i64) -> Result<Option<SanitizedRecord>> {
        Ok(self
            .fetch_one(Table::RedactedEmails, id)
            .await?
            .map(SanitizedRecord::from))
    }

    /// Up to `limit` sanitized records with an id above `after_id`, in id order
    pub async fn redacted_after(&self, after_id: i64, limit: u32) -> Result<Vec<SanitizedRecord>> {
        let rows = self.fetch_after(Table::RedactedEmails, after_id, limit).await?;
        Ok(rows.into_iter().map(SanitizedRecord::from).collect())
    }

    pub async fn count_redacted(&self) -> Result<i64> {
        self.count(Table::RedactedEmails).await
    }

    async fn fetch_one(&self, table: Table, id: i64) -> Result<Option<MessageRow>> {
        let sql = format!("SELECT {COLUMNS} FROM {} WHERE id = ?", table.as_str());
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(MessageRow::decode).transpose()
    }

    async fn fetch_after(&self, table: Table, after_id: i64, limit: u32) -> Result<Vec<MessageRow>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE id > ? ORDER BY id LIMIT ?",
            table.as_str()
        );
        let rows = sqlx::query(&sql)
            .bind(after_id)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(MessageRow::decode).collect()
    }

    async fn count(&self, table: Table) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

fn bind_message<'q>(
    sql: &'q str,
    id: i64,
    subject: &'q str,
    sender: &'q str,
    recipient: &'q str,
    time: OffsetDateTime,
    body: &'q str,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    sqlx::query(sql)
        .bind(id)
        .bind(subject)
        .bind(sender)
        .bind(recipient)
        .bind(time.unix_timestamp())
        .bind(body)
}
