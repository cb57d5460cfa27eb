use mailscrub_core::{CoreError, Record, SanitizedRecord};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use time::OffsetDateTime;

use crate::Result;

/// Tables holding message rows; both share the same columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Emails,
    RedactedEmails,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Emails => "emails",
            Table::RedactedEmails => "redacted_emails",
        }
    }
}

/// A decoded message row
#[derive(Debug, Clone)]
pub(crate) struct MessageRow {
    id: i64,
    subject: String,
    sender: String,
    recipient: String,
    body: String,
    time: OffsetDateTime,
}

impl MessageRow {
    /// Decode a row, rejecting NULL or non UTF-8 text columns
    pub(crate) fn decode(row: &SqliteRow) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            subject: text_column(row, "subject")?,
            sender: text_column(row, "email_from")?,
            recipient: text_column(row, "email_to")?,
            body: text_column(row, "body")?,
            time: time_column(row, "time")?,
        })
    }
}

fn text_column(row: &SqliteRow, column: &'static str) -> Result<String> {
    let raw: Option<Vec<u8>> = row.try_get(column)?;
    let raw = raw.ok_or_else(|| CoreError::invalid_input(column, "value is NULL"))?;

    String::from_utf8(raw)
        .map_err(|e| CoreError::invalid_input(column, format!("not UTF-8 text: {e}")).into())
}

fn time_column(row: &SqliteRow, column: &'static str) -> Result<OffsetDateTime> {
    let seconds: Option<i64> = row.try_get(column)?;
    let seconds = seconds.ok_or_else(|| CoreError::invalid_input(column, "value is NULL"))?;

    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|e| CoreError::invalid_input(column, e.to_string()).into())
}

impl From<MessageRow> for Record {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            subject: row.subject,
            sender: row.sender,
            recipient: row.recipient,
            body: row.body,
            time: row.time,
        }
    }
}

impl From<MessageRow> for SanitizedRecord {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            subject: row.subject,
            sender: row.sender,
            recipient: row.recipient,
            body: row.body,
            time: row.time,
        }
    }
}
