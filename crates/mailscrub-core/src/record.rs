//! Message record domain models

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Result;

/// A stored message as extracted from the mail service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub subject: String,
    #[serde(rename = "from")]
    pub sender: String,
    #[serde(rename = "to")]
    pub recipient: String,
    pub body: String,
    #[serde(with = "time::serde::timestamp")]
    pub time: OffsetDateTime,
}

impl Record {
    /// Parse one line of the JSON-lines import format
    pub fn from_json(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Publishable counterpart of a [`Record`].
///
/// Shares the source record's `id` and `time`; every textual field holds its
/// redacted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedRecord {
    pub id: i64,
    pub subject: String,
    #[serde(rename = "from")]
    pub sender: String,
    #[serde(rename = "to")]
    pub recipient: String,
    pub body: String,
    #[serde(with = "time::serde::timestamp")]
    pub time: OffsetDateTime,
}

/// A record column, as named in report configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Subject,
    EmailFrom,
    EmailTo,
    Time,
    Body,
}

/// Read access shared by raw and sanitized records
pub trait MessageFields {
    fn id(&self) -> i64;
    fn body(&self) -> &str;

    /// Display value of a single column
    fn field(&self, field: Field) -> String;
}

macro_rules! impl_message_fields {
    ($ty:ty) => {
        impl MessageFields for $ty {
            fn id(&self) -> i64 {
                self.id
            }

            fn body(&self) -> &str {
                &self.body
            }

            fn field(&self, field: Field) -> String {
                match field {
                    Field::Id => self.id.to_string(),
                    Field::Subject => self.subject.clone(),
                    Field::EmailFrom => self.sender.clone(),
                    Field::EmailTo => self.recipient.clone(),
                    Field::Time => self.time.to_string(),
                    Field::Body => self.body.clone(),
                }
            }
        }
    };
}

impl_message_fields!(Record);
impl_message_fields!(SanitizedRecord);
