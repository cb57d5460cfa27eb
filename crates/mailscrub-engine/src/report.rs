//! Paged HTML reports over the record store

use std::path::{Path, PathBuf};

use anyhow::Result;
use mailscrub_core::{Column, MessageFields, ReportRow, ReportSource, render_table};
use mailscrub_storage::Storage;
use tracing::{debug, info};

use crate::DEFAULT_PAGE_SIZE;

/// Directory under the report root holding one file per message body
const FILES_DIR: &str = "files";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub pages: usize,
    pub records: usize,
}

pub struct ReportWriter {
    storage: Storage,
    root: PathBuf,
    source: ReportSource,
    columns: Vec<Column>,
    page_size: u32,
}

struct PageEntry {
    id: i64,
    body: String,
    row: ReportRow,
}

impl ReportWriter {
    pub fn new(
        storage: Storage,
        root: impl Into<PathBuf>,
        source: ReportSource,
        columns: Vec<Column>,
    ) -> Self {
        Self {
            storage,
            root: root.into(),
            source,
            columns,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write every body file and index page, overwriting earlier output
    pub async fn write(&self) -> Result<ReportSummary> {
        let files_dir = self.root.join(FILES_DIR);
        tokio::fs::create_dir_all(&files_dir).await?;

        let mut summary = ReportSummary::default();
        let mut after_id = i64::MIN;
        let mut first = 1;

        loop {
            let entries = self.next_page(after_id).await?;
            let Some(last) = entries.last().map(|entry| entry.id) else {
                break;
            };

            for entry in &entries {
                let name = body_file_name(entry.id, self.source);
                tokio::fs::write(files_dir.join(name), &entry.body).await?;
            }

            let count = entries.len();
            let rows: Vec<ReportRow> = entries.into_iter().map(|entry| entry.row).collect();
            if let Some(html) = render_table(&self.columns, &rows) {
                let page = self.root.join(page_file_name(first, last));
                tokio::fs::write(&page, html).await?;
                debug!(page = %page.display(), records = count, "Wrote report page");
                summary.pages += 1;
            }

            summary.records += count;
            first = last.saturating_add(1);
            after_id = last;

            if count < self.page_size as usize {
                break;
            }
        }

        info!(
            root = %self.root.display(),
            table = self.source.table_name(),
            pages = summary.pages,
            records = summary.records,
            "Report written"
        );
        Ok(summary)
    }

    async fn next_page(&self, after_id: i64) -> Result<Vec<PageEntry>> {
        let entries: Vec<PageEntry> = match self.source {
            ReportSource::Emails => self
                .storage
                .emails_after(after_id, self.page_size)
                .await?
                .iter()
                .map(|record| self.entry(record))
                .collect(),
            ReportSource::Redacted => self
                .storage
                .redacted_after(after_id, self.page_size)
                .await?
                .iter()
                .map(|record| self.entry(record))
                .collect(),
        };
        Ok(entries)
    }

    fn entry(&self, record: &impl MessageFields) -> PageEntry {
        let link = format!("{FILES_DIR}/{}", body_file_name(record.id(), self.source));
        PageEntry {
            id: record.id(),
            body: record.body().to_string(),
            row: ReportRow::from_record(record, &self.columns, link),
        }
    }
}

fn page_file_name(first: i64, last: i64) -> String {
    format!("{first}--{last}.index.html")
}

fn body_file_name(id: i64, source: ReportSource) -> String {
    format!("file.id.{id}.{}", source.table_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_name_at_largest_id() {
        assert_eq!(page_file_name(1, i64::MAX), "1--9223372036854775807.index.html");
    }

    #[test]
    fn test_body_file_name() {
        assert_eq!(body_file_name(12, ReportSource::Redacted), "file.id.12.redacted_emails");
        assert_eq!(body_file_name(3, ReportSource::Emails), "file.id.3.emails");
    }
}
