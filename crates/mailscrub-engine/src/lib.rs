use anyhow::Result;
use mailscrub_security::RedactionPipeline;
use mailscrub_storage::Storage;
use tracing::{debug, info};

pub mod report;

pub use report::{ReportSummary, ReportWriter};

/// Records read from the store per query
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub redacted: usize,
}

/// Redacts every stored email into `redacted_emails`.
///
/// The whole table is read and redacted before anything is written, and the
/// results are saved in a single transaction, so a failed run leaves the
/// previous contents of `redacted_emails` untouched.
pub struct RedactionRun {
    storage: Storage,
    pipeline: RedactionPipeline,
    page_size: u32,
}

impl RedactionRun {
    pub fn new(storage: Storage, pipeline: RedactionPipeline) -> Self {
        Self {
            storage,
            pipeline,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let mut redacted = Vec::new();
        let mut after_id = i64::MIN;

        loop {
            let page = self.storage.emails_after(after_id, self.page_size).await?;
            let Some(last) = page.last() else {
                break;
            };
            after_id = last.id;

            debug!(records = page.len(), last_id = after_id, "Redacting page");
            redacted.extend(page.iter().map(|record| self.pipeline.redact(record)));

            if page.len() < self.page_size as usize {
                break;
            }
        }

        let saved = self.storage.save_redacted(&redacted).await?;
        info!(records = saved, "Redaction run complete");

        Ok(RunSummary { redacted: saved })
    }
}
