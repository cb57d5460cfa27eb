//! Per-record redaction

use mailscrub_core::{Record, SanitizedRecord};

use crate::{ExclusionList, HtmlScrubber, PatternRedactor, ScrubRules};

/// Turns a [`Record`] into a [`SanitizedRecord`].
///
/// Field order is fixed:
/// 1. subject: email, IP, phone passes
/// 2. sender and recipient: email pass
/// 3. body: structural scrub, then email, IP, phone passes
#[derive(Debug, Clone)]
pub struct RedactionPipeline {
    redactor: PatternRedactor,
    exclusions: ExclusionList,
    rules: ScrubRules,
}

impl RedactionPipeline {
    pub fn new(exclusions: ExclusionList, marker: impl Into<String>) -> Self {
        Self {
            redactor: PatternRedactor::new(marker),
            exclusions,
            rules: ScrubRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: ScrubRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn marker(&self) -> &str {
        self.redactor.marker()
    }

    pub fn redact(&self, record: &Record) -> SanitizedRecord {
        SanitizedRecord {
            id: record.id,
            subject: self.redact_text(&record.subject),
            sender: self.redact_address(&record.sender),
            recipient: self.redact_address(&record.recipient),
            body: self.redact_body(&record.body),
            time: record.time,
        }
    }

    /// Scrub markup structure, then run every pattern pass
    pub fn redact_body(&self, body: &str) -> String {
        let mut scrubber = HtmlScrubber::new(self.redactor.marker(), self.rules.clone());
        scrubber.feed(body);
        self.redact_text(scrubber.result())
    }

    fn redact_text(&self, text: &str) -> String {
        let text = self.redactor.redact_email_addresses(text, &self.exclusions);
        let text = self.redactor.redact_ip_addresses(&text);
        self.redactor.redact_phone_numbers(&text)
    }

    fn redact_address(&self, address: &str) -> String {
        self.redactor.redact_email_addresses(address, &self.exclusions)
    }
}

/// Redact one record with the default scrub rules
pub fn redact(record: &Record, exclusions: &ExclusionList, marker: &str) -> SanitizedRecord {
    RedactionPipeline::new(exclusions.clone(), marker).redact(record)
}
