//! PII redaction engine
//!
//! - [`redactor`]: pattern passes for phone numbers, email addresses and IP addresses
//! - [`html`]: tolerant markup tokenizer
//! - [`scrubber`]: structural HTML scrubber (member links, delivery address rows)
//! - [`pipeline`]: per-record composition of the above

pub mod html;
pub mod pipeline;
pub mod redactor;
pub mod scrubber;

pub use pipeline::{RedactionPipeline, redact};
pub use redactor::{
    ExclusionList, PatternRedactor, detect_email_addresses, detect_ip_addresses,
    detect_phone_numbers,
};
pub use scrubber::{HtmlScrubber, ScrubRules, scrub_html};
