use lazy_static::lazy_static;
use regex::{Captures, NoExpand, Regex};

lazy_static! {
    // Priority order matters: each pattern runs over the output of the previous one.
    static ref PHONE_PATTERNS: [Regex; 4] = [
        Regex::new(r"\(?\d{3}\)?[.-]? *\d{3}[.-]? *[.-]?\d{4}").unwrap(),
        Regex::new(r"\(\d{3}\)\s\d{3}-\d{4}").unwrap(),
        Regex::new(r"\(\d{2,4}\)\d{6,7}").unwrap(),
        Regex::new(r"\(\d{2,4}\) \d{6,7}").unwrap(),
    ];
    static ref EMAIL_PATTERN: Regex = Regex::new(r"[\w.-]+@[\w.-]+\.\w+").unwrap();
    // Kept compatible with the historical detector, whose boundaries were
    // backspace characters (0x08) rather than `\b` word boundaries. Only a
    // dotted quad wrapped in backspaces and ending in a dot matches, so IP
    // redaction is effectively disabled until that output is allowed to change.
    static ref IP_PATTERN: Regex =
        Regex::new(r"\x08((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)(\.|$)){4}\x08").unwrap();
}

/// Find phone numbers. Every pattern runs against the original text, so one
/// number can be reported by more than one pattern.
pub fn detect_phone_numbers(text: &str) -> Vec<&str> {
    PHONE_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(text).map(|m| m.as_str()))
        .collect()
}

pub fn detect_email_addresses(text: &str) -> Vec<&str> {
    EMAIL_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn detect_ip_addresses(text: &str) -> Vec<&str> {
    IP_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Strings that keep an email address from being redacted when the address
/// contains one of them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    entries: Vec<String>,
}

impl ExclusionList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// True when any entry is a substring of `candidate`
    pub fn excludes(&self, candidate: &str) -> bool {
        self.entries.iter().any(|entry| candidate.contains(entry.as_str()))
    }
}

/// Replaces phone numbers, email addresses and IP addresses with a marker
#[derive(Debug, Clone)]
pub struct PatternRedactor {
    marker: String,
}

impl PatternRedactor {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Apply the phone patterns one after another, each over the text as left
    /// by the previous ones.
    ///
    /// A later pattern can therefore match across marker text inserted by an
    /// earlier one, e.g. with marker `(99)` the input `(123) 456-7890 1234567`
    /// becomes `(99) 1234567` after the first pattern and `(99)` after the last.
    pub fn redact_phone_numbers(&self, text: &str) -> String {
        PHONE_PATTERNS.iter().fold(text.to_string(), |acc, pattern| {
            pattern
                .replace_all(&acc, NoExpand(&self.marker))
                .into_owned()
        })
    }

    /// Replace every detected address, unless the address contains an
    /// exclusion entry. Replacement happens at match positions only, so an
    /// excluded address is never rewritten through a shorter match inside it.
    pub fn redact_email_addresses(&self, text: &str, exclusions: &ExclusionList) -> String {
        EMAIL_PATTERN
            .replace_all(text, |caps: &Captures<'_>| {
                let address = &caps[0];
                if exclusions.excludes(address) {
                    address.to_string()
                } else {
                    self.marker.clone()
                }
            })
            .into_owned()
    }

    pub fn redact_ip_addresses(&self, text: &str) -> String {
        IP_PATTERN
            .replace_all(text, NoExpand(&self.marker))
            .into_owned()
    }
}
