//! Structural HTML scrubber
//!
//! Rebuilds a message body from its parse events while removing two kinds of
//! personal data that pattern matching cannot see:
//!
//! - **Member links**: the text inside an element whose `href` points at a
//!   member profile is replaced by the marker. The opening tag is kept,
//!   nested tags are kept bare (no attributes).
//! - **Delivery address sections**: every `tr` start and end tag records a
//!   boundary in the output. Each pair of boundaries closes a window; when the
//!   window holds the section phrase it is cut out together with the window
//!   that follows it in the same table (the value row under the label row).
//!
//! The walker is a [`WalkState`] value folded over the event stream. Each
//! step returns the next state and the edits to apply to the output.

use std::borrow::Cow;

use tracing::debug;

use crate::html::{Event, Tag, Tokenizer};

pub const DEFAULT_MEMBER_LINK_MARKER: &str = "?member=";
pub const DEFAULT_SECTION_PHRASE: &str = "Delivery address";

/// The document root is dropped from the output
const ROOT_TAG: &str = "html";
const ROW_TAG: &str = "tr";
/// A pending value row never reaches past the table it was labelled in
const TABLE_TAG: &str = "table";

/// What the scrubber looks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubRules {
    /// Substring of an `href` that identifies a member profile link
    pub member_link_marker: String,
    /// Phrase that labels a section to excise
    pub section_phrase: String,
}

impl Default for ScrubRules {
    fn default() -> Self {
        Self {
            member_link_marker: DEFAULT_MEMBER_LINK_MARKER.to_string(),
            section_phrase: DEFAULT_SECTION_PHRASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum LinkState {
    #[default]
    Idle,
    Redacting {
        tag: String,
        depth: usize,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RowWindow {
    #[default]
    Empty,
    /// Output length at the first boundary
    Open(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct WalkState {
    link: LinkState,
    rows: RowWindow,
    drop_next_row: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Edit<'a> {
    Push(Cow<'a, str>),
    Truncate(usize),
}

impl WalkState {
    fn step<'a>(
        self,
        event: &Event<'a>,
        rules: &ScrubRules,
        marker: &'a str,
        output: &str,
    ) -> (Self, Vec<Edit<'a>>) {
        match event {
            Event::StartTag(tag) => self.start_tag(tag, rules, output),
            Event::EndTag(name) => self.end_tag(name, rules, output),
            Event::Text(text) => {
                let text = match self.link {
                    LinkState::Idle => *text,
                    LinkState::Redacting { .. } => marker,
                };
                (self, vec![Edit::Push(Cow::Borrowed(text))])
            }
        }
    }

    fn start_tag<'a>(
        mut self,
        tag: &Tag<'a>,
        rules: &ScrubRules,
        output: &str,
    ) -> (Self, Vec<Edit<'a>>) {
        let mut edits = Vec::new();

        if tag.name == TABLE_TAG {
            self.drop_next_row = false;
        }
        if tag.name == ROW_TAG
            && let Some(cut) = self.record_row_boundary(output.len(), output, rules)
        {
            edits.push(Edit::Truncate(cut));
        }

        let entered = match &mut self.link {
            LinkState::Redacting { tag: open, depth } => {
                if *open == tag.name && !tag.self_closing {
                    *depth += 1;
                }
                edits.push(Edit::Push(Cow::Owned(format!("<{}>", tag.name))));
                None
            }
            LinkState::Idle => {
                if tag.name != ROOT_TAG {
                    edits.push(Edit::Push(Cow::Borrowed(tag.raw)));
                }
                (!tag.self_closing && is_member_link(tag, rules)).then(|| LinkState::Redacting {
                    tag: tag.name.clone(),
                    depth: 1,
                })
            }
        };
        if let Some(link) = entered {
            self.link = link;
        }

        (self, edits)
    }

    fn end_tag<'a>(
        mut self,
        name: &str,
        rules: &ScrubRules,
        output: &str,
    ) -> (Self, Vec<Edit<'a>>) {
        let mut edits = Vec::new();
        let mut emitted = 0;

        if name != ROOT_TAG {
            let closing = format!("</{name}>");
            emitted = closing.len();
            edits.push(Edit::Push(Cow::Owned(closing)));
        }

        let closes_link = match &mut self.link {
            LinkState::Redacting { tag, depth } if tag.as_str() == name => {
                *depth -= 1;
                *depth == 0
            }
            _ => false,
        };
        if closes_link {
            self.link = LinkState::Idle;
        }

        if name == TABLE_TAG {
            self.drop_next_row = false;
        }
        if name == ROW_TAG
            && let Some(cut) = self.record_row_boundary(output.len() + emitted, output, rules)
        {
            edits.push(Edit::Truncate(cut));
        }

        (self, edits)
    }

    /// Record a row boundary at output position `at`. Returns the position to
    /// truncate the output to when the closed window must be removed.
    fn record_row_boundary(&mut self, at: usize, output: &str, rules: &ScrubRules) -> Option<usize> {
        let RowWindow::Open(first) = self.rows else {
            self.rows = RowWindow::Open(at);
            return None;
        };
        self.rows = RowWindow::Empty;

        let window = output.get(first..).unwrap_or_default();
        let phrase = rules.section_phrase.as_str();

        if !phrase.is_empty() && window.contains(phrase) {
            self.drop_next_row = true;
            Some(first)
        } else if self.drop_next_row {
            self.drop_next_row = false;
            Some(first)
        } else {
            None
        }
    }
}

fn is_member_link(tag: &Tag<'_>, rules: &ScrubRules) -> bool {
    let marker = rules.member_link_marker.as_str();
    !marker.is_empty() && tag.attr("href").is_some_and(|href| href.contains(marker))
}

/// Markup walker that rebuilds a body without member names and address rows.
///
/// One instance handles one body; call [`reset`](Self::reset) before reusing it.
#[derive(Debug, Clone)]
pub struct HtmlScrubber {
    marker: String,
    rules: ScrubRules,
    state: WalkState,
    output: String,
}

impl HtmlScrubber {
    pub fn new(marker: impl Into<String>, rules: ScrubRules) -> Self {
        Self {
            marker: marker.into(),
            rules,
            state: WalkState::default(),
            output: String::new(),
        }
    }

    /// Consume a whole markup document. Never fails; broken markup is rebuilt
    /// as far as it can be parsed.
    pub fn feed(&mut self, markup: &str) {
        let mut excised = 0usize;

        for event in Tokenizer::new(markup) {
            let state = std::mem::take(&mut self.state);
            let (next, edits) = state.step(&event, &self.rules, &self.marker, &self.output);
            self.state = next;

            for edit in edits {
                match edit {
                    Edit::Push(text) => self.output.push_str(&text),
                    Edit::Truncate(len) => {
                        self.output.truncate(len);
                        excised += 1;
                    }
                }
            }
        }

        if excised > 0 {
            debug!(rows = excised, "excised table rows");
        }
    }

    /// The rebuilt markup
    pub fn result(&self) -> &str {
        &self.output
    }

    pub fn into_result(self) -> String {
        self.output
    }

    /// Clear all state so the scrubber can take a new body
    pub fn reset(&mut self) {
        self.state = WalkState::default();
        self.output.clear();
    }
}

/// Scrub one body with a fresh walker
pub fn scrub_html(markup: &str, marker: &str, rules: &ScrubRules) -> String {
    let mut scrubber = HtmlScrubber::new(marker, rules.clone());
    scrubber.feed(markup);
    scrubber.into_result()
}
