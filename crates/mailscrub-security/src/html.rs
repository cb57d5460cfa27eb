//! Tolerant HTML tokenizer
//!
//! Produces a lazy stream of start tag, end tag and text events from
//! arbitrary (possibly broken) markup. It never fails: comments, doctypes and
//! processing instructions are skipped, a `<` that does not open a tag is
//! plain text, and a tag cut off at the end of input is returned as text.

/// Elements whose content is never parsed as markup
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    StartTag(Tag<'a>),
    /// Lowercased element name
    EndTag(String),
    Text(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Lowercased element name
    pub name: String,
    /// Lowercased attribute names with their raw (unquoted) values
    pub attrs: Vec<(String, Option<&'a str>)>,
    /// The tag exactly as it appears in the source
    pub raw: &'a str,
    pub self_closing: bool,
}

impl<'a> Tag<'a> {
    /// Value of the first attribute called `name`
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .and_then(|(_, value)| *value)
    }
}

pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    raw_text: Option<&'static str>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            raw_text: None,
        }
    }

    fn text(&mut self, len: usize) -> Event<'a> {
        let input = self.input;
        let text = &input[self.pos..self.pos + len];
        self.pos += len;
        Event::Text(text)
    }

    /// Skip past the next occurrence of `terminator`, or to the end of input
    fn skip_past(&mut self, from: usize, terminator: &str) {
        let rest = &self.input[self.pos..];
        self.pos += rest[from..]
            .find(terminator)
            .map(|idx| from + idx + terminator.len())
            .unwrap_or(rest.len());
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.input;
        loop {
            let rest = &input[self.pos..];
            if rest.is_empty() {
                return None;
            }

            if let Some(element) = self.raw_text.take() {
                let close = format!("</{element}");
                let end = rest
                    .to_ascii_lowercase()
                    .find(&close)
                    .unwrap_or(rest.len());
                if end > 0 {
                    return Some(self.text(end));
                }
                continue;
            }

            if !rest.starts_with('<') {
                let end = rest.find('<').unwrap_or(rest.len());
                return Some(self.text(end));
            }

            let bytes = rest.as_bytes();
            let next = bytes.get(1).copied();

            if rest.starts_with("<!--") {
                self.skip_past(4, "-->");
                continue;
            }

            if matches!(next, Some(b'!') | Some(b'?')) {
                self.skip_past(2, ">");
                continue;
            }

            if next == Some(b'/') {
                match bytes.get(2) {
                    Some(c) if c.is_ascii_alphabetic() => {
                        let Some(end) = rest.find('>') else {
                            return Some(self.text(rest.len()));
                        };
                        let name = rest[2..end]
                            .split(|c: char| c.is_ascii_whitespace() || c == '/')
                            .next()
                            .unwrap_or_default()
                            .to_ascii_lowercase();
                        self.pos += end + 1;
                        return Some(Event::EndTag(name));
                    }
                    // `</>` and `</ ...>` carry nothing
                    Some(_) => {
                        self.skip_past(2, ">");
                        continue;
                    }
                    None => return Some(self.text(rest.len())),
                }
            }

            if next.is_some_and(|c| c.is_ascii_alphabetic()) {
                let Some((tag, len)) = parse_start_tag(rest) else {
                    return Some(self.text(rest.len()));
                };
                self.pos += len;
                if !tag.self_closing {
                    self.raw_text = RAW_TEXT_ELEMENTS
                        .into_iter()
                        .find(|element| *element == tag.name);
                }
                return Some(Event::StartTag(tag));
            }

            // A lone `<` is text up to the next one
            let end = rest[1..].find('<').map(|idx| idx + 1).unwrap_or(rest.len());
            return Some(self.text(end));
        }
    }
}

/// Parse a start tag at the beginning of `s`. Returns `None` when the tag is
/// not closed before the end of input.
fn parse_start_tag(s: &str) -> Option<(Tag<'_>, usize)> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let is_space = |b: u8| b.is_ascii_whitespace();

    let mut i = 1;
    while i < len && !is_space(bytes[i]) && bytes[i] != b'/' && bytes[i] != b'>' {
        i += 1;
    }
    let name = s[1..i].to_ascii_lowercase();
    let mut attrs = Vec::new();

    loop {
        while i < len && (is_space(bytes[i]) || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len {
            return None;
        }
        if bytes[i] == b'>' {
            i += 1;
            break;
        }

        let start = i;
        // A stray `=` is taken as part of the name so the scan always advances
        i += 1;
        while i < len && !is_space(bytes[i]) && !matches!(bytes[i], b'>' | b'=' | b'/') {
            i += 1;
        }
        let attr = s[start..i].to_ascii_lowercase();

        while i < len && is_space(bytes[i]) {
            i += 1;
        }
        if i >= len || bytes[i] != b'=' {
            attrs.push((attr, None));
            continue;
        }

        i += 1;
        while i < len && is_space(bytes[i]) {
            i += 1;
        }
        if i >= len {
            return None;
        }

        let value = match bytes[i] {
            quote @ (b'"' | b'\'') => {
                let end = i + 1 + s[i + 1..].find(quote as char)?;
                let value = &s[i + 1..end];
                i = end + 1;
                value
            }
            _ => {
                let start = i;
                while i < len && !is_space(bytes[i]) && bytes[i] != b'>' {
                    i += 1;
                }
                &s[start..i]
            }
        };
        attrs.push((attr, Some(value)));
    }

    let raw = &s[..i];
    Some((
        Tag {
            name,
            attrs,
            raw,
            self_closing: raw.ends_with("/>"),
        },
        i,
    ))
}
