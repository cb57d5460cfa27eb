//! Report table rendering
//!
//! Pages are plain HTML tables: one header row built from the configured
//! columns, one row per record, and a trailing cell linking the record's body
//! file. Rendering is deterministic so regenerated reports diff cleanly.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::{Field, MessageFields};

/// A report column: which record field to show and its header label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub field: Field,
    pub label: String,
}

impl Column {
    pub fn new(field: Field, label: impl Into<String>) -> Self {
        Self {
            field,
            label: label.into(),
        }
    }
}

/// Which table a report is generated from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSource {
    Emails,
    #[default]
    Redacted,
}

impl ReportSource {
    /// Table name, also used as the suffix of body file names
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Emails => "emails",
            Self::Redacted => "redacted_emails",
        }
    }
}

impl std::str::FromStr for ReportSource {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emails" => Ok(Self::Emails),
            "redacted" => Ok(Self::Redacted),
            other => Err(crate::CoreError::invalid_input(
                "source",
                format!("expected `emails` or `redacted`, got `{other}`"),
            )),
        }
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub cells: Vec<String>,
    /// Relative path of the record's body file
    pub link: String,
}

impl ReportRow {
    pub fn from_record(record: &impl MessageFields, columns: &[Column], link: String) -> Self {
        Self {
            cells: columns.iter().map(|c| record.field(c.field)).collect(),
            link,
        }
    }
}

/// Render a report page. Returns `None` when there are no rows.
pub fn render_table(columns: &[Column], rows: &[ReportRow]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let mut out = String::new();
    out.push_str("<table border=\"1\">\n<tbody>\n<tr>");
    for column in columns {
        let _ = write!(out, "<th><b>{}</b></th>", escape(&column.label));
    }
    out.push_str("<th><b>Link</b></th></tr>\n");

    for row in rows {
        out.push_str("<tr>");
        for cell in &row.cells {
            let _ = write!(out, "<td>{}</td>", escape(cell));
        }
        let link = escape(&row.link);
        let _ = write!(out, "<td><a href=\"{link}\">{link}</a></td></tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
    Some(out)
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![Column::new(Field::Id, "ID"), Column::new(Field::Subject, "Subject")]
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        assert_eq!(render_table(&columns(), &[]), None);
    }

    #[test]
    fn test_header_and_rows() {
        let rows = vec![ReportRow {
            cells: vec!["1".to_string(), "Hello".to_string()],
            link: "files/file.id.1.redacted_emails".to_string(),
        }];

        let html = render_table(&columns(), &rows).unwrap();

        assert!(html.starts_with("<table border=\"1\">"));
        assert!(html.contains("<tr><th><b>ID</b></th><th><b>Subject</b></th><th><b>Link</b></th></tr>"));
        assert!(html.contains(
            "<tr><td>1</td><td>Hello</td><td><a href=\"files/file.id.1.redacted_emails\">files/file.id.1.redacted_emails</a></td></tr>"
        ));
    }

    #[test]
    fn test_report_source_names() {
        assert_eq!("emails".parse::<ReportSource>().unwrap(), ReportSource::Emails);
        assert_eq!("redacted".parse::<ReportSource>().unwrap(), ReportSource::Redacted);
        assert!("redacted_emails".parse::<ReportSource>().is_err());
        assert_eq!(ReportSource::default().table_name(), "redacted_emails");
    }

    #[test]
    fn test_cells_are_escaped() {
        let rows = vec![ReportRow {
            cells: vec!["2".to_string(), "<b>Tom & Jerry</b>".to_string()],
            link: "files/x".to_string(),
        }];

        let html = render_table(&columns(), &rows).unwrap();
        assert!(html.contains("<td>&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;</td>"));
    }
}
