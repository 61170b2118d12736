//! The issue payload posted to every selected track.
//!
//! A [`Ticket`] is built once per run, either from separate title and body
//! strings or from a document whose first line is the subject. It serialises
//! to exactly the JSON the GitHub issues endpoint expects:
//! `{"title": ..., "body": ..., "labels": [...]}`.

use serde::{Deserialize, Serialize};

use crate::BlazonError;

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Labels attached to the created issue.
///
/// Always serialised as a JSON array; the API rejects `null` here, so an
/// unlabeled ticket carries `[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(Vec<String>);

impl Labels {
    /// Parses a comma-separated label list.
    ///
    /// Each piece is trimmed of surrounding spaces. The empty string yields no
    /// labels rather than a single empty label.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return Self::default();
        }
        Self(s.split(',').map(|l| l.trim_matches(' ').to_string()).collect())
    }

    /// Returns the labels as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// Title, body, and labels of the issue to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub title: String,
    pub body: String,
    pub labels: Labels,
}

impl Ticket {
    /// Builds a ticket from a separately supplied title and body.
    ///
    /// Both must be non-empty. The body is trimmed of leading and trailing
    /// line breaks, `\r\n` as well as `\n`.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        labels: Labels,
    ) -> Result<Self, BlazonError> {
        let title = title.into();
        let body = body.into();
        if title.is_empty() || body.is_empty() {
            return Err(BlazonError::IncompleteTicket);
        }
        Ok(Self {
            title,
            body: trim_newlines(&body).to_string(),
            labels,
        })
    }

    /// Builds a ticket from a document: the first line is the title and the
    /// remainder, trimmed of surrounding line breaks, is the body.
    ///
    /// Documents saved with CRLF line endings give the same ticket as LF ones:
    /// the `\r` ending the subject line is dropped, and so are `\r`s at either
    /// end of the body. Interior line breaks in the body are kept as written.
    ///
    /// A document with no `\n` at all has no subject line and is rejected.
    pub fn from_document(content: &str, labels: Labels) -> Result<Self, BlazonError> {
        let (title, body) = content
            .split_once('\n')
            .ok_or(BlazonError::MissingSubjectLine)?;
        Ok(Self {
            title: title.trim_end_matches('\r').to_string(),
            body: trim_newlines(body).to_string(),
            labels,
        })
    }
}

/// Strips leading and trailing `\n` and `\r`, so CRLF files trim like LF ones.
fn trim_newlines(s: &str) -> &str {
    s.trim_matches(|c| c == '\n' || c == '\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        empty = { "", &[] },
        single = { "bug", &["bug"] },
        spaced = { "a, b ,c", &["a", "b", "c"] },
        padded = { "  good first patch  ", &["good first patch"] },
        trailing_comma = { "a,", &["a", ""] },
    )]
    fn parses_labels(input: &str, expected: &[&str]) {
        let labels = Labels::parse(input);
        assert_eq!(labels.as_slice(), expected);
    }

    #[test]
    fn document_splits_subject_from_body() {
        let ticket = Ticket::from_document("Subject\n\nline1\nline2\n", Labels::default()).unwrap();
        assert_eq!(ticket.title, "Subject");
        assert_eq!(ticket.body, "line1\nline2");
    }

    #[test]
    fn document_handles_crlf_subject() {
        let ticket = Ticket::from_document("Subject\r\n\r\nbody\r\n", Labels::default()).unwrap();
        assert_eq!(ticket.title, "Subject");
        assert_eq!(ticket.body, "body");
    }

    #[test]
    fn crlf_line_breaks_trim_like_lf() {
        let crlf = Ticket::from_document("Subject\r\n\r\nline1\r\nline2\r\n", Labels::default())
            .unwrap();
        assert_eq!(crlf.title, "Subject");
        assert_eq!(crlf.body, "line1\r\nline2");

        let flags = Ticket::new("Title", "\r\nsome text\r\n", Labels::default()).unwrap();
        assert_eq!(flags.body, "some text");
    }

    #[test]
    fn document_without_newline_is_rejected() {
        let err = Ticket::from_document("only a subject", Labels::default()).unwrap_err();
        assert!(matches!(err, BlazonError::MissingSubjectLine));
    }

    #[parameterized(
        no_title = { "", "body" },
        no_body = { "title", "" },
        neither = { "", "" },
    )]
    fn incomplete_flags_are_rejected(title: &str, body: &str) {
        let err = Ticket::new(title, body, Labels::default()).unwrap_err();
        assert!(matches!(err, BlazonError::IncompleteTicket));
    }

    #[test]
    fn flag_body_is_trimmed_of_newlines() {
        let ticket = Ticket::new("Title", "\n\nsome text\n", Labels::parse("x")).unwrap();
        assert_eq!(ticket.body, "some text");
        assert_eq!(ticket.labels.as_slice(), ["x"]);
    }

    #[test]
    fn serialises_empty_labels_as_array() {
        let ticket = Ticket::new("T", "B", Labels::default()).unwrap();
        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "T", "body": "B", "labels": []})
        );
    }
}
