//! Wire frames for the highlight session protocol
//!
//! Frames travel over any ordered, message-framed bidirectional channel; the
//! production binding is a WebSocket text message. A request is four
//! newline-delimited fields where the last field (the source text) runs to
//! the end of the frame, so embedded newlines survive intact. A response is
//! the echoed correlation id, one newline, then the markup.
//!
//! The protocol never answers a bad frame: parse errors here are reported to
//! the caller, which drops the frame and keeps the connection open.

use thiserror::Error;

/// How a request's selector field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// The selector is a filename; the language is guessed from it.
    File,
    /// The selector is an explicit language identifier.
    Snippet,
}

impl SelectorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectorKind::File => "file",
            SelectorKind::Snippet => "snippet",
        }
    }

    pub fn parse(s: &str) -> Result<Self, FrameError> {
        match s {
            "file" => Ok(SelectorKind::File),
            "snippet" => Ok(SelectorKind::Snippet),
            other => Err(FrameError::UnknownKind(other.to_string())),
        }
    }
}

/// A request frame: `<id>\n<selector>\n<kind>\n<source>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRequest {
    /// Correlation token, chosen by the client and echoed verbatim. Opaque
    /// to the server.
    pub id: String,
    /// Filename or language identifier, depending on `kind`.
    pub selector: String,
    pub kind: SelectorKind,
    /// Source text to highlight. May be empty, may contain newlines.
    pub source: String,
}

impl HighlightRequest {
    /// Parse a request frame. The first three fields must be present; the
    /// fourth field is everything after the third separator, so the source
    /// is never truncated at its first line break.
    pub fn parse(frame: &str) -> Result<Self, FrameError> {
        let mut fields = frame.splitn(4, '\n');
        let (Some(id), Some(selector), Some(kind), Some(source)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(FrameError::MissingFields);
        };

        Ok(Self {
            id: id.to_string(),
            selector: selector.to_string(),
            kind: SelectorKind::parse(kind)?,
            source: source.to_string(),
        })
    }

    pub fn encode(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            self.id,
            self.selector,
            self.kind.as_str(),
            self.source
        )
    }
}

/// A response frame: `<id>\n<markup>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResponse {
    /// The request's correlation id, echoed verbatim.
    pub id: String,
    /// Highlighted markup. May contain newlines.
    pub markup: String,
}

impl HighlightResponse {
    /// Parse a response frame by splitting at the first newline only; the
    /// markup routinely contains newlines of its own.
    pub fn parse(frame: &str) -> Result<Self, FrameError> {
        let Some((id, markup)) = frame.split_once('\n') else {
            return Err(FrameError::MissingFields);
        };
        Ok(Self {
            id: id.to_string(),
            markup: markup.to_string(),
        })
    }

    pub fn encode(&self) -> String {
        format!("{}\n{}", self.id, self.markup)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The frame had fewer newline-delimited fields than the format requires.
    #[error("frame is missing fields")]
    MissingFields,
    /// The kind field was neither `file` nor `snippet`.
    #[error("unrecognized request kind {0:?}")]
    UnknownKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snippet_request() {
        let req = HighlightRequest::parse("42\nrb\nsnippet\nputs 1").unwrap();
        assert_eq!(req.id, "42");
        assert_eq!(req.selector, "rb");
        assert_eq!(req.kind, SelectorKind::Snippet);
        assert_eq!(req.source, "puts 1");
    }

    #[test]
    fn source_keeps_embedded_newlines() {
        let req = HighlightRequest::parse("1\nmain.rs\nfile\nfn main() {\n    todo!()\n}\n").unwrap();
        assert_eq!(req.kind, SelectorKind::File);
        assert_eq!(req.source, "fn main() {\n    todo!()\n}\n");
    }

    #[test]
    fn source_may_be_empty() {
        let req = HighlightRequest::parse("7\nnotes.txt\nfile\n").unwrap();
        assert_eq!(req.source, "");
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = HighlightRequest::parse("7\nxyz\nblob\nhello").unwrap_err();
        assert_eq!(err, FrameError::UnknownKind("blob".to_string()));
    }

    #[test]
    fn rejects_truncated_frame() {
        assert_eq!(
            HighlightRequest::parse("7\nxyz\nfile").unwrap_err(),
            FrameError::MissingFields
        );
        assert_eq!(
            HighlightRequest::parse("").unwrap_err(),
            FrameError::MissingFields
        );
    }

    #[test]
    fn request_round_trips() {
        let req = HighlightRequest {
            id: "9".to_string(),
            selector: "CMakeLists.txt".to_string(),
            kind: SelectorKind::File,
            source: "project(demo)\n".to_string(),
        };
        assert_eq!(HighlightRequest::parse(&req.encode()).unwrap(), req);
    }

    #[test]
    fn response_splits_at_first_newline_only() {
        let resp = HighlightResponse::parse("42\n<span>line one\nline two</span>").unwrap();
        assert_eq!(resp.id, "42");
        assert_eq!(resp.markup, "<span>line one\nline two</span>");
    }

    #[test]
    fn response_markup_may_be_empty() {
        let resp = HighlightResponse::parse("3\n").unwrap();
        assert_eq!(resp.id, "3");
        assert_eq!(resp.markup, "");
    }

    #[test]
    fn response_without_separator_is_invalid() {
        assert_eq!(
            HighlightResponse::parse("42").unwrap_err(),
            FrameError::MissingFields
        );
    }
}
