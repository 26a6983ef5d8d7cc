//! Highlighting engine
//!
//! Turns source text into an annotated structural model and renders it as
//! nested `<span>` markup. The returned HTML contains `<span>` elements with
//! classes like:
//! - `hl-keyword` for keywords
//! - `hl-string` for string literals
//! - `hl-comment` for comments
//! - `hl-function` for function names
//! - etc.
//!
//! Losslessness is a hard invariant: stripping every tag from the output and
//! un-escaping the remaining text reproduces the source byte for byte. Any
//! condition that would break that (a grammar bug, a panic inside
//! tree-sitter, events that skip part of the input) downgrades the result to
//! a single unannotated span instead.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::warn;
use tree_sitter_highlight::{Highlight, HighlightConfiguration, HighlightEvent, Highlighter};

use crate::config::{self, HIGHLIGHT_CLASSES};
use crate::resolver::LanguageId;

/// One step of annotated output. `Text` carries a byte range of the
/// original source; `Open`/`Close` bracket it with syntax classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupEvent {
    Open { class: &'static str },
    Text { start: usize, end: usize },
    Close,
}

/// Source text plus its annotation events.
///
/// Opens and closes are balanced, text ranges are in order and cover the
/// source exactly, and every range lies on character boundaries. These
/// properties are established during construction, so rendering and
/// segmentation can slice freely.
#[derive(Debug, Clone)]
pub struct Highlighted {
    source: String,
    events: Vec<MarkupEvent>,
}

impl Highlighted {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn events(&self) -> &[MarkupEvent] {
        &self.events
    }

    /// Render as a single markup fragment wrapped in one top-level
    /// container span.
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(self.source.len() + self.source.len() / 4 + 32);
        html.push_str("<span class=\"hl\">");
        for event in &self.events {
            match *event {
                MarkupEvent::Open { class } => {
                    html.push_str("<span class=\"");
                    html.push_str(class);
                    html.push_str("\">");
                }
                MarkupEvent::Text { start, end } => {
                    escape_into(&mut html, &self.source[start..end]);
                }
                MarkupEvent::Close => html.push_str("</span>"),
            }
        }
        html.push_str("</span>");
        html
    }

    #[cfg(test)]
    pub(crate) fn from_parts(source: String, events: Vec<MarkupEvent>) -> Self {
        Self { source, events }
    }
}

/// Highlight `source` with the grammar behind `language`.
///
/// Never fails: identities without a grammar, grammars that error on this
/// input, and panics inside tree-sitter all degrade to an unannotated
/// rendition of the same text.
pub fn highlight(language: LanguageId, source: &str) -> Highlighted {
    let Some(grammar) = config::grammar_for(language) else {
        return plain(source);
    };
    match catch_unwind(AssertUnwindSafe(|| annotate(grammar, source))) {
        Ok(Some(events)) => Highlighted {
            source: source.to_owned(),
            events,
        },
        Ok(None) => plain(source),
        Err(_) => {
            warn!(
                language = language.name(),
                "highlighter panicked, falling back to plain text"
            );
            plain(source)
        }
    }
}

fn plain(source: &str) -> Highlighted {
    let events = if source.is_empty() {
        Vec::new()
    } else {
        vec![MarkupEvent::Text {
            start: 0,
            end: source.len(),
        }]
    };
    Highlighted {
        source: source.to_owned(),
        events,
    }
}

/// Run the tree-sitter highlighter and collect its events, validating the
/// invariants [`Highlighted`] promises. `None` means the event stream was
/// unusable and the caller should fall back to plain text.
fn annotate(grammar: &HighlightConfiguration, source: &str) -> Option<Vec<MarkupEvent>> {
    // A fresh highlighter per call: reusing one across inputs of different
    // lengths has produced slice-bounds panics in the past.
    let mut highlighter = Highlighter::new();
    let highlights = highlighter
        .highlight(grammar, source.as_bytes(), None, |_| None)
        .ok()?;

    let mut events = Vec::new();
    let mut open = 0usize;
    let mut cursor = 0usize;
    for event in highlights {
        match event.ok()? {
            HighlightEvent::Source { start, end } => {
                if start != cursor || end < start || end > source.len() {
                    return None;
                }
                if !source.is_char_boundary(start) || !source.is_char_boundary(end) {
                    return None;
                }
                cursor = end;
                if start < end {
                    events.push(MarkupEvent::Text { start, end });
                }
            }
            HighlightEvent::HighlightStart(Highlight(index)) => {
                let class = *HIGHLIGHT_CLASSES.get(index)?;
                events.push(MarkupEvent::Open { class });
                open += 1;
            }
            HighlightEvent::HighlightEnd => {
                if open == 0 {
                    return None;
                }
                events.push(MarkupEvent::Close);
                open -= 1;
            }
        }
    }
    if cursor != source.len() {
        return None;
    }
    for _ in 0..open {
        events.push(MarkupEvent::Close);
    }
    Some(events)
}

/// Escape HTML special characters, appending to an accumulator.
pub(crate) fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
}

/// Strip all tags and un-escape entities, recovering the text content.
/// Test helper shared with the segmentation tests.
#[cfg(test)]
pub(crate) fn stripped(html: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if in_tag => {}
            _ => text.push(c),
        }
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_renders_one_container_span() {
        let result = highlight(LanguageId::PlainText, "hello <world>");
        assert_eq!(result.to_html(), "<span class=\"hl\">hello &lt;world&gt;</span>");
    }

    #[test]
    fn empty_source_renders_empty_container() {
        let result = highlight(LanguageId::Rust, "");
        assert_eq!(result.to_html(), "<span class=\"hl\"></span>");
        let result = highlight(LanguageId::PlainText, "");
        assert_eq!(result.to_html(), "<span class=\"hl\"></span>");
    }

    #[test]
    fn identities_without_grammars_degrade_to_plain() {
        let result = highlight(LanguageId::Cmake, "add_executable(app main.c)");
        assert_eq!(
            result.to_html(),
            "<span class=\"hl\">add_executable(app main.c)</span>"
        );
    }

    #[test]
    fn rust_keywords_are_annotated() {
        let result = highlight(LanguageId::Rust, "fn main() {}");
        let html = result.to_html();
        assert!(html.contains("hl-"), "expected annotations in {html}");
        assert_eq!(stripped(&html), "fn main() {}");
    }

    #[test]
    fn stripping_markup_recovers_source_exactly() {
        let cases = [
            (LanguageId::Rust, "fn main() {\n    println!(\"<&>\");\n}\n"),
            (LanguageId::Ruby, "def hi\n  puts 'a && b'\nend"),
            (LanguageId::Json, "{\"k\": [1, 2, null]}"),
            (LanguageId::Html, "<p class=\"x\">5 &lt; 6</p>"),
            (LanguageId::Python, "def f():\n\treturn \"\\n\""),
            (LanguageId::PlainText, "no grammar\r\nhere\n"),
        ];
        for (language, source) in cases {
            let html = highlight(language, source).to_html();
            assert_eq!(stripped(&html), source, "{language:?} lost text");
        }
    }

    #[test]
    fn pathological_input_still_returns_markup() {
        // Unbalanced brackets, embedded nulls, and a lone surrogate-free
        // mix of multibyte text must never crash the engine.
        let source = "fn \u{0}((( \"unterminated\n日本語 ]]]";
        for language in [LanguageId::Rust, LanguageId::C, LanguageId::Json] {
            let html = highlight(language, source).to_html();
            assert_eq!(stripped(&html), source);
        }
    }

    #[test]
    fn multiline_string_spans_stay_balanced() {
        let source = "let s = \"line one\nline two\";";
        let result = highlight(LanguageId::Rust, source);
        let mut depth = 0i32;
        for event in result.events() {
            match event {
                MarkupEvent::Open { .. } => depth += 1,
                MarkupEvent::Close => {
                    depth -= 1;
                    assert!(depth >= 0);
                }
                MarkupEvent::Text { .. } => {}
            }
        }
        assert_eq!(depth, 0);
        assert_eq!(stripped(&result.to_html()), source);
    }

    #[test]
    fn text_ranges_cover_source_in_order() {
        let source = "const x = {a: 1, b: \"two\"};\n";
        let result = highlight(LanguageId::JavaScript, source);
        let mut cursor = 0;
        for event in result.events() {
            if let MarkupEvent::Text { start, end } = *event {
                assert_eq!(start, cursor);
                cursor = end;
            }
        }
        assert_eq!(cursor, source.len());
    }
}
