//! Line segmentation
//!
//! Splits highlighted markup into line records without losing annotation
//! spans that cross line boundaries: every open span is closed just before
//! the boundary and reopened, in the same nesting order, just after. Each
//! record is therefore a self-contained fragment that renders correctly on
//! its own. Optionally renders the records as a numbered two-column table.
//!
//! Segmentation works on the structural event model produced by the
//! engine, never on the markup string, so the reopen invariant is a direct
//! consequence of the walk rather than something recovered by parsing.

use std::mem;

use crate::engine::{Highlighted, MarkupEvent, escape_into};

/// One line of highlighted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// 1-based position of the line.
    pub index: usize,
    /// Syntax classes open at the start of the line, outermost first.
    pub classes: Vec<&'static str>,
    /// Self-contained annotated markup for this line, no trailing break.
    pub html: String,
}

/// Rendering options for [`render`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Wrap lines in a numbered table instead of one flat fragment.
    pub numbered: bool,
    /// Number shown for the first line.
    pub start_index: usize,
    /// Namespace for line anchors, so several blocks can share a page.
    pub id_prefix: String,
    /// Line counts at or below this render as the unsegmented fragment.
    /// The default of 1 keeps single-line snippets flat; 0 forces a table
    /// even for one line.
    pub single_line_threshold: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            numbered: false,
            start_index: 1,
            id_prefix: String::new(),
            single_line_threshold: 1,
        }
    }
}

/// Split highlighted output into per-line records.
///
/// Lines are delimited by `\n` in the source text; the delimiter itself is
/// not part of any record. A final line terminator produces no trailing
/// empty record. An empty source still yields one empty record.
pub fn segment(highlighted: &Highlighted) -> Vec<LineRecord> {
    let source = highlighted.source();
    let mut records = Vec::new();
    let mut open: Vec<&'static str> = Vec::new();
    let mut line_classes: Vec<&'static str> = Vec::new();
    let mut html = String::new();
    let mut index = 1usize;

    for event in highlighted.events() {
        match *event {
            MarkupEvent::Open { class } => {
                push_open(&mut html, class);
                open.push(class);
            }
            MarkupEvent::Close => {
                html.push_str("</span>");
                open.pop();
            }
            MarkupEvent::Text { start, end } => {
                let mut rest = &source[start..end];
                while let Some(pos) = rest.find('\n') {
                    escape_into(&mut html, &rest[..pos]);
                    for _ in &open {
                        html.push_str("</span>");
                    }
                    records.push(LineRecord {
                        index,
                        classes: line_classes.clone(),
                        html: mem::take(&mut html),
                    });
                    index += 1;
                    for class in &open {
                        push_open(&mut html, class);
                    }
                    line_classes = open.clone();
                    rest = &rest[pos + 1..];
                }
                escape_into(&mut html, rest);
            }
        }
    }

    if !source.ends_with('\n') {
        records.push(LineRecord {
            index,
            classes: line_classes,
            html,
        });
    }
    records
}

/// Render highlighted output, segmenting into a numbered table when asked
/// and worthwhile.
///
/// Without `numbered`, or when the line count does not exceed the
/// single-line threshold, this is exactly [`Highlighted::to_html`].
pub fn render(highlighted: &Highlighted, options: &RenderOptions) -> String {
    if !options.numbered {
        return highlighted.to_html();
    }
    let records = segment(highlighted);
    if records.len() <= options.single_line_threshold {
        return highlighted.to_html();
    }
    render_table(&records, options)
}

fn render_table(records: &[LineRecord], options: &RenderOptions) -> String {
    let mut prefix = String::new();
    if !options.id_prefix.is_empty() {
        escape_into(&mut prefix, &options.id_prefix);
        prefix.push('-');
    }

    let mut html = String::from("<table class=\"hl-ln\">");
    for record in records {
        let number = record.index - 1 + options.start_index;
        html.push_str("<tr><td class=\"hl-ln-numbers\">");
        html.push_str(&format!(
            "<a class=\"hl-ln-line hl-ln-n\" data-line-number=\"{number}\" \
             name=\"{prefix}l{number}\" href=\"#{prefix}l{number}\"></a>"
        ));
        html.push_str("</td><td class=\"hl-ln-code\"><div class=\"hl-ln-line\">");
        if record.html.is_empty() {
            // An empty cell would collapse; keep the block height.
            html.push_str("&nbsp;");
        } else {
            html.push_str(&record.html);
        }
        html.push_str("</div></td></tr>");
    }
    html.push_str("</table>");
    html
}

fn push_open(html: &mut String, class: &str) {
    html.push_str("<span class=\"");
    html.push_str(class);
    html.push_str("\">");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{highlight, stripped};
    use crate::resolver::LanguageId;

    fn annotated(source: &str, events: Vec<MarkupEvent>) -> Highlighted {
        Highlighted::from_parts(source.to_owned(), events)
    }

    fn table_options() -> RenderOptions {
        RenderOptions {
            numbered: true,
            single_line_threshold: 0,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn splits_plain_text_into_lines() {
        let result = highlight(LanguageId::PlainText, "one\ntwo\nthree");
        let records = segment(&result);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].index, 1);
        assert_eq!(records[2].index, 3);
        assert_eq!(records[0].html, "one");
        assert_eq!(records[1].html, "two");
        assert_eq!(records[2].html, "three");
        assert!(records.iter().all(|r| r.classes.is_empty()));
    }

    #[test]
    fn trailing_terminator_produces_no_extra_record() {
        let result = highlight(LanguageId::PlainText, "one\ntwo\n");
        let records = segment(&result);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].html, "two");
    }

    #[test]
    fn empty_source_yields_one_empty_record() {
        let records = segment(&highlight(LanguageId::PlainText, ""));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].html, "");
    }

    #[test]
    fn spans_crossing_boundaries_are_closed_and_reopened() {
        // "ab\ncd" entirely inside a string span.
        let result = annotated(
            "ab\ncd",
            vec![
                MarkupEvent::Open { class: "hl-string" },
                MarkupEvent::Text { start: 0, end: 5 },
                MarkupEvent::Close,
            ],
        );
        let records = segment(&result);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].html, "<span class=\"hl-string\">ab</span>");
        assert_eq!(records[1].html, "<span class=\"hl-string\">cd</span>");
        assert_eq!(records[0].classes, Vec::<&str>::new());
        assert_eq!(records[1].classes, vec!["hl-string"]);
    }

    #[test]
    fn nested_spans_reopen_in_original_order() {
        // outer(inner("x\ny")) — both spans cross the boundary.
        let result = annotated(
            "x\ny",
            vec![
                MarkupEvent::Open { class: "hl-string" },
                MarkupEvent::Open {
                    class: "hl-string-special",
                },
                MarkupEvent::Text { start: 0, end: 3 },
                MarkupEvent::Close,
                MarkupEvent::Close,
            ],
        );
        let records = segment(&result);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1].html,
            "<span class=\"hl-string\"><span class=\"hl-string-special\">y</span></span>"
        );
        assert_eq!(records[1].classes, vec!["hl-string", "hl-string-special"]);
    }

    #[test]
    fn rejoined_records_reproduce_the_source() {
        let sources = [
            "fn main() {\n    let s = \"a\nb\";\n}",
            "plain\r\nwith carriage returns\rkept",
            "def f():\n    return [1,\n            2]",
        ];
        for source in sources {
            for language in [LanguageId::Rust, LanguageId::Python, LanguageId::PlainText] {
                let records = segment(&highlight(language, source));
                let rejoined = records
                    .iter()
                    .map(|r| stripped(&r.html))
                    .collect::<Vec<_>>()
                    .join("\n");
                assert_eq!(rejoined, source, "{language:?}");
            }
        }
    }

    #[test]
    fn record_count_matches_line_count() {
        let source = "a\nb\nc\nd";
        let records = segment(&highlight(LanguageId::PlainText, source));
        assert_eq!(records.len(), source.split('\n').count());
    }

    #[test]
    fn multiline_rust_string_is_segmentable() {
        let source = "let s = \"line one\nline two\";";
        let records = segment(&highlight(LanguageId::Rust, source));
        assert_eq!(records.len(), 2);
        let rejoined = format!("{}\n{}", stripped(&records[0].html), stripped(&records[1].html));
        assert_eq!(rejoined, source);
    }

    #[test]
    fn unnumbered_render_is_the_flat_fragment() {
        let result = highlight(LanguageId::PlainText, "one\ntwo");
        let rendered = render(&result, &RenderOptions::default());
        assert_eq!(rendered, result.to_html());
    }

    #[test]
    fn single_line_stays_flat_under_default_threshold() {
        let result = highlight(LanguageId::PlainText, "just one line");
        let rendered = render(
            &result,
            &RenderOptions {
                numbered: true,
                ..RenderOptions::default()
            },
        );
        assert_eq!(rendered, result.to_html());
        assert!(!rendered.contains("<table"));
    }

    #[test]
    fn zero_threshold_forces_a_table_for_one_line() {
        let result = highlight(LanguageId::PlainText, "solo");
        let rendered = render(&result, &table_options());
        assert!(rendered.starts_with("<table class=\"hl-ln\">"));
        assert!(rendered.contains("data-line-number=\"1\""));
        assert!(rendered.contains("<div class=\"hl-ln-line\">solo</div>"));
    }

    #[test]
    fn numbered_table_has_anchored_rows() {
        let result = highlight(LanguageId::PlainText, "a\nb\nc");
        let rendered = render(
            &result,
            &RenderOptions {
                numbered: true,
                id_prefix: "f2".into(),
                ..RenderOptions::default()
            },
        );
        assert!(rendered.contains("name=\"f2-l1\""));
        assert!(rendered.contains("href=\"#f2-l3\""));
        assert!(rendered.contains("data-line-number=\"2\""));
        assert!(rendered.contains("<td class=\"hl-ln-numbers\">"));
        assert!(rendered.contains("<td class=\"hl-ln-code\">"));
    }

    #[test]
    fn anchors_without_prefix_have_no_dash() {
        let result = highlight(LanguageId::PlainText, "a\nb");
        let rendered = render(&result, &table_options());
        assert!(rendered.contains("name=\"l1\""));
        assert!(rendered.contains("href=\"#l2\""));
    }

    #[test]
    fn start_index_offsets_the_numbering() {
        let result = highlight(LanguageId::PlainText, "a\nb");
        let rendered = render(
            &result,
            &RenderOptions {
                numbered: true,
                start_index: 10,
                ..RenderOptions::default()
            },
        );
        assert!(rendered.contains("data-line-number=\"10\""));
        assert!(rendered.contains("data-line-number=\"11\""));
        assert!(!rendered.contains("data-line-number=\"1\" "));
    }

    #[test]
    fn blank_lines_keep_their_height() {
        let result = highlight(LanguageId::PlainText, "a\n\nb");
        let rendered = render(&result, &table_options());
        assert!(rendered.contains("<div class=\"hl-ln-line\">&nbsp;</div>"));
    }

    #[test]
    fn whitespace_only_lines_are_not_blanked() {
        let result = highlight(LanguageId::PlainText, "a\n  \nb");
        let rendered = render(&result, &table_options());
        assert!(rendered.contains("<div class=\"hl-ln-line\">  </div>"));
    }

    #[test]
    fn blank_lines_inside_spans_keep_their_wrappers() {
        // The middle line is empty but carries a reopened span; only a
        // line with no markup at all gets the height placeholder.
        let result = annotated(
            "a\n\nb",
            vec![
                MarkupEvent::Open { class: "hl-string" },
                MarkupEvent::Text { start: 0, end: 4 },
                MarkupEvent::Close,
            ],
        );
        let rendered = render(&result, &table_options());
        assert!(
            rendered.contains("<div class=\"hl-ln-line\"><span class=\"hl-string\"></span></div>")
        );
        assert!(!rendered.contains("&nbsp;"));
    }
}
