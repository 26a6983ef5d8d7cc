//! Language resolution, syntax highlighting, and line segmentation.
//!
//! The pipeline is three pure stages: [`resolve`] maps a language name or
//! filename to a [`LanguageId`], [`highlight`] annotates source text with
//! that grammar, and [`segment`]/[`render`] split the result into
//! line-addressable records or a numbered table. Every stage is total —
//! unknown languages become plain text, and highlighting failures degrade
//! to an unannotated span rather than an error.

pub mod config;
pub mod engine;
mod queries;
pub mod resolver;
pub mod segment;

pub use config::{HIGHLIGHT_CLASSES, HIGHLIGHT_NAMES, supported_languages};
pub use engine::{Highlighted, MarkupEvent, highlight};
pub use limn_protocol::SelectorKind;
pub use resolver::{ALL_LANGUAGES, LanguageId, resolve};
pub use segment::{LineRecord, RenderOptions, render, segment};

/// Resolve a selector and render its highlighted markup in one step.
///
/// This is the whole server-side pipeline for a single request frame.
pub fn highlight_to_html(kind: SelectorKind, selector: &str, source: &str) -> String {
    let language = resolve(kind, selector);
    highlight(language, source).to_html()
}

/// Render one file of a paste the way the page renderer does.
///
/// An explicit language override wins over filename guessing; the override
/// value goes through the same alias table as a snippet selector.
pub fn highlight_file(
    filename: &str,
    language_override: Option<&str>,
    source: &str,
    options: &RenderOptions,
) -> String {
    let language = match language_override {
        Some(name) => resolve(SelectorKind::Snippet, name),
        None => resolve(SelectorKind::File, filename),
    };
    render(&highlight(language, source), options)
}
