//! Grammar registry
//!
//! Maps each [`LanguageId`] to a compiled tree-sitter highlight
//! configuration. Grammars are compiled once, lazily, on first use. A
//! grammar whose query fails to compile is logged and treated as absent,
//! so the language still resolves and renders as plain text.

use once_cell::sync::Lazy;
use tracing::warn;
use tree_sitter::Language;
use tree_sitter_highlight::HighlightConfiguration;

use crate::queries;
use crate::resolver::{ALL_LANGUAGES, LanguageId};

/// Capture names recognized across all queries, most specific last.
pub const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "function",
    "function.builtin",
    "function.method",
    "function.macro",
    "keyword",
    "label",
    "module",
    "number",
    "operator",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "string",
    "string.special",
    "tag",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.parameter",
    "variable.member",
];

/// CSS class emitted for each entry of [`HIGHLIGHT_NAMES`], index for index.
/// Derived by prefixing `hl-` and replacing dots with dashes.
pub const HIGHLIGHT_CLASSES: &[&str] = &[
    "hl-attribute",
    "hl-comment",
    "hl-constant",
    "hl-constant-builtin",
    "hl-constructor",
    "hl-function",
    "hl-function-builtin",
    "hl-function-method",
    "hl-function-macro",
    "hl-keyword",
    "hl-label",
    "hl-module",
    "hl-number",
    "hl-operator",
    "hl-property",
    "hl-punctuation",
    "hl-punctuation-bracket",
    "hl-punctuation-delimiter",
    "hl-string",
    "hl-string-special",
    "hl-tag",
    "hl-type",
    "hl-type-builtin",
    "hl-variable",
    "hl-variable-builtin",
    "hl-variable-parameter",
    "hl-variable-member",
];

fn load_config(language: Language, name: &str, highlights: &str) -> Option<HighlightConfiguration> {
    match HighlightConfiguration::new(language, name, highlights, "", "") {
        Ok(mut config) => {
            config.configure(HIGHLIGHT_NAMES);
            Some(config)
        }
        Err(err) => {
            warn!(language = name, "failed to compile highlight query: {err:?}");
            None
        }
    }
}

/// The grammar and highlight query for an identity, or `None` for
/// identities that resolve but have no loaded grammar.
fn grammar(id: LanguageId) -> Option<(Language, &'static str)> {
    let pair: (Language, &'static str) = match id {
        LanguageId::PlainText
        | LanguageId::Cmake
        | LanguageId::Docker
        | LanguageId::Make => return None,
        LanguageId::Bash => (
            tree_sitter_bash::LANGUAGE.into(),
            tree_sitter_bash::HIGHLIGHT_QUERY,
        ),
        LanguageId::C => (tree_sitter_c::LANGUAGE.into(), tree_sitter_c::HIGHLIGHT_QUERY),
        LanguageId::Cpp => (
            tree_sitter_cpp::LANGUAGE.into(),
            tree_sitter_cpp::HIGHLIGHT_QUERY,
        ),
        LanguageId::CSharp => (tree_sitter_c_sharp::LANGUAGE.into(), queries::C_SHARP),
        LanguageId::Css => (tree_sitter_css::LANGUAGE.into(), queries::CSS),
        LanguageId::Elixir => (
            tree_sitter_elixir::LANGUAGE.into(),
            tree_sitter_elixir::HIGHLIGHTS_QUERY,
        ),
        LanguageId::Go => (
            tree_sitter_go::LANGUAGE.into(),
            tree_sitter_go::HIGHLIGHTS_QUERY,
        ),
        LanguageId::Html => (tree_sitter_html::LANGUAGE.into(), queries::HTML),
        LanguageId::Ini => (tree_sitter_ini::LANGUAGE.into(), queries::INI),
        LanguageId::Java => (
            tree_sitter_java::LANGUAGE.into(),
            tree_sitter_java::HIGHLIGHTS_QUERY,
        ),
        LanguageId::JavaScript => (tree_sitter_javascript::LANGUAGE.into(), queries::JAVASCRIPT),
        LanguageId::Json => (tree_sitter_json::LANGUAGE.into(), queries::JSON),
        LanguageId::Markdown => (tree_sitter_md::LANGUAGE.into(), queries::MARKDOWN),
        LanguageId::Php => (
            tree_sitter_php::LANGUAGE_PHP.into(),
            tree_sitter_php::HIGHLIGHTS_QUERY,
        ),
        LanguageId::Python => (
            tree_sitter_python::LANGUAGE.into(),
            tree_sitter_python::HIGHLIGHTS_QUERY,
        ),
        LanguageId::Ruby => (tree_sitter_ruby::LANGUAGE.into(), queries::RUBY),
        LanguageId::Rust => (
            tree_sitter_rust::LANGUAGE.into(),
            tree_sitter_rust::HIGHLIGHTS_QUERY,
        ),
        LanguageId::Toml => (tree_sitter_toml_ng::LANGUAGE.into(), queries::TOML),
        LanguageId::Tsx => (tree_sitter_typescript::LANGUAGE_TSX.into(), queries::TSX),
        LanguageId::TypeScript => (
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            queries::TYPESCRIPT,
        ),
        LanguageId::Xml => (
            tree_sitter_xml::LANGUAGE_XML.into(),
            tree_sitter_xml::XML_HIGHLIGHT_QUERY,
        ),
        LanguageId::Yaml => (tree_sitter_yaml::LANGUAGE.into(), queries::YAML),
    };
    Some(pair)
}

static CONFIGS: Lazy<Vec<(LanguageId, Option<HighlightConfiguration>)>> = Lazy::new(|| {
    ALL_LANGUAGES
        .iter()
        .map(|&id| {
            let config = grammar(id)
                .and_then(|(language, highlights)| load_config(language, id.name(), highlights));
            (id, config)
        })
        .collect()
});

/// Compiled highlight configuration for an identity, if it has one.
pub fn grammar_for(id: LanguageId) -> Option<&'static HighlightConfiguration> {
    CONFIGS
        .iter()
        .find(|(known, _)| *known == id)
        .and_then(|(_, config)| config.as_ref())
}

/// Stable identifiers of every language the registry knows, plain text
/// included.
pub fn supported_languages() -> Vec<&'static str> {
    ALL_LANGUAGES.iter().map(|id| id.name()).collect()
}
