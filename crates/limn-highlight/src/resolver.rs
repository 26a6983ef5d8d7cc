//! Language resolution
//!
//! Maps explicit language names and filenames to a lexer identity. The
//! resolution is total: anything unrecognized lands on [`LanguageId::PlainText`],
//! never an error. Name matching is case-sensitive exact match against the
//! known identifiers and aliases.

use limn_protocol::SelectorKind;

/// Identity of one specific grammar.
///
/// An identity may exist without a loadable grammar (CMake, Make, Docker):
/// those resolve normally but highlight as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    #[default]
    PlainText,
    Bash,
    C,
    Cmake,
    Cpp,
    CSharp,
    Css,
    Docker,
    Elixir,
    Go,
    Html,
    Ini,
    Java,
    JavaScript,
    Json,
    Make,
    Markdown,
    Php,
    Python,
    Ruby,
    Rust,
    Toml,
    Tsx,
    TypeScript,
    Xml,
    Yaml,
}

/// Every identity, in registry order.
pub const ALL_LANGUAGES: [LanguageId; 26] = [
    LanguageId::PlainText,
    LanguageId::Bash,
    LanguageId::C,
    LanguageId::Cmake,
    LanguageId::Cpp,
    LanguageId::CSharp,
    LanguageId::Css,
    LanguageId::Docker,
    LanguageId::Elixir,
    LanguageId::Go,
    LanguageId::Html,
    LanguageId::Ini,
    LanguageId::Java,
    LanguageId::JavaScript,
    LanguageId::Json,
    LanguageId::Make,
    LanguageId::Markdown,
    LanguageId::Php,
    LanguageId::Python,
    LanguageId::Ruby,
    LanguageId::Rust,
    LanguageId::Toml,
    LanguageId::Tsx,
    LanguageId::TypeScript,
    LanguageId::Xml,
    LanguageId::Yaml,
];

/// Resolve a selector to a lexer identity. Total: unknown selectors resolve
/// to plain text.
pub fn resolve(kind: SelectorKind, selector: &str) -> LanguageId {
    match kind {
        SelectorKind::Snippet => LanguageId::from_name(selector),
        SelectorKind::File => LanguageId::from_filename(selector),
    }
}

impl LanguageId {
    /// Look up an explicit language identifier or alias.
    pub fn from_name(name: &str) -> Self {
        match name {
            "bash" | "sh" | "zsh" | "shell" | "console" => LanguageId::Bash,
            "c" | "h" => LanguageId::C,
            "cmake" => LanguageId::Cmake,
            "cpp" | "c++" | "cc" | "cxx" | "hpp" | "hxx" | "hh" => LanguageId::Cpp,
            "csharp" | "cs" | "c#" => LanguageId::CSharp,
            "css" => LanguageId::Css,
            "docker" | "dockerfile" => LanguageId::Docker,
            "elixir" | "ex" | "exs" => LanguageId::Elixir,
            "go" | "golang" => LanguageId::Go,
            "html" | "htm" => LanguageId::Html,
            "ini" | "cfg" | "conf" => LanguageId::Ini,
            "java" => LanguageId::Java,
            "javascript" | "js" | "mjs" | "cjs" | "jsx" => LanguageId::JavaScript,
            "json" | "jsonc" => LanguageId::Json,
            "make" | "makefile" | "mk" => LanguageId::Make,
            "markdown" | "md" | "mdx" => LanguageId::Markdown,
            "php" | "phtml" => LanguageId::Php,
            "plaintext" | "plain" | "text" | "txt" => LanguageId::PlainText,
            "python" | "py" | "pyw" | "pyi" => LanguageId::Python,
            "ruby" | "rb" | "rake" | "gemspec" => LanguageId::Ruby,
            "rust" | "rs" => LanguageId::Rust,
            "toml" => LanguageId::Toml,
            "tsx" => LanguageId::Tsx,
            "typescript" | "ts" | "mts" | "cts" => LanguageId::TypeScript,
            "xml" | "xsl" | "xslt" => LanguageId::Xml,
            "yaml" | "yml" => LanguageId::Yaml,
            _ => LanguageId::PlainText,
        }
    }

    /// Guess the language from a filename.
    ///
    /// The guesser chain runs in priority order: special-cased whole
    /// filenames first, then extensions whose natural grammar differs from
    /// their apparent one, then the plain suffix after the last dot looked
    /// up as a name. Callers rely on this order.
    pub fn from_filename(name: &str) -> Self {
        if let Some(id) = Self::from_special_filename(name) {
            return id;
        }
        let Some((_, ext)) = name.rsplit_once('.') else {
            return LanguageId::PlainText;
        };
        if let Some(id) = Self::from_special_extension(ext) {
            return id;
        }
        Self::from_name(ext)
    }

    /// Whole filenames whose language has nothing to do with their suffix.
    fn from_special_filename(name: &str) -> Option<Self> {
        match name {
            "CMakeLists.txt" => Some(LanguageId::Cmake),
            "Makefile" | "makefile" | "GNUmakefile" => Some(LanguageId::Make),
            "Dockerfile" => Some(LanguageId::Docker),
            _ => None,
        }
    }

    /// Extensions that are not language names of their own. SVG is XML.
    fn from_special_extension(ext: &str) -> Option<Self> {
        match ext {
            "svg" => Some(LanguageId::Xml),
            _ => None,
        }
    }

    /// Stable lower-case identifier, as listed by `supported_languages`.
    pub fn name(self) -> &'static str {
        match self {
            LanguageId::PlainText => "plaintext",
            LanguageId::Bash => "bash",
            LanguageId::C => "c",
            LanguageId::Cmake => "cmake",
            LanguageId::Cpp => "cpp",
            LanguageId::CSharp => "csharp",
            LanguageId::Css => "css",
            LanguageId::Docker => "docker",
            LanguageId::Elixir => "elixir",
            LanguageId::Go => "go",
            LanguageId::Html => "html",
            LanguageId::Ini => "ini",
            LanguageId::Java => "java",
            LanguageId::JavaScript => "javascript",
            LanguageId::Json => "json",
            LanguageId::Make => "make",
            LanguageId::Markdown => "markdown",
            LanguageId::Php => "php",
            LanguageId::Python => "python",
            LanguageId::Ruby => "ruby",
            LanguageId::Rust => "rust",
            LanguageId::Toml => "toml",
            LanguageId::Tsx => "tsx",
            LanguageId::TypeScript => "typescript",
            LanguageId::Xml => "xml",
            LanguageId::Yaml => "yaml",
        }
    }

    /// Human-facing name.
    pub fn display_name(self) -> &'static str {
        match self {
            LanguageId::PlainText => "Plain Text",
            LanguageId::Bash => "Bash",
            LanguageId::C => "C",
            LanguageId::Cmake => "CMake",
            LanguageId::Cpp => "C++",
            LanguageId::CSharp => "C#",
            LanguageId::Css => "CSS",
            LanguageId::Docker => "Dockerfile",
            LanguageId::Elixir => "Elixir",
            LanguageId::Go => "Go",
            LanguageId::Html => "HTML",
            LanguageId::Ini => "INI",
            LanguageId::Java => "Java",
            LanguageId::JavaScript => "JavaScript",
            LanguageId::Json => "JSON",
            LanguageId::Make => "Makefile",
            LanguageId::Markdown => "Markdown",
            LanguageId::Php => "PHP",
            LanguageId::Python => "Python",
            LanguageId::Ruby => "Ruby",
            LanguageId::Rust => "Rust",
            LanguageId::Toml => "TOML",
            LanguageId::Tsx => "TSX",
            LanguageId::TypeScript => "TypeScript",
            LanguageId::Xml => "XML",
            LanguageId::Yaml => "YAML",
        }
    }
}
