//! Registry of source formats, target formats, and recognized engine flags.
//!
//! The registry is built once at startup and shared read-only. Format
//! tokens may carry Pandoc extension suffixes (`markdown+smart-raw_html`);
//! membership is always tested on the base name.

use std::collections::BTreeSet;

/// Formats Pandoc can read.
const SOURCE_FORMATS: &[&str] = &[
    "biblatex",
    "bibtex",
    "commonmark",
    "commonmark_x",
    "creole",
    "csljson",
    "csv",
    "docbook",
    "docx",
    "dokuwiki",
    "epub",
    "fb2",
    "gfm",
    "haddock",
    "html",
    "ipynb",
    "jats",
    "jira",
    "json",
    "latex",
    "man",
    "markdown",
    "markdown_github",
    "markdown_mmd",
    "markdown_phpextra",
    "markdown_strict",
    "mediawiki",
    "muse",
    "native",
    "odt",
    "opml",
    "org",
    "rst",
    "rtf",
    "t2t",
    "textile",
    "tikiwiki",
    "tsv",
    "twiki",
    "typst",
    "vimwiki",
];

/// Formats Pandoc can write.
const TARGET_FORMATS: &[&str] = &[
    "asciidoc",
    "asciidoctor",
    "beamer",
    "biblatex",
    "bibtex",
    "commonmark",
    "commonmark_x",
    "context",
    "csljson",
    "docbook",
    "docbook4",
    "docbook5",
    "docx",
    "dokuwiki",
    "dzslides",
    "epub",
    "epub2",
    "epub3",
    "fb2",
    "gfm",
    "haddock",
    "html",
    "html4",
    "html5",
    "icml",
    "ipynb",
    "jats",
    "jira",
    "json",
    "latex",
    "man",
    "markdown",
    "markdown_github",
    "markdown_mmd",
    "markdown_phpextra",
    "markdown_strict",
    "mediawiki",
    "ms",
    "muse",
    "native",
    "odt",
    "opendocument",
    "opml",
    "org",
    "pdf",
    "plain",
    "pptx",
    "revealjs",
    "rst",
    "rtf",
    "s5",
    "slideous",
    "slidy",
    "tei",
    "texinfo",
    "textile",
    "typst",
    "xwiki",
    "zimwiki",
];

/// Flags that take no argument.
const BOOLEAN_FLAGS: &[&str] = &[
    "ascii",
    "citeproc",
    "embed-resources",
    "file-scope",
    "html-q-tags",
    "incremental",
    "listings",
    "no-check-certificate",
    "no-highlight",
    "number-sections",
    "preserve-tabs",
    "reference-links",
    "section-divs",
    "self-contained",
    "standalone",
    "strip-comments",
    "table-of-contents",
    "toc",
];

/// Flags that take one argument. Advisory: unknown valued flags still pass.
const VALUED_FLAGS: &[&str] = &[
    "columns",
    "css",
    "dpi",
    "eol",
    "highlight-style",
    "markdown-headings",
    "metadata",
    "number-offset",
    "pdf-engine",
    "reference-location",
    "shift-heading-level-by",
    "slide-level",
    "tab-stop",
    "title-prefix",
    "toc-depth",
    "top-level-division",
    "variable",
    "wrap",
];

/// Strip Pandoc extension suffixes from a format token.
///
/// `markdown+smart-raw_html` becomes `markdown`.
pub fn base_format(format: &str) -> &str {
    match format.find(['+', '-']) {
        Some(idx) => &format[..idx],
        None => format,
    }
}

/// Immutable lookup tables for formats and flags.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    source_formats: BTreeSet<String>,
    target_formats: BTreeSet<String>,
    boolean_flags: BTreeSet<String>,
    valued_flags: BTreeSet<String>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new(SOURCE_FORMATS, TARGET_FORMATS, BOOLEAN_FLAGS, VALUED_FLAGS)
    }
}

impl FormatRegistry {
    /// Build a registry from explicit tables.
    pub fn new<S: AsRef<str>>(
        source_formats: &[S],
        target_formats: &[S],
        boolean_flags: &[S],
        valued_flags: &[S],
    ) -> Self {
        fn collect<S: AsRef<str>>(items: &[S]) -> BTreeSet<String> {
            items.iter().map(|s| s.as_ref().to_string()).collect()
        }

        Self {
            source_formats: collect(source_formats),
            target_formats: collect(target_formats),
            boolean_flags: collect(boolean_flags),
            valued_flags: collect(valued_flags),
        }
    }

    /// Whether `format` (extensions allowed) is a valid conversion target.
    pub fn is_valid_target_format(&self, format: &str) -> bool {
        self.target_formats.contains(base_format(format))
    }

    /// Whether `format` (extensions allowed) is a valid conversion source.
    pub fn is_valid_source_format(&self, format: &str) -> bool {
        self.source_formats.contains(base_format(format))
    }

    /// Whether `name` is a flag listed in the help text.
    pub fn is_recognized_flag(&self, name: &str) -> bool {
        self.boolean_flags.contains(name) || self.valued_flags.contains(name)
    }

    /// Whether `name` is a recognized flag that takes no argument.
    pub fn is_boolean_flag(&self, name: &str) -> bool {
        self.boolean_flags.contains(name)
    }

    /// Whether `name` is a recognized flag that requires a value.
    pub fn is_valued_flag(&self, name: &str) -> bool {
        self.valued_flags.contains(name)
    }

    /// Source formats, sorted.
    pub fn source_formats(&self) -> impl Iterator<Item = &str> {
        self.source_formats.iter().map(String::as_str)
    }

    /// Target formats, sorted.
    pub fn target_formats(&self) -> impl Iterator<Item = &str> {
        self.target_formats.iter().map(String::as_str)
    }

    /// Boolean flags, sorted.
    pub fn boolean_flags(&self) -> impl Iterator<Item = &str> {
        self.boolean_flags.iter().map(String::as_str)
    }

    /// Valued flags, sorted.
    pub fn valued_flags(&self) -> impl Iterator<Item = &str> {
        self.valued_flags.iter().map(String::as_str)
    }
}
