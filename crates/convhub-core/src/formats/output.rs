//! Output file extension and MIME type for each target format.

use super::registry::base_format;

/// File extension (without dot) used for the engine's output file.
pub fn output_extension(target: &str) -> &str {
    match base_format(target) {
        "pdf" | "beamer" => "pdf",
        "html" | "html4" | "html5" | "revealjs" | "s5" | "slideous" | "slidy" | "dzslides" => {
            "html"
        }
        "markdown" | "markdown_github" | "markdown_mmd" | "markdown_phpextra"
        | "markdown_strict" | "gfm" | "commonmark" | "commonmark_x" => "md",
        "latex" => "tex",
        "context" => "tex",
        "plain" => "txt",
        "asciidoc" | "asciidoctor" => "adoc",
        "docbook" | "docbook4" | "docbook5" | "jats" | "tei" | "opml" | "xwiki" => "xml",
        "epub" | "epub2" | "epub3" => "epub",
        "json" | "csljson" => "json",
        "native" => "hs",
        "mediawiki" | "dokuwiki" | "zimwiki" | "jira" => "txt",
        "opendocument" => "xml",
        "texinfo" => "texi",
        "bibtex" | "biblatex" => "bib",
        "man" => "1",
        "typst" => "typ",
        other => other,
    }
}

/// MIME type for a response carrying the given target format.
pub fn mime_type(target: &str) -> &'static str {
    match output_extension(target) {
        "pdf" => "application/pdf",
        "html" => "text/html; charset=utf-8",
        "md" => "text/markdown; charset=utf-8",
        "tex" | "typ" | "1" | "texi" | "bib" | "hs" | "adoc" | "rst" | "org" | "txt" => {
            "text/plain; charset=utf-8"
        }
        "xml" | "fb2" | "icml" => "application/xml",
        "json" | "ipynb" => "application/json",
        "epub" => "application/epub+zip",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "odt" => "application/vnd.oasis.opendocument.text",
        "rtf" => "application/rtf",
        _ => "application/octet-stream",
    }
}
