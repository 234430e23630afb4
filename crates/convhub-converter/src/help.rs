//! Plain-text usage for the conversion endpoint.

use std::fmt::Write;

use convhub_core::FormatRegistry;

const USAGE: &str = "\
ConvHub document conversion service

Usage:
  POST /api/convert/<command>   (multipart/form-data, field \"file\")

The command is a list of '/'-separated tokens read as key/value pairs:
  to/<format>          target format (required)
  from/<format>        source format (default: inferred from the file name)
  template/<name>      template stored for the target format
  <flag>               boolean engine flag, e.g. standalone
  <flag>/<value>       valued engine flag, e.g. toc-depth/2

When a key repeats, the last occurrence wins. Formats may carry extension
suffixes, e.g. markdown+smart.

Examples:
  POST /api/convert/to/pdf
  POST /api/convert/from/markdown/to/docx/template/report
  POST /api/convert/to/html/standalone/toc/highlight-style/tango

Templates:
  GET    /api/templates[?format=<format>]
  POST   /api/templates/<format>[?name=<name>]   (multipart field \"file\")
  DELETE /api/templates/<format>/<name>
";

/// Usage text followed by the formats and flags known to `registry`.
pub fn help_text(registry: &FormatRegistry) -> String {
    let mut text = String::from(USAGE);
    write_list(&mut text, "Source formats", registry.source_formats());
    write_list(&mut text, "Target formats", registry.target_formats());
    write_list(&mut text, "Boolean flags", registry.boolean_flags());
    write_list(&mut text, "Valued flags", registry.valued_flags());
    text
}

fn write_list<'a>(out: &mut String, title: &str, items: impl Iterator<Item = &'a str>) {
    let _ = write!(out, "\n{title}:\n");
    let mut line = String::from(" ");
    for item in items {
        if line.len() + item.len() + 1 > 78 {
            let _ = writeln!(out, "{line}");
            line = String::from(" ");
        }
        line.push(' ');
        line.push_str(item);
    }
    if line.trim().is_empty() {
        let _ = writeln!(out, "  (none)");
    } else {
        let _ = writeln!(out, "{line}");
    }
}
