//! HTML preview for authorization templates
//!
//! Supports only what legal-style templates need: `#`/`##`/`###` headers,
//! `**bold**`, `*italic*`, `* item` lists and blank-line paragraphs.
//! Remaining placeholders are wrapped in a `<mark>` so unfilled slots stand
//! out while editing.
//!
//! The output is inserted as raw HTML by the UI. Nothing is escaped,
//! including substituted values.

use crate::substitute::substitute;
use crate::variables::find_placeholders;
use lazy_static::lazy_static;
use oscal_types::VariableValues;
use regex::Regex;

/// CSS class on the `<mark>` around an unfilled placeholder
pub const PLACEHOLDER_CLASS: &str = "template-variable";

lazy_static! {
    static ref BOLD_PATTERN: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref ITALIC_PATTERN: Regex = Regex::new(r"\*([^*]+?)\*").unwrap();
}

/// Render template text (raw or partially substituted) to an HTML fragment
pub fn render_preview(text: &str) -> String {
    render_markdown(&highlight_placeholders(text))
}

/// Substitute `values` into `text`, then render the result
pub fn render_completed(text: &str, values: &VariableValues) -> String {
    render_preview(&substitute(text, values))
}

fn highlight_placeholders(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for placeholder in find_placeholders(text) {
        out.push_str(&text[cursor..placeholder.start]);
        out.push_str("<mark class=\"");
        out.push_str(PLACEHOLDER_CLASS);
        out.push_str("\">");
        out.push_str(placeholder.raw);
        out.push_str("</mark>");
        cursor = placeholder.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Block-level state while walking lines
#[derive(Default)]
struct Blocks {
    html: Vec<String>,
    paragraph: Vec<String>,
    list: Vec<String>,
}

impl Blocks {
    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let body = self.paragraph.join("<br>\n");
            self.html.push(format!("<p>{}</p>", body));
            self.paragraph.clear();
        }
    }

    fn flush_list(&mut self) {
        if !self.list.is_empty() {
            let mut block = String::from("<ul>\n");
            for item in self.list.drain(..) {
                block.push_str("<li>");
                block.push_str(&item);
                block.push_str("</li>\n");
            }
            block.push_str("</ul>");
            self.html.push(block);
        }
    }

    fn flush(&mut self) {
        self.flush_paragraph();
        self.flush_list();
    }
}

fn render_markdown(text: &str) -> String {
    let mut blocks = Blocks::default();

    for line in text.lines() {
        let line = line.trim();

        if line.is_empty() {
            blocks.flush();
        } else if let Some((level, content)) = header(line) {
            blocks.flush();
            blocks
                .html
                .push(format!("<h{level}>{}</h{level}>", inline(content)));
        } else if let Some(item) = line.strip_prefix("* ") {
            blocks.flush_paragraph();
            blocks.list.push(inline(item.trim()));
        } else {
            blocks.flush_list();
            blocks.paragraph.push(inline(line));
        }
    }

    blocks.flush();
    blocks.html.join("\n")
}

fn header(line: &str) -> Option<(u8, &str)> {
    [("### ", 3), ("## ", 2), ("# ", 1)]
        .into_iter()
        .find_map(|(prefix, level)| line.strip_prefix(prefix).map(|rest| (level, rest.trim())))
}

fn inline(text: &str) -> String {
    let bold = BOLD_PATTERN.replace_all(text, "<strong>$1</strong>");
    ITALIC_PATTERN
        .replace_all(&bold, "<em>$1</em>")
        .into_owned()
}
