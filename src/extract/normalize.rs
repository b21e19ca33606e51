// src/extract/normalize.rs
use once_cell::sync::OnceCell;
use regex::Regex;
use scraper::{Html, Node};

/// Collapse every whitespace run into a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("static whitespace regex"));
    re_ws.replace_all(s, " ").trim().to_string()
}

/// Plain text of an HTML document: every text node in document order, joined
/// by a space. `<script>`/`<style>` bodies and comments are skipped; entities
/// come back decoded from the parser.
pub fn html_to_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut parts: Vec<&str> = Vec::new();
    for node in doc.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "script" | "style"))
        });
        if !hidden {
            parts.push(&**text);
        }
    }
    parts.join(" ")
}

/// Filing document -> whitespace-collapsed plain text ready for span extraction.
pub fn normalize_document(raw: &str) -> String {
    collapse_whitespace(&html_to_text(raw))
}
