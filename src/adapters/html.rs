//! Text extraction helpers over `scraper` documents.

use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Node, Selector};

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

const EMPHASIS_ELEMENTS: &[&str] = &["strong", "b"];

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ScrapeError::parse(format!("invalid selector '{}': {:?}", css, e)))
}

/// Concatenated text of all descendants, like the DOM's `textContent`.
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text with a line break at every `<br>` and around block elements, so
/// that one visual line of the page becomes one line of text.
pub fn block_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, false, &mut out);
    out
}

/// Like [`block_text`], with `<strong>`/`<b>` runs wrapped in `**`.
pub fn block_text_marked(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, true, &mut out);
    out
}

fn collect_text(element: ElementRef<'_>, mark_emphasis: bool, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };

                if BLOCK_ELEMENTS.contains(&name) {
                    out.push('\n');
                    collect_text(child_el, mark_emphasis, out);
                    out.push('\n');
                } else if mark_emphasis && EMPHASIS_ELEMENTS.contains(&name) {
                    let mut inner = String::new();
                    collect_text(child_el, mark_emphasis, &mut inner);
                    let trimmed = inner.trim();
                    if trimmed.is_empty() || trimmed.contains('\n') {
                        out.push_str(&inner);
                    } else {
                        out.push_str("**");
                        out.push_str(trimmed);
                        out.push_str("**");
                    }
                } else {
                    collect_text(child_el, mark_emphasis, out);
                }
            }
            _ => {}
        }
    }
}

/// Collapses runs of whitespace (including non-breaking spaces) to one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
