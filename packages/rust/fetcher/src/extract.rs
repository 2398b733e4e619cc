//! Visible-text extraction from fetched HTML.
//!
//! Approximates what a browser would render as the body's text: text nodes
//! under `<body>` are concatenated as-is, non-rendered elements are skipped,
//! block-level boundaries become a single space, and whitespace is collapsed.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text content is never rendered.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg", "head"];

/// Elements that start a new line of rendered text.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "details", "dialog", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table",
    "td", "th", "tr", "ul",
];

/// Extract the visible text of a document's `<body>`.
pub fn visible_text(doc: &Html) -> String {
    let body_sel = Selector::parse("body").expect("valid selector");
    let Some(body) = doc.select(&body_sel).next() else {
        return String::new();
    };

    let mut raw = String::new();
    append_rendered(body, &mut raw);
    collapse_whitespace(&raw)
}

fn append_rendered(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if HIDDEN_TAGS.contains(&name) {
                    continue;
                }
                let block = BLOCK_TAGS.contains(&name);
                if block {
                    out.push(' ');
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    append_rendered(child_el, out);
                }
                if block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

/// The document's `<title>`, if present and non-empty.
pub fn page_title(doc: &Html) -> Option<String> {
    let title_sel = Selector::parse("title").expect("valid selector");
    doc.select(&title_sel)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

fn collapse_whitespace(text: &str) -> String {
    static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
    WS_RE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scripts_and_styles() {
        let doc = Html::parse_document(
            r#"<html><head><title>Jobs</title><style>body { color: red; }</style></head>
            <body>
                <h1>Product   Manager</h1>
                <script>window.analytics = {};</script>
                <p>Roadmaps and <b>stakeholders</b>.</p>
                <noscript>Enable JavaScript</noscript>
            </body></html>"#,
        );
        let text = visible_text(&doc);
        assert_eq!(text, "Product Manager Roadmaps and stakeholders.");
        assert!(!text.contains("analytics"));
        assert!(!text.contains("color"));
        assert!(!text.contains("Enable JavaScript"));
    }

    #[test]
    fn inline_markup_does_not_split_words() {
        let doc = Html::parse_document(
            "<body><p>Sales<b>force</b> is a <a href='/crm'>CRM</a>.</p><ul><li>Quota</li><li>Pipeline</li></ul>Line<br>break</body>",
        );
        assert_eq!(
            visible_text(&doc),
            "Salesforce is a CRM. Quota Pipeline Line break"
        );
    }

    #[test]
    fn title_extraction() {
        let doc = Html::parse_document("<html><head><title>\n  Search  results\n</title></head><body></body></html>");
        assert_eq!(page_title(&doc), Some("Search results".into()));

        let untitled = Html::parse_document("<p>no head</p>");
        assert_eq!(page_title(&untitled), None);
    }

    #[test]
    fn empty_document_has_no_text() {
        let doc = Html::parse_document("");
        assert_eq!(visible_text(&doc), "");
    }
}
