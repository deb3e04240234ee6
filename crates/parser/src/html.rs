use std::collections::HashMap;

use scraper::{Html, Selector};
use url::Url;

/// Wraps a parsed document and its base URL. §4.8 HTML parser primitives —
/// extraction methods are deliberately selector-list driven (selector
/// ordering is configuration data, not code; see the template registry).
/// Grounded on the teacher's `parse_html`/`extract_text_by_selector` shape,
/// extended with the `extract_text`/`count_words`/`extract_categories`
/// operations ported from `adaptor_parser.py`/`html_parser.py`.
pub struct Document {
    html: Html,
    base_url: Url,
}

const CONTENT_SELECTORS: &[&str] = &["article", "main", ".content", "#content", "body"];

impl Document {
    pub fn parse(body: &str, base_url: &str) -> Option<Self> {
        let base_url = Url::parse(base_url).ok()?;
        Some(Self {
            html: Html::parse_document(body),
            base_url,
        })
    }

    fn sel(s: &str) -> Option<Selector> {
        Selector::parse(s).ok()
    }

    /// `<title>` text, else first `<h1>` text, else `None`.
    pub fn extract_title(&self) -> Option<String> {
        if let Some(t) = Self::sel("title")
            .and_then(|s| self.html.select(&s).next())
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
        {
            return Some(t);
        }
        Self::sel("h1")
            .and_then(|s| self.html.select(&s).next())
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Try `<meta name=...>` then `<meta property=...>`.
    pub fn extract_meta(&self, name: &str) -> Option<String> {
        for attr in ["name", "property"] {
            let selector_str = format!("meta[{}='{}']", attr, name);
            if let Some(sel) = Self::sel(&selector_str) {
                if let Some(content) = self
                    .html
                    .select(&sel)
                    .next()
                    .and_then(|el| el.value().attr("content"))
                {
                    return Some(content.to_string());
                }
            }
        }
        None
    }

    pub fn extract_open_graph(&self) -> HashMap<String, String> {
        let mut out = HashMap::new();
        if let Some(sel) = Self::sel("meta[property^='og:']") {
            for el in self.html.select(&sel) {
                if let (Some(prop), Some(content)) =
                    (el.value().attr("property"), el.value().attr("content"))
                {
                    out.insert(prop.to_string(), content.to_string());
                }
            }
        }
        out
    }

    /// For each selector, enumerate matches and resolve each `href` to an
    /// absolute URL; skip anchors/mailto/tel/javascript; dedupe preserving
    /// first-seen order.
    pub fn extract_links(&self, selectors: &[&str]) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();

        for selector_str in selectors {
            let Some(sel) = Self::sel(selector_str) else {
                continue;
            };
            for el in self.html.select(&sel) {
                let Some(href) = el.value().attr("href") else {
                    continue;
                };
                if href.is_empty()
                    || href.starts_with('#')
                    || href.starts_with("mailto:")
                    || href.starts_with("tel:")
                    || href.starts_with("javascript:")
                {
                    continue;
                }
                let Ok(resolved) = self.base_url.join(href) else {
                    continue;
                };
                let resolved = resolved.to_string();
                if seen.insert(resolved.clone()) {
                    out.push(resolved);
                }
            }
        }

        out
    }

    /// All `<a href>` on the page, resolved and cleaned — used by the
    /// domain mapper's recursive crawl, which has no per-template selectors.
    pub fn extract_all_links(&self) -> Vec<String> {
        self.extract_links(&["a[href]"])
    }

    /// First selector whose match yields non-empty text, whitespace collapsed.
    pub fn extract_text(&self, selectors: &[&str]) -> Option<String> {
        for selector_str in selectors {
            let Some(sel) = Self::sel(selector_str) else {
                continue;
            };
            if let Some(el) = self.html.select(&sel).next() {
                let text = el
                    .text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ");
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
        None
    }

    /// First hit among content-area selectors, tokenized on whitespace.
    pub fn count_words(&self) -> usize {
        self.extract_text(CONTENT_SELECTORS)
            .map(|t| t.split_whitespace().count())
            .unwrap_or(0)
    }

    /// Union across tag/category selectors.
    pub fn extract_categories(&self, selectors: &[&str]) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for selector_str in selectors {
            let Some(sel) = Self::sel(selector_str) else {
                continue;
            };
            for el in self.html.select(&sel) {
                let text = el.text().collect::<String>().trim().to_string();
                if !text.is_empty() && seen.insert(text.clone()) {
                    out.push(text);
                }
            }
        }
        out
    }

    pub fn select_all(&self, selector_str: &str) -> Vec<scraper::ElementRef<'_>> {
        Self::sel(selector_str)
            .map(|s| self.html.select(&s).collect())
            .unwrap_or_default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn resolve(&self, href: &str) -> Option<String> {
        self.base_url.join(href).ok().map(|u| u.to_string())
    }

    pub fn raw_html(&self) -> String {
        self.html.html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_falls_back_to_h1() {
        let doc = Document::parse("<html><body><h1>Fallback</h1></body></html>", "https://x.com").unwrap();
        assert_eq!(doc.extract_title(), Some("Fallback".to_string()));
    }

    #[test]
    fn extract_links_dedupes_and_resolves() {
        let html = r#"<html><body>
            <a href="/a">A</a>
            <a href="/a">A again</a>
            <a href="#frag">skip</a>
            <a href="mailto:x@y.com">skip</a>
        </body></html>"#;
        let doc = Document::parse(html, "https://example.com").unwrap();
        let links = doc.extract_links(&["a[href]"]);
        assert_eq!(links, vec!["https://example.com/a"]);
    }

    #[test]
    fn count_words_uses_first_content_selector() {
        let doc = Document::parse(
            "<html><body><article>one two three</article></body></html>",
            "https://x.com",
        )
        .unwrap();
        assert_eq!(doc.count_words(), 3);
    }
}
