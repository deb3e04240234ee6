use lakescraper_parser::Document;

use crate::base::clean_text;

/// Shared "article date" extraction: the first matching selector's `datetime`
/// attribute, falling back to its text content.
pub fn extract_date(doc: &Document, selectors: &[&str]) -> Option<String> {
    for selector in selectors {
        if let Some(el) = doc.select_all(selector).into_iter().next() {
            if let Some(attr) = el.value().attr("datetime") {
                return Some(attr.to_string());
            }
            let text = el.text().collect::<String>();
            let cleaned = clean_text(&text);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }
    None
}
