use std::collections::HashSet;

use lakescraper_core::ResourceMetadata;
use scraper::Selector;

use crate::html::Document;

const CARD_SELECTORS: &[&str] = &[".resource-card", ".resource-item", ".download-card"];
const RESOURCE_KEYWORDS: &[(&str, &str)] = &[
    ("whitepaper", "whitepaper"),
    ("case study", "case_study"),
    ("case-study", "case_study"),
    ("webinar", "webinar"),
    ("ebook", "ebook"),
    ("e-book", "ebook"),
    ("report", "report"),
    ("infographic", "infographic"),
];

/// A record produced by §4.9 Resource extraction, paired with its URL/title.
pub struct ResourceRecord {
    pub url: String,
    pub title: String,
    pub metadata: ResourceMetadata,
}

fn classify_resource_type(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    RESOURCE_KEYWORDS
        .iter()
        .find(|(kw, _)| lower.contains(kw))
        .map(|(_, ty)| *ty)
}

/// §4.9 Resource: card extraction stops at the first selector yielding any
/// cards; cards with a title under 5 chars or an unrecognized type are
/// dropped. A direct asset link scan always runs in addition, unconditionally
/// kept even with an "unknown" type. Dedupe by URL, first-seen wins.
pub fn extract_resources(doc: &Document) -> Vec<ResourceRecord> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    'selectors: for card_sel in CARD_SELECTORS {
        let cards = doc.select_all(card_sel);
        if cards.is_empty() {
            continue;
        }
        for card in cards {
            let title = Selector::parse("h2, h3, h4, .title")
                .ok()
                .and_then(|sel| card.select(&sel).next())
                .map(|el| el.text().collect::<String>().trim().to_string())
                .unwrap_or_default();
            if title.len() < 5 {
                continue;
            }
            let Some(resource_type) = classify_resource_type(&title) else {
                continue;
            };
            let Some(url) = Selector::parse("a[href]").ok().and_then(|sel| {
                card.select(&sel)
                    .next()
                    .and_then(|el| el.value().attr("href"))
                    .and_then(|href| doc.resolve(href))
            }) else {
                continue;
            };
            let is_gated = Selector::parse("form").ok().is_some_and(|sel| card.select(&sel).next().is_some());

            if seen.insert(url.clone()) {
                out.push(ResourceRecord {
                    url,
                    title,
                    metadata: ResourceMetadata {
                        resource_type: resource_type.to_string(),
                        is_gated,
                    },
                });
            }
        }
        break 'selectors;
    }

    for url in doc.extract_links(&["a[href$='.pdf']", "a[download]", "a[href*='download']"]) {
        if seen.insert(url.clone()) {
            out.push(ResourceRecord {
                title: url.rsplit('/').next().unwrap_or(&url).to_string(),
                metadata: ResourceMetadata {
                    resource_type: classify_resource_type(&url)
                        .unwrap_or("unknown")
                        .to_string(),
                    is_gated: false,
                },
                url,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_asset_links_always_kept() {
        let html = r#"<html><body><a href="/files/guide.pdf">Download our guide</a></body></html>"#;
        let doc = Document::parse(html, "https://example.com").unwrap();
        let resources = extract_resources(&doc);
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].metadata.resource_type, "unknown");
    }

    #[test]
    fn cards_without_recognized_type_are_dropped() {
        let html = r#"<html><body>
            <div class="resource-card"><h3>Random Thing</h3><a href="/x">link</a></div>
        </body></html>"#;
        let doc = Document::parse(html, "https://example.com").unwrap();
        assert!(extract_resources(&doc).is_empty());
    }
}
