use lakescraper_core::PricingMetadata;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

use crate::html::Document;

const CARD_SELECTORS: &[&str] = &[".pricing-card", ".plan-card", ".price-card"];
const MIN_CARDS: usize = 2;
const MAX_FEATURES: usize = 10;

static CURRENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$€£]\s?\d[\d,]*(\.\d{1,2})?").unwrap());
static FREE_TRIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)free trial").unwrap());

/// §4.9 Pricing: requires ≥2 cards for a selector to be accepted (try the
/// next selector otherwise). Ported from `src/scraping/parser/pricing_parser.py`.
pub fn extract_pricing(doc: &Document) -> Vec<PricingMetadata> {
    for card_sel in CARD_SELECTORS {
        let cards = doc.select_all(card_sel);
        if cards.len() < MIN_CARDS {
            continue;
        }

        let mut out = Vec::new();
        for card in &cards {
            let card_html_text = card.text().collect::<String>();

            let plan_name = Selector::parse("h2, h3, h4")
                .ok()
                .and_then(|sel| card.select(&sel).next())
                .map(|el| el.text().collect::<String>().trim().to_string());

            let price = CURRENCY_RE
                .find(&card_html_text)
                .map(|m| m.as_str().to_string());

            let billing_cycle = detect_billing_cycle(&card_html_text);

            let features: Vec<String> = Selector::parse("ul")
                .ok()
                .and_then(|sel| card.select(&sel).next())
                .map(|ul| {
                    Selector::parse("li")
                        .ok()
                        .map(|li_sel| {
                            ul.select(&li_sel)
                                .map(|li| li.text().collect::<String>().trim().to_string())
                                .collect::<Vec<_>>()
                        })
                        .unwrap_or_default()
                })
                .filter(|items| items.len() > 3)
                .map(|items| items.into_iter().take(MAX_FEATURES).collect())
                .unwrap_or_default();

            let has_free_trial = FREE_TRIAL_RE.is_match(&card_html_text);

            let cta_text = Selector::parse("button, .cta, a.btn")
                .ok()
                .and_then(|sel| card.select(&sel).next())
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|t| !t.is_empty());

            out.push(PricingMetadata {
                plan_name,
                price,
                billing_cycle,
                features,
                has_free_trial,
                cta_text,
            });
        }
        return out;
    }

    Vec::new()
}

fn detect_billing_cycle(text: &str) -> String {
    let lower = text.to_lowercase();
    if lower.contains("quarter") {
        "quarterly".to_string()
    } else if lower.contains("year") || lower.contains("annual") {
        "annual".to_string()
    } else if lower.contains("month") {
        "monthly".to_string()
    } else {
        "unknown".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_at_least_two_cards() {
        let html = r#"<html><body><div class="pricing-card"><h3>Solo</h3></div></body></html>"#;
        let doc = Document::parse(html, "https://x.com").unwrap();
        assert!(extract_pricing(&doc).is_empty());
    }

    #[test]
    fn extracts_plan_fields() {
        let html = r#"<html><body>
            <div class="pricing-card">
                <h3>Starter</h3>
                $19/month
                <ul><li>A</li><li>B</li><li>C</li><li>D</li></ul>
                <button>Start free trial</button>
            </div>
            <div class="pricing-card">
                <h3>Pro</h3>
                $49/month
            </div>
        </body></html>"#;
        let doc = Document::parse(html, "https://x.com").unwrap();
        let plans = extract_pricing(&doc);
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].plan_name.as_deref(), Some("Starter"));
        assert_eq!(plans[0].billing_cycle, "monthly");
        assert_eq!(plans[0].features.len(), 4);
        assert!(plans[0].has_free_trial);
    }
}
