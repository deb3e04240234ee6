use lakescraper_core::{ClassifiedUrl, DataType};
use once_cell::sync::Lazy;
use regex::Regex;

/// §4.6 URL classifier. Ordered `(data_type, regex[])` rules ported from
/// `src/scraping/parser/url_classifier.py`: more specific types (pricing,
/// contact/career, resource) precede the broad ones (blog, team/about).
/// The first matching regex wins; unmatched URLs default to `blog_url` at
/// low confidence.
static RULES: Lazy<Vec<(DataType, Vec<Regex>)>> = Lazy::new(|| {
    vec![
        (
            DataType::Pricing,
            vec![Regex::new(r"(?i)/pricing|/plans|/plan/").unwrap()],
        ),
        (
            DataType::Contact,
            vec![
                Regex::new(r"(?i)/contact").unwrap(),
                Regex::new(r"(?i)/demo|/request-demo").unwrap(),
                Regex::new(r"(?i)/careers?|/jobs").unwrap(),
            ],
        ),
        (
            DataType::Resource,
            vec![Regex::new(
                r"(?i)/resources?|/whitepapers?|/case-studies?|/ebooks?|/webinars?|/reports?",
            )
            .unwrap()],
        ),
        (
            DataType::BlogUrl,
            vec![
                Regex::new(r"(?i)/blog|/insights?|/news|/articles?").unwrap(),
                Regex::new(r"/\d{4}/\d{2}/").unwrap(),
            ],
        ),
        (
            DataType::Contact,
            vec![Regex::new(r"(?i)/team|/about-?us?|/about/team|/leadership").unwrap()],
        ),
    ]
});

const MATCH_CONFIDENCE: f64 = 0.8;
const DEFAULT_CONFIDENCE: f64 = 0.2;

pub fn classify_url(url: &str) -> ClassifiedUrl {
    for (data_type, patterns) in RULES.iter() {
        if patterns.iter().any(|re| re.is_match(url)) {
            return ClassifiedUrl {
                url: url.to_string(),
                data_type: *data_type,
                confidence: MATCH_CONFIDENCE,
            };
        }
    }

    ClassifiedUrl {
        url: url.to_string(),
        data_type: DataType::BlogUrl,
        confidence: DEFAULT_CONFIDENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_pricing_contact_and_blog() {
        assert_eq!(
            classify_url("https://x.com/pricing").data_type,
            DataType::Pricing
        );
        assert_eq!(
            classify_url("https://x.com/about/team").data_type,
            DataType::Contact
        );
        assert_eq!(
            classify_url("https://x.com/2024/01/post").data_type,
            DataType::BlogUrl
        );
    }

    #[test]
    fn every_url_gets_exactly_one_tag() {
        for url in [
            "https://x.com/",
            "https://x.com/random-page",
            "https://x.com/careers",
            "https://x.com/resources/whitepaper-1",
        ] {
            let c = classify_url(url);
            assert!(c.confidence == MATCH_CONFIDENCE || c.confidence == DEFAULT_CONFIDENCE);
        }
    }

    #[test]
    fn unmatched_url_defaults_to_low_confidence_blog() {
        let c = classify_url("https://x.com/random-page-xyz");
        assert_eq!(c.data_type, DataType::BlogUrl);
        assert_eq!(c.confidence, DEFAULT_CONFIDENCE);
    }
}
