use once_cell::sync::Lazy;
use regex::Regex;

static LOC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<loc>\s*([^<]+)\s*</loc>").unwrap());

/// Extract `<loc>` entries from a sitemap or sitemap-index document.
/// Ported from `infra_prober.rs::parse_sitemap`.
pub fn parse_sitemap(content: &str) -> Vec<String> {
    LOC_RE
        .captures_iter(content)
        .map(|cap| cap[1].trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_loc_entries() {
        let xml = r#"<urlset>
            <url><loc>https://example.com/a</loc></url>
            <url><loc> https://example.com/b </loc></url>
        </urlset>"#;
        let urls = parse_sitemap(xml);
        assert_eq!(urls, vec!["https://example.com/a", "https://example.com/b"]);
    }

    #[test]
    fn empty_document_yields_no_urls() {
        assert!(parse_sitemap("<html></html>").is_empty());
    }
}
