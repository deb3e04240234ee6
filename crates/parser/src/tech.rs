use std::collections::HashMap;

use lakescraper_core::TechStackMetadata;

use crate::tech_signatures::TECH_SIGNATURES;

/// §4.9 Tech detection: for each signature, check case-folded substring
/// against body and response-header values. A CMS match overwrites a single
/// `platform` field (last match wins); other categories append. Ported from
/// `src/scraping/parser/tech_parser.py`.
pub fn detect_tech_stack(body: &str, headers: &HashMap<String, String>) -> TechStackMetadata {
    let body_lower = body.to_lowercase();
    let header_blob = headers
        .values()
        .map(|v| v.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = TechStackMetadata::default();

    for sig in TECH_SIGNATURES {
        let matched = sig
            .signals
            .iter()
            .any(|s| body_lower.contains(s) || header_blob.contains(s));
        if !matched {
            continue;
        }
        match sig.category {
            "cms" => out.platform = Some(sig.name.to_string()),
            "analytics" => out.analytics.push(sig.name.to_string()),
            "marketing" => out.marketing_tools.push(sig.name.to_string()),
            "framework" => out.frameworks.push(sig.name.to_string()),
            "cdn" => out.cdn.push(sig.name.to_string()),
            "js_library" => out.js_libraries.push(sig.name.to_string()),
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_wordpress_and_analytics() {
        let body = "<html><script src=\"https://www.google-analytics.com/ga.js\"></script><link href=\"/wp-content/theme.css\"></html>";
        let headers = HashMap::new();
        let stack = detect_tech_stack(body, &headers);
        assert_eq!(stack.platform.as_deref(), Some("WordPress"));
        assert!(stack.analytics.contains(&"Google Analytics".to_string()));
    }

    #[test]
    fn cms_match_overwrites_not_appends() {
        let body = "wp-content webflow.com";
        let headers = HashMap::new();
        let stack = detect_tech_stack(body, &headers);
        assert!(stack.platform == Some("WordPress".to_string()) || stack.platform == Some("Webflow".to_string()));
        assert!(stack.platform.is_some());
    }
}
