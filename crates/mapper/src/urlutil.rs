use std::collections::HashSet;

use url::Url;

/// §4.4 URL utilities. Grounded on `src/utils/url.py` in the original source:
/// lowercase scheme/host, resolve relative, strip fragment, collapse a
/// trailing slash (but keep the bare root).
pub fn normalize_url(u: &str, base: Option<&str>) -> Option<String> {
    let parsed = if !u.starts_with("http://") && !u.starts_with("https://") {
        let base_url = Url::parse(base?).ok()?;
        base_url.join(u).ok()?
    } else {
        Url::parse(u).ok()?
    };

    let mut out = parsed.clone();
    out.set_fragment(None);
    let scheme = out.scheme().to_lowercase();
    let _ = out.set_scheme(&scheme);
    if let Some(host) = out.host_str() {
        let host = host.to_lowercase();
        let _ = out.set_host(Some(&host));
    }

    let path = out.path();
    let trimmed = path.trim_end_matches('/');
    let new_path = if trimmed.is_empty() { "/" } else { trimmed };
    out.set_path(new_path);

    Some(out.to_string())
}

/// Registrable-domain extraction: netloc minus a leading `www.`, lowercased.
pub fn extract_domain(u: &str) -> Option<String> {
    let parsed = Url::parse(u).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

pub fn same_registrable_domain(a: &str, b: &str) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(da), Some(db)) => da == db,
        _ => false,
    }
}

pub fn ensure_scheme(u: &str, default_scheme: &str) -> String {
    if u.starts_with("http://") || u.starts_with("https://") {
        u.to_string()
    } else {
        format!("{}://{}", default_scheme, u)
    }
}

const SKIP_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".ico", ".css", ".js", ".woff", ".woff2",
    ".ttf", ".eot", ".mp3", ".mp4", ".avi", ".mov", ".zip", ".gz", ".tar", ".xml", ".rss",
    ".atom",
];

/// §4.4 scrape-worthy predicate.
pub fn is_valid_scrape_url(u: &str) -> bool {
    if u.is_empty()
        || u.starts_with('#')
        || u.starts_with("mailto:")
        || u.starts_with("tel:")
        || u.starts_with("javascript:")
    {
        return false;
    }

    let Ok(parsed) = Url::parse(u) else {
        return false;
    };
    let path_lower = parsed.path().to_lowercase();
    !SKIP_EXTENSIONS.iter().any(|ext| path_lower.ends_with(ext))
}

/// Filter, normalize, and order-preserving dedupe a raw URL list — the
/// composed helper used wherever a freshly extracted URL list needs to be
/// cleaned before entering the pipeline.
pub fn validate_and_deduplicate(urls: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for u in urls {
        if !is_valid_scrape_url(u) {
            continue;
        }
        let Some(normalized) = normalize_url(u, None) else {
            continue;
        };
        if seen.insert(normalized.clone()) {
            result.push(normalized);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        let u = "HTTPS://Example.COM/Foo/bar/";
        let once = normalize_url(u, None).unwrap();
        let twice = normalize_url(&once, None).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_collapses_trailing_slash_but_keeps_root() {
        assert_eq!(
            normalize_url("https://example.com/blog/", None).unwrap(),
            "https://example.com/blog"
        );
        assert_eq!(
            normalize_url("https://example.com/", None).unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn normalize_resolves_relative_against_base() {
        assert_eq!(
            normalize_url("/about", Some("https://example.com/blog/post")).unwrap(),
            "https://example.com/about"
        );
    }

    #[test]
    fn rejects_non_scrapeable_schemes_and_extensions() {
        assert!(!is_valid_scrape_url("mailto:info@example.com"));
        assert!(!is_valid_scrape_url("#section"));
        assert!(!is_valid_scrape_url("https://example.com/logo.png"));
        assert!(is_valid_scrape_url("https://example.com/blog/post-1"));
    }

    #[test]
    fn dedupe_is_order_preserving_first_wins() {
        let urls = vec![
            "https://example.com/a".to_string(),
            "https://example.com/a/".to_string(),
            "https://example.com/b".to_string(),
        ];
        let result = validate_and_deduplicate(&urls);
        assert_eq!(result, vec!["https://example.com/a", "https://example.com/b"]);
    }

    #[test]
    fn same_registrable_domain_ignores_www() {
        assert!(same_registrable_domain(
            "https://www.example.com/a",
            "https://example.com/b"
        ));
    }
}
