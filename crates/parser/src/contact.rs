use std::collections::HashMap;

use lakescraper_core::ContactMetadata;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;
use serde_json::Value;

use crate::html::Document;

const TEAM_CARD_SELECTORS: &[&str] = &[
    ".team-member",
    ".team-card",
    ".staff-member",
    ".person",
    ".bio-card",
];
const NAME_SELECTORS: &[&str] = &["h3", "h4", ".name", ".member-name"];
const TITLE_SELECTORS: &[&str] = &[".title", ".role", ".position", ".job-title"];

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());
static LINKEDIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"linkedin\.com/in/[a-zA-Z0-9_-]+").unwrap());
static GENERIC_EMAILS: &[&str] = &[
    "info@", "support@", "sales@", "contact@", "admin@", "hello@", "help@", "press@",
];

/// §4.9 Contact people: multi-strategy, additive except the final fallback.
/// Ported from `src/scraping/parser/contact_parser.py`.
pub fn extract_people(doc: &Document, body_text: &str) -> Vec<ContactMetadata> {
    let mut people = Vec::new();

    people.extend(extract_json_ld_people(doc));
    people.extend(extract_team_card_people(doc));

    if people.is_empty() {
        people.extend(extract_fallback_people(body_text));
    }

    deduplicate(people)
}

fn extract_json_ld_people(doc: &Document) -> Vec<ContactMetadata> {
    let mut out = Vec::new();
    for el in doc.select_all(r#"script[type="application/ld+json"]"#) {
        let text = el.inner_html();
        let Ok(value) = serde_json::from_str::<Value>(&text) else {
            continue;
        };
        collect_json_ld_persons(&value, &mut out);
    }
    out
}

fn collect_json_ld_persons(value: &Value, out: &mut Vec<ContactMetadata>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_json_ld_persons(item, out);
            }
        }
        Value::Object(map) => {
            if map.get("@type").and_then(|t| t.as_str()) == Some("Person") {
                let full_name = map.get("name").and_then(|v| v.as_str()).map(str::to_string);
                out.push(ContactMetadata {
                    full_name,
                    job_title: map
                        .get("jobTitle")
                        .and_then(|v| v.as_str())
                        .map(str::to_string),
                    email: map
                        .get("email")
                        .and_then(|v| v.as_str())
                        .map(|s| s.trim_start_matches("mailto:").to_string()),
                    linkedin_url: map
                        .get("sameAs")
                        .and_then(|v| v.as_str())
                        .filter(|s| s.contains("linkedin.com"))
                        .map(str::to_string),
                });
            }
            if let Some(graph) = map.get("@graph") {
                collect_json_ld_persons(graph, out);
            }
        }
        _ => {}
    }
}

fn extract_team_card_people(doc: &Document) -> Vec<ContactMetadata> {
    let mut out = Vec::new();
    'selectors: for card_sel in TEAM_CARD_SELECTORS {
        let cards = doc.select_all(card_sel);
        if cards.is_empty() {
            continue;
        }
        for card in cards {
            let full_name = NAME_SELECTORS.iter().find_map(|s| {
                Selector::parse(s).ok().and_then(|sel| {
                    card.select(&sel)
                        .next()
                        .map(|el| el.text().collect::<String>().trim().to_string())
                        .filter(|t| !t.is_empty())
                })
            });
            let job_title = TITLE_SELECTORS.iter().find_map(|s| {
                Selector::parse(s).ok().and_then(|sel| {
                    card.select(&sel)
                        .next()
                        .map(|el| el.text().collect::<String>().trim().to_string())
                        .filter(|t| !t.is_empty())
                })
            });
            let linkedin_url = Selector::parse("a[href]").ok().and_then(|sel| {
                card.select(&sel).find_map(|el| {
                    el.value()
                        .attr("href")
                        .filter(|href| href.contains("linkedin.com/in/"))
                        .map(str::to_string)
                })
            });

            if full_name.is_some() || job_title.is_some() || linkedin_url.is_some() {
                out.push(ContactMetadata {
                    full_name,
                    job_title,
                    email: None,
                    linkedin_url,
                });
            }
        }
        break 'selectors;
    }
    out
}

fn extract_fallback_people(body_text: &str) -> Vec<ContactMetadata> {
    let mut out = Vec::new();
    for m in EMAIL_RE.find_iter(body_text) {
        let email = m.as_str().to_lowercase();
        if GENERIC_EMAILS.iter().any(|p| email.starts_with(p)) {
            continue;
        }
        out.push(ContactMetadata {
            full_name: None,
            job_title: None,
            email: Some(email),
            linkedin_url: None,
        });
    }
    for m in LINKEDIN_RE.find_iter(body_text) {
        out.push(ContactMetadata {
            full_name: None,
            job_title: None,
            email: None,
            linkedin_url: Some(m.as_str().to_string()),
        });
    }
    out
}

/// Dedupe by case-insensitive email, then by full name; non-empty field wins
/// when merging duplicates. Exposed so callers can merge in contacts found
/// by other means (e.g. a template's platform-specific team-card scan) and
/// re-run the same merge rule over the combined list.
pub fn dedupe_people(people: Vec<ContactMetadata>) -> Vec<ContactMetadata> {
    deduplicate(people)
}

fn deduplicate(people: Vec<ContactMetadata>) -> Vec<ContactMetadata> {
    let mut by_key: HashMap<String, ContactMetadata> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for person in people {
        let key = person
            .email
            .as_ref()
            .map(|e| e.to_lowercase())
            .or_else(|| person.full_name.clone())
            .unwrap_or_else(|| format!("anon-{}", order.len()));

        match by_key.get_mut(&key) {
            Some(existing) => {
                if existing.full_name.is_none() {
                    existing.full_name = person.full_name;
                }
                if existing.job_title.is_none() {
                    existing.job_title = person.job_title;
                }
                if existing.email.is_none() {
                    existing.email = person.email;
                }
                if existing.linkedin_url.is_none() {
                    existing.linkedin_url = person.linkedin_url;
                }
            }
            None => {
                order.push(key.clone());
                by_key.insert(key, person);
            }
        }
    }

    order.into_iter().filter_map(|k| by_key.remove(&k)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_only_runs_when_other_strategies_empty() {
        let doc = Document::parse("<html><body>no structured data here</body></html>", "https://x.com").unwrap();
        let body = "Reach Jane at jane@acme.com or info@acme.com for support.";
        let people = extract_people(&doc, body);
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].email.as_deref(), Some("jane@acme.com"));
    }

    #[test]
    fn dedupe_has_no_duplicate_emails() {
        let people = vec![
            ContactMetadata {
                full_name: Some("Jane Doe".into()),
                email: Some("JANE@acme.com".into()),
                ..Default::default()
            },
            ContactMetadata {
                email: Some("jane@acme.com".into()),
                job_title: Some("CEO".into()),
                ..Default::default()
            },
        ];
        let result = deduplicate(people);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].job_title.as_deref(), Some("CEO"));
        assert_eq!(result[0].full_name.as_deref(), Some("Jane Doe"));
    }
}
