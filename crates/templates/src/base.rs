use scraper::Selector;

use crate::config::{TemplateArticle, TemplateConfig, TemplateContact};

/// §4.7 template capability set. Every variant declares a config bundle and
/// four operations; ported from `src/templates/base.py`.
pub trait Template: Send + Sync {
    fn config(&self) -> &TemplateConfig;
    fn detect_platform(&self, html: &str, url: &str) -> bool;
    fn extract_blog_urls(&self, html: &str, base_url: &str) -> Vec<String>;
    fn extract_article(&self, html: &str, url: &str) -> TemplateArticle;
    fn extract_contacts(&self, html: &str, url: &str) -> Vec<TemplateContact>;
}

pub(crate) fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn signal_match(html: &str, signals: &[&str]) -> bool {
    let lower = html.to_lowercase();
    signals.iter().any(|s| lower.contains(s))
}

pub(crate) fn resolve_links(doc: &lakescraper_parser::Document, selectors: &[&str]) -> Vec<String> {
    doc.extract_links(selectors)
}

const NAME_SELECTORS: &[&str] = &["h3", "h4", ".name", ".member-name"];
const TITLE_SELECTORS: &[&str] = &[".title", ".role", ".position", ".job-title"];

/// Shared team-card contact scan used by every template's `extract_contacts`:
/// the platform's own `team_members` selector set, stopping at the first
/// selector that yields any cards. Empty input (e.g. WordPress, which rarely
/// carries structured team data) yields no contacts.
pub(crate) fn extract_team_members(html: &str, url: &str, team_selectors: &[&str]) -> Vec<TemplateContact> {
    let Some(doc) = lakescraper_parser::Document::parse(html, url) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for card_sel in team_selectors {
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
                out.push(TemplateContact {
                    full_name,
                    job_title,
                    email: None,
                    linkedin_url,
                });
            }
        }
        break;
    }
    out
}
