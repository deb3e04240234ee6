use lakescraper_parser::Document;

use crate::base::{clean_text, resolve_links, Template};
use crate::config::{
    PaginationStrategy, PaginationType, SelectorSet, TemplateArticle, TemplateConfig,
    TemplateContact,
};

/// Fallback template for sites that don't match a specific platform. Its
/// detector always returns true, so it must be the last registry entry.
pub struct GenericTemplate {
    config: TemplateConfig,
}

impl Default for GenericTemplate {
    fn default() -> Self {
        Self {
            config: TemplateConfig {
                id: "generic",
                name: "Generic",
                platform_signals: &[],
                selectors: SelectorSet {
                    blog_landing: &["article", ".post", ".blog-post", ".entry"],
                    article_list: &["main", "#content", ".content-area"],
                    article_link: &["article a", "h2 a", "h3 a", ".post a", ".entry a"],
                    article_title: &["h1", "title", ".entry-title", ".post-title"],
                    article_date: &["time[datetime]", ".date", ".post-date", ".published"],
                    article_author: &[".author", ".byline", "[rel='author']"],
                    article_content: &["article", ".content", ".entry-content", "main"],
                    team_members: &[".team-member", ".staff", ".person", ".bio"],
                    contact_info: &[".contact", "address", ".vcard"],
                    navigation: &[".pagination", ".nav-links", "nav"],
                },
                pagination: PaginationStrategy {
                    kind: PaginationType::NextLink,
                    next_selector: "a[rel='next'], .next, .pagination a:last-child",
                    max_pages: 20,
                },
                rate_limit_ms: 1500,
                max_concurrent_pages: 2,
            },
        }
    }
}

impl Template for GenericTemplate {
    fn config(&self) -> &TemplateConfig {
        &self.config
    }

    fn detect_platform(&self, _html: &str, _url: &str) -> bool {
        true
    }

    fn extract_blog_urls(&self, html: &str, base_url: &str) -> Vec<String> {
        let Some(doc) = Document::parse(html, base_url) else {
            return Vec::new();
        };
        resolve_links(&doc, self.config.selectors.article_link)
    }

    fn extract_article(&self, html: &str, url: &str) -> TemplateArticle {
        let mut result = TemplateArticle {
            url: url.to_string(),
            ..Default::default()
        };
        let Some(doc) = Document::parse(html, url) else {
            return result;
        };
        result.title = doc.extract_text(self.config.selectors.article_title).map(|t| clean_text(&t));
        result
    }

    fn extract_contacts(&self, html: &str, url: &str) -> Vec<TemplateContact> {
        crate::base::extract_team_members(html, url, self.config.selectors.team_members)
    }
}
