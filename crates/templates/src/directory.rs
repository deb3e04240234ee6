use crate::base::Template;
use crate::config::{
    PaginationStrategy, PaginationType, SelectorSet, TemplateArticle, TemplateConfig,
    TemplateContact,
};

/// Directory/listing page template. Only reachable by explicit `template_id`
/// — its detector always returns false during auto-detection (§4.7).
/// Extraction methods are stubs: no site family has been selector-mapped yet.
pub struct DirectoryTemplate {
    config: TemplateConfig,
}

impl Default for DirectoryTemplate {
    fn default() -> Self {
        Self {
            config: TemplateConfig {
                id: "directory",
                name: "Directory",
                platform_signals: &[],
                selectors: SelectorSet {
                    blog_landing: &[],
                    article_list: &[".directory-list", ".listing", "table", ".results", "ul.list"],
                    article_link: &[".listing a", ".directory-item a", "table a", ".result a"],
                    article_title: &["h1", ".page-title"],
                    article_date: &[],
                    article_author: &[],
                    article_content: &[],
                    team_members: &[".person", ".profile", ".member", ".team-member", "tr"],
                    contact_info: &[".contact", ".email", ".phone"],
                    navigation: &[".pagination", ".pager", "nav.pages"],
                },
                pagination: PaginationStrategy {
                    kind: PaginationType::Numbered,
                    next_selector: ".next, a[rel='next']",
                    max_pages: 100,
                },
                rate_limit_ms: 2000,
                max_concurrent_pages: 2,
            },
        }
    }
}

impl Template for DirectoryTemplate {
    fn config(&self) -> &TemplateConfig {
        &self.config
    }

    fn detect_platform(&self, _html: &str, _url: &str) -> bool {
        false
    }

    fn extract_blog_urls(&self, _html: &str, _base_url: &str) -> Vec<String> {
        Vec::new()
    }

    fn extract_article(&self, _html: &str, url: &str) -> TemplateArticle {
        TemplateArticle {
            url: url.to_string(),
            ..Default::default()
        }
    }

    fn extract_contacts(&self, _html: &str, _url: &str) -> Vec<TemplateContact> {
        Vec::new()
    }
}
