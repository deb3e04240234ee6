use lakescraper_parser::Document;

use crate::base::{clean_text, resolve_links, signal_match, Template};
use crate::config::{
    PaginationStrategy, PaginationType, SelectorSet, TemplateArticle, TemplateConfig,
    TemplateContact,
};

pub struct WebflowTemplate {
    config: TemplateConfig,
}

impl Default for WebflowTemplate {
    fn default() -> Self {
        Self {
            config: TemplateConfig {
                id: "webflow",
                name: "Webflow",
                platform_signals: &["webflow.com", "wf-page", "wf-section", "w-dyn-list"],
                selectors: SelectorSet {
                    blog_landing: &[".w-dyn-list", ".collection-list"],
                    article_list: &[".w-dyn-items", ".collection-list-wrapper"],
                    article_link: &[".w-dyn-item a", ".collection-item a", ".blog-link"],
                    article_title: &["h1", ".blog-title", ".post-title"],
                    article_date: &[".post-date", ".blog-date", "time"],
                    article_author: &[".author", ".post-author"],
                    article_content: &[".blog-content", ".post-body", ".rich-text-block"],
                    team_members: &[".team-member", ".w-dyn-item"],
                    contact_info: &[".contact-form", "form"],
                    navigation: &[".w-pagination", ".pagination"],
                },
                pagination: PaginationStrategy {
                    kind: PaginationType::NextLink,
                    next_selector: ".w-pagination-next",
                    max_pages: 20,
                },
                rate_limit_ms: 1000,
                max_concurrent_pages: 3,
            },
        }
    }
}

impl Template for WebflowTemplate {
    fn config(&self) -> &TemplateConfig {
        &self.config
    }

    fn detect_platform(&self, html: &str, _url: &str) -> bool {
        signal_match(html, self.config.platform_signals)
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
