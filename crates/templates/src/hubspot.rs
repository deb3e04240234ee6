use lakescraper_parser::Document;

use crate::base::{clean_text, resolve_links, signal_match, Template};
use crate::config::{
    PaginationStrategy, PaginationType, SelectorSet, TemplateArticle, TemplateConfig,
    TemplateContact,
};

pub struct HubSpotTemplate {
    config: TemplateConfig,
}

impl Default for HubSpotTemplate {
    fn default() -> Self {
        Self {
            config: TemplateConfig {
                id: "hubspot",
                name: "HubSpot",
                platform_signals: &["js.hs-scripts.com", "hs-script-loader", "hubspot", ".hs-", "hbspt"],
                selectors: SelectorSet {
                    blog_landing: &[".blog-listing", ".hs-blog-listing", ".post-listing"],
                    article_list: &[".blog-listing-wrapper", ".content-wrapper"],
                    article_link: &[".blog-listing a", ".hs-blog-post a", ".post-listing-wrapper a", "a.blog-post-link"],
                    article_title: &["h1", ".blog-post-title", ".hs-blog-post-title"],
                    article_date: &[".post-date", ".blog-post-date", "time[datetime]"],
                    article_author: &[".author-name", ".blog-post-author", ".hs-author-name"],
                    article_content: &[".blog-post-body", ".post-body", ".hs-blog-post-body"],
                    team_members: &[".team-member", ".staff-card"],
                    contact_info: &[".contact-form", ".hs-form"],
                    navigation: &[".blog-pagination", ".pagination"],
                },
                pagination: PaginationStrategy {
                    kind: PaginationType::Numbered,
                    next_selector: ".blog-pagination a.next",
                    max_pages: 30,
                },
                rate_limit_ms: 1500,
                max_concurrent_pages: 2,
            },
        }
    }
}

impl Template for HubSpotTemplate {
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
        result.author = doc.extract_text(self.config.selectors.article_author).map(|t| clean_text(&t));
        result
    }

    fn extract_contacts(&self, html: &str, url: &str) -> Vec<TemplateContact> {
        crate::base::extract_team_members(html, url, self.config.selectors.team_members)
    }
}
