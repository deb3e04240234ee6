use lakescraper_parser::Document;

use crate::base::{clean_text, resolve_links, signal_match, Template};
use crate::config::{
    PaginationStrategy, PaginationType, SelectorSet, TemplateArticle, TemplateConfig,
    TemplateContact,
};

pub struct WordPressTemplate {
    config: TemplateConfig,
}

impl Default for WordPressTemplate {
    fn default() -> Self {
        Self {
            config: TemplateConfig {
                id: "wordpress",
                name: "WordPress",
                platform_signals: &["wp-content", "wp-includes", "wordpress", "wp-json", "wp-admin"],
                selectors: SelectorSet {
                    blog_landing: &["article.post", ".blog-post", ".entry", ".hentry", ".type-post"],
                    article_list: &[".post-listing", ".blog-listing", "#main article", ".posts-container"],
                    article_link: &[
                        "a.entry-title",
                        "h2.entry-title a",
                        ".post-title a",
                        "article a[rel='bookmark']",
                        ".entry-header a",
                    ],
                    article_title: &["h1.entry-title", ".post-title", "h1.wp-block-post-title", ".entry-title"],
                    article_date: &["time.entry-date", ".post-date", "time[datetime]", ".published", ".entry-date"],
                    article_author: &[".author", ".entry-author", ".vcard .fn", "a[rel='author']", ".byline .author"],
                    article_content: &[".entry-content", ".post-content", ".the-content", "article .content"],
                    team_members: &[],
                    contact_info: &[],
                    navigation: &[".nav-links", ".pagination", ".wp-pagenavi", ".page-numbers"],
                },
                pagination: PaginationStrategy {
                    kind: PaginationType::Numbered,
                    next_selector: "a.next.page-numbers",
                    max_pages: 50,
                },
                rate_limit_ms: 1000,
                max_concurrent_pages: 3,
            },
        }
    }
}

impl Template for WordPressTemplate {
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
        result.date = crate::base_util::extract_date(&doc, self.config.selectors.article_date);

        if let Some(text) = doc.extract_text(self.config.selectors.article_content) {
            let cleaned = clean_text(&text);
            result.word_count = Some(cleaned.split_whitespace().count());
            result.excerpt = Some(cleaned.chars().take(300).collect());
        }

        result
    }

    fn extract_contacts(&self, html: &str, url: &str) -> Vec<TemplateContact> {
        // WordPress sites rarely carry structured team data; empty selectors
        // mean this always yields nothing.
        crate::base::extract_team_members(html, url, self.config.selectors.team_members)
    }
}
