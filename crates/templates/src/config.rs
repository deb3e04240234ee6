/// §4.7 per-field selector sets: the first selector that matches anything
/// wins; an empty match is not an error, the field is simply absent.
#[derive(Debug, Clone, Default)]
pub struct SelectorSet {
    pub blog_landing: &'static [&'static str],
    pub article_list: &'static [&'static str],
    pub article_link: &'static [&'static str],
    pub article_title: &'static [&'static str],
    pub article_date: &'static [&'static str],
    pub article_author: &'static [&'static str],
    pub article_content: &'static [&'static str],
    pub team_members: &'static [&'static str],
    pub contact_info: &'static [&'static str],
    pub navigation: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationType {
    Numbered,
    NextLink,
}

#[derive(Debug, Clone)]
pub struct PaginationStrategy {
    pub kind: PaginationType,
    pub next_selector: &'static str,
    pub max_pages: u32,
}

#[derive(Debug, Clone)]
pub struct TemplateConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub platform_signals: &'static [&'static str],
    pub selectors: SelectorSet,
    pub pagination: PaginationStrategy,
    pub rate_limit_ms: u64,
    pub max_concurrent_pages: u32,
}

/// A single article record as produced by a template's `extract_article`.
/// Richer than `lakescraper_core::ArticleMetadata` — callers in the worker
/// layer narrow it down before persisting.
#[derive(Debug, Clone, Default)]
pub struct TemplateArticle {
    pub url: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub word_count: Option<usize>,
    pub excerpt: Option<String>,
}

/// A single contact record as produced by a template's `extract_contacts`.
#[derive(Debug, Clone, Default)]
pub struct TemplateContact {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
}
