pub mod article_parser;
pub mod base;
pub mod blog_extractor;
pub mod contact_finder;
pub mod pricing_finder;
pub mod resource_finder;
pub mod sink;
pub mod tech_detector;

use async_trait::async_trait;
use lakescraper_core::ScrapedData;

pub use article_parser::ArticleParser;
pub use blog_extractor::BlogExtractor;
pub use contact_finder::ContactFinder;
pub use pricing_finder::PricingFinder;
pub use resource_finder::ResourceFinder;
pub use sink::{NullSink, ScrapedDataSink};
pub use tech_detector::TechDetector;

/// §4.10: the shape every specialized worker implements. A worker that
/// raises mid-URL skips that URL (logged) rather than aborting `execute`.
#[async_trait]
pub trait Worker: Send + Sync {
    async fn execute(&self, urls: &[String]) -> Vec<ScrapedData>;
}
