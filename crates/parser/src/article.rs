use lakescraper_core::ArticleMetadata;

use crate::html::Document;

const TAG_SELECTORS: &[&str] = &[".tags a", ".categories a", "a[rel='tag']", ".post-tags a"];

/// §4.9 Article: author (meta `author`), categories (union of tag nodes),
/// word count, excerpt (meta description). All fields optional except URL,
/// which the caller (the worker) attaches separately.
pub fn extract_article(doc: &Document) -> ArticleMetadata {
    ArticleMetadata {
        author: doc.extract_meta("author"),
        categories: doc.extract_categories(TAG_SELECTORS),
        word_count: doc.count_words(),
        excerpt: doc.extract_meta("description"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_author_and_categories() {
        let html = r#"<html><head>
            <meta name="author" content="Jane Doe">
            <meta name="description" content="An excerpt.">
        </head><body>
            <article>word count body here now</article>
            <div class="tags"><a rel="tag">rust</a><a rel="tag">webdev</a></div>
        </body></html>"#;
        let doc = Document::parse(html, "https://example.com/blog/post").unwrap();
        let article = extract_article(&doc);
        assert_eq!(article.author.as_deref(), Some("Jane Doe"));
        assert_eq!(article.excerpt.as_deref(), Some("An excerpt."));
        assert!(article.word_count > 0);
    }
}
