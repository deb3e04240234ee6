use once_cell::sync::Lazy;

use crate::base::Template;
use crate::directory::DirectoryTemplate;
use crate::generic::GenericTemplate;
use crate::hubspot::HubSpotTemplate;
use crate::webflow::WebflowTemplate;
use crate::wordpress::WordPressTemplate;

/// Registry order is fixed: WordPress, HubSpot, Webflow, Directory, Generic.
/// Ported from `src/templates/registry.py`.
pub static TEMPLATES: Lazy<Vec<Box<dyn Template>>> = Lazy::new(|| {
    vec![
        Box::new(WordPressTemplate::default()),
        Box::new(HubSpotTemplate::default()),
        Box::new(WebflowTemplate::default()),
        Box::new(DirectoryTemplate::default()),
        Box::new(GenericTemplate::default()),
    ]
});

/// Auto-detect which template matches the given HTML. Directory is skipped
/// during detection (its detector always returns false anyway); Generic is
/// the final fallback.
pub fn detect_template(html: &str, url: &str) -> &'static dyn Template {
    for template in TEMPLATES.iter() {
        if template.config().id == "generic" {
            continue;
        }
        if template.detect_platform(html, url) {
            return template.as_ref();
        }
    }
    get_template("generic").expect("generic template always registered")
}

pub fn get_template(template_id: &str) -> Option<&'static dyn Template> {
    TEMPLATES
        .iter()
        .find(|t| t.config().id == template_id)
        .map(|t| t.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wordpress_signal_wins_over_generic() {
        let html = "<html><body class=\"wp-content\">hi</body></html>";
        let t = detect_template(html, "https://x.com");
        assert_eq!(t.config().id, "wordpress");
    }

    #[test]
    fn unmatched_html_falls_back_to_generic() {
        let t = detect_template("<html></html>", "https://x.com");
        assert_eq!(t.config().id, "generic");
    }

    #[test]
    fn directory_is_never_returned_by_auto_detection() {
        for _ in 0..5 {
            let t = detect_template("<html></html>", "https://x.com");
            assert_ne!(t.config().id, "directory");
        }
        assert!(get_template("directory").is_some());
    }
}
