/// Technology detection signatures, ported from `src/data/tech_signatures.py`.
pub struct TechSignature {
    pub name: &'static str,
    pub category: &'static str,
    pub signals: &'static [&'static str],
}

pub const TECH_SIGNATURES: &[TechSignature] = &[
    // CMS
    TechSignature { name: "WordPress", category: "cms", signals: &["wp-content", "wp-includes", "wordpress", "wp-json"] },
    TechSignature { name: "HubSpot", category: "cms", signals: &["js.hs-scripts.com", "hubspot", ".hs-", "hbspt"] },
    TechSignature { name: "Webflow", category: "cms", signals: &["webflow.com", "wf-page", "wf-section"] },
    TechSignature { name: "Drupal", category: "cms", signals: &["/sites/default/", "drupal.settings"] },
    TechSignature { name: "Squarespace", category: "cms", signals: &["squarespace.com", "sqsp", "static.squarespace"] },
    TechSignature { name: "Wix", category: "cms", signals: &["wix.com", "wixsite.com", "parastorage.com"] },
    TechSignature { name: "Shopify", category: "cms", signals: &["cdn.shopify.com", "shopify", "myshopify.com"] },
    TechSignature { name: "Ghost", category: "cms", signals: &["ghost.io", "ghost-", "content/themes"] },
    // Analytics
    TechSignature { name: "Google Analytics", category: "analytics", signals: &["google-analytics.com", "gtag(", "googletagmanager.com"] },
    TechSignature { name: "Segment", category: "analytics", signals: &["cdn.segment.com", "segment.io"] },
    TechSignature { name: "Mixpanel", category: "analytics", signals: &["mixpanel.com", "mixpanel.init"] },
    TechSignature { name: "Hotjar", category: "analytics", signals: &["hotjar.com", "static.hotjar.com"] },
    TechSignature { name: "Plausible", category: "analytics", signals: &["plausible.io"] },
    // Marketing
    TechSignature { name: "Marketo", category: "marketing", signals: &["munchkin.marketo.net", "mktoforms"] },
    TechSignature { name: "Drift", category: "marketing", signals: &["drift.com", "driftt.com"] },
    TechSignature { name: "Intercom", category: "marketing", signals: &["intercom.io", "widget.intercom.io"] },
    TechSignature { name: "Mailchimp", category: "marketing", signals: &["mailchimp.com", "list-manage.com"] },
    TechSignature { name: "Salesforce", category: "marketing", signals: &["salesforce.com", "force.com"] },
    TechSignature { name: "ZoomInfo", category: "marketing", signals: &["zoominfo.com", "ws.zoominfo.com"] },
    TechSignature { name: "Clearbit", category: "marketing", signals: &["clearbit.com", "x.clearbitjs.com"] },
    // Frameworks
    TechSignature { name: "React", category: "framework", signals: &["react.", "reactdom", "__next_data__"] },
    TechSignature { name: "Vue.js", category: "framework", signals: &["vue.js", "__vue__", "vuejs"] },
    TechSignature { name: "Angular", category: "framework", signals: &["ng-version", "ng-app"] },
    TechSignature { name: "Next.js", category: "framework", signals: &["__next_data__", "_next/static"] },
    TechSignature { name: "Gatsby", category: "framework", signals: &["gatsby", "/page-data/"] },
    TechSignature { name: "Nuxt", category: "framework", signals: &["__nuxt", "nuxt.js"] },
    // CDN
    TechSignature { name: "Cloudflare", category: "cdn", signals: &["cf-ray", "cloudflare"] },
    TechSignature { name: "Fastly", category: "cdn", signals: &["fastly", "x-served-by"] },
    TechSignature { name: "Akamai", category: "cdn", signals: &["akamai"] },
    TechSignature { name: "AWS CloudFront", category: "cdn", signals: &["cloudfront.net", "x-amz-cf"] },
    TechSignature { name: "Vercel", category: "cdn", signals: &["vercel", "x-vercel-"] },
    TechSignature { name: "Netlify", category: "cdn", signals: &["netlify", "x-nf-request-id"] },
    // JS libraries
    TechSignature { name: "jQuery", category: "js_library", signals: &["jquery", "jquery.min.js"] },
    TechSignature { name: "Bootstrap", category: "js_library", signals: &["bootstrap.min", "bootstrap.css"] },
    TechSignature { name: "Tailwind CSS", category: "js_library", signals: &["tailwindcss", "tailwind."] },
];
