/// §4.2 Block / CAPTCHA detection. Pure functions over status + body so they
/// are trivially testable independent of any transport.
const CAPTCHA_MARKERS: &[&str] = &[
    "captcha",
    "challenge-form",
    "cf-browser-verification",
    "recaptcha",
    "hcaptcha",
    "turnstile",
];

pub fn is_blocked(status: u16, body_len: usize, network_failure: bool) -> bool {
    network_failure || matches!(status, 403 | 429 | 503) || (status == 200 && body_len < 200)
}

pub fn is_captcha(body: &str) -> bool {
    let lower = body.to_lowercase();
    CAPTCHA_MARKERS.iter().any(|m| lower.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_on_403_429_503() {
        assert!(is_blocked(403, 1000, false));
        assert!(is_blocked(429, 1000, false));
        assert!(is_blocked(503, 1000, false));
        assert!(!is_blocked(200, 1000, false));
    }

    #[test]
    fn blocks_on_cloaked_short_200() {
        assert!(is_blocked(200, 50, false));
        assert!(!is_blocked(200, 500, false));
    }

    #[test]
    fn blocks_on_network_failure_regardless_of_status() {
        assert!(is_blocked(0, 0, true));
    }

    #[test]
    fn detects_captcha_markers_case_insensitively() {
        assert!(is_captcha("<div class=\"G-RECAPTCHA\"></div>"));
        assert!(is_captcha("please complete the Cloudflare Turnstile"));
        assert!(!is_captcha("<html><body>hello</body></html>"));
    }
}
