/// Fragment selector for an in-page link, ignoring bare `#`.
pub fn anchor_selector(href: &str) -> Option<&str> {
    (href.starts_with('#') && href.len() > 1).then_some(href)
}

/// Document offset to scroll to so the target lands just below a fixed header.
#[inline]
pub fn anchor_scroll_top(target_client_top: f64, page_y_offset: f64, header_height: f64) -> f64 {
    (target_client_top + page_y_offset - header_height).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_is_not_an_anchor() {
        assert_eq!(anchor_selector("#"), None);
        assert_eq!(anchor_selector("#about"), Some("#about"));
        assert_eq!(anchor_selector("/blog#x"), None);
    }

    #[test]
    fn offset_accounts_for_header() {
        assert_eq!(anchor_scroll_top(300.0, 1200.0, 80.0), 1420.0);
        assert_eq!(anchor_scroll_top(-50.0, 0.0, 80.0), 0.0);
    }
}
