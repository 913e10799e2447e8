// src/probe/filter.rs
// =============================================================================
// Decides which probe results are worth showing.
//
// Rules:
// - A status in `included` is always shown, even if it is also excluded
// - Otherwise a status in `excluded` is hidden
// - Everything else is shown
// - Failed probes (no HTTP response at all) are never shown
//
// The default hides 404s, which is almost always what you want when
// brute-forcing paths.
// =============================================================================

use std::collections::HashSet;

use super::worker::ProbeResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    included: HashSet<u16>,
    excluded: HashSet<u16>,
}

impl FilterRule {
    pub fn new(
        included: impl IntoIterator<Item = u16>,
        excluded: impl IntoIterator<Item = u16>,
    ) -> Self {
        Self {
            included: included.into_iter().collect(),
            excluded: excluded.into_iter().collect(),
        }
    }

    /// Include wins over exclude
    pub fn accepts(&self, status: u16) -> bool {
        self.included.contains(&status) || !self.excluded.contains(&status)
    }

    pub fn accepts_result(&self, result: &ProbeResult) -> bool {
        match result.status {
            Some(status) if !result.failed => self.accepts(status),
            _ => false,
        }
    }
}

impl Default for FilterRule {
    fn default() -> Self {
        Self::new([], [404])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::job::HttpMethod;

    #[test]
    fn test_default_hides_404_only() {
        let rule = FilterRule::default();
        assert!(!rule.accepts(404));
        assert!(rule.accepts(200));
        assert!(rule.accepts(301));
        assert!(rule.accepts(500));
    }

    #[test]
    fn test_include_wins_over_exclude() {
        let rule = FilterRule::new([404], [404]);
        assert!(rule.accepts(404));
    }

    #[test]
    fn test_filter_laws() {
        let rule = FilterRule::new([200, 403], [403, 404, 500]);
        for status in 100..600u16 {
            let accepted = rule.accepts(status);
            if [200, 403].contains(&status) {
                assert!(accepted, "{} is included", status);
            } else if [404, 500].contains(&status) {
                assert!(!accepted, "{} is excluded", status);
            } else {
                assert!(accepted, "{} is unlisted", status);
            }
        }
    }

    #[test]
    fn test_failed_results_are_never_accepted() {
        let rule = FilterRule::new([], []);
        let failed = ProbeResult::failure(HttpMethod::Get, "http://x/a".into(), "a".into());
        assert!(!rule.accepts_result(&failed));

        let ok = ProbeResult::response(HttpMethod::Get, "http://x/a".into(), "a".into(), 200, 5);
        assert!(rule.accepts_result(&ok));
    }
}
