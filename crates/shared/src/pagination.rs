//! Offset pagination clamping.

/// Default page size when the caller supplies none (or an invalid one).
pub const DEFAULT_LIMIT: i64 = 20;

/// Hard cap on page size, regardless of what the caller asks for.
pub const MAX_LIMIT: i64 = 100;

/// Normalized skip/limit pair, safe to hand to the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub skip: i64,
    pub limit: i64,
}

impl PageParams {
    /// Builds page params from 1-based `page` and `limit` query values.
    ///
    /// A missing or non-positive page becomes page 1; a missing or
    /// non-positive limit becomes [`DEFAULT_LIMIT`]; limit is capped at
    /// [`MAX_LIMIT`].
    pub fn from_page(page: Option<i64>, limit: Option<i64>) -> Self {
        let limit = clamp_limit(limit);
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        Self {
            skip: (page - 1).saturating_mul(limit),
            limit,
        }
    }
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(l) if l > 0 => l.min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::from_page(None, None);
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_page_to_skip() {
        let params = PageParams::from_page(Some(3), Some(10));
        assert_eq!(params.skip, 20);
        assert_eq!(params.limit, 10);
    }

    #[test]
    fn test_limit_capped() {
        let params = PageParams::from_page(Some(1), Some(1000));
        assert_eq!(params.limit, MAX_LIMIT);
    }

    #[test]
    fn test_invalid_limit_falls_back_to_default() {
        assert_eq!(PageParams::from_page(Some(1), Some(0)).limit, DEFAULT_LIMIT);
        assert_eq!(
            PageParams::from_page(Some(1), Some(-5)).limit,
            DEFAULT_LIMIT
        );
    }

    #[test]
    fn test_invalid_page_falls_back_to_first() {
        // The computed skip can never go negative.
        assert_eq!(PageParams::from_page(Some(0), Some(10)).skip, 0);
        assert_eq!(PageParams::from_page(Some(-2), Some(10)).skip, 0);
        assert_eq!(PageParams::from_page(Some(i64::MIN), Some(10)).skip, 0);
    }
}
