// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Skip/limit bounds for list endpoints.

use nowhere_core::NowhereError;
use serde::Deserialize;

/// Raw pagination parameters as they arrive on the query string.
///
/// Signed so that negative values are reported as validation errors rather
/// than rejected by the extractor.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }
}

/// Default and maximum page size of one list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl PageBounds {
    pub const fn new(default_limit: u64, max_limit: u64) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }

    /// Resolves `params` to `(skip, limit)`.
    pub fn resolve(&self, params: PageParams) -> Result<(u64, u64), NowhereError> {
        let skip = params.skip.unwrap_or(0);
        if skip < 0 {
            return Err(NowhereError::Validation(format!(
                "skip must be >= 0, got {skip}"
            )));
        }

        let limit = match params.limit {
            None => self.default_limit,
            Some(limit) if limit >= 1 && (limit as u64) <= self.max_limit => limit as u64,
            Some(limit) => {
                return Err(NowhereError::Validation(format!(
                    "limit must be between 1 and {}, got {limit}",
                    self.max_limit
                )));
            }
        };

        Ok((skip as u64, limit))
    }
}

pub const CONTACT_PAGE: PageBounds = PageBounds::new(50, 100);
pub const CHAT_HISTORY_PAGE: PageBounds = PageBounds::new(50, 100);
pub const PORTFOLIO_PAGE: PageBounds = PageBounds::new(20, 50);
pub const BOOKING_PAGE: PageBounds = PageBounds::new(50, 100);
pub const TESTIMONIAL_PAGE: PageBounds = PageBounds::new(20, 50);

/// Services are listed as a single fixed page.
pub const SERVICE_LIMIT: u64 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        assert_eq!(CONTACT_PAGE.resolve(PageParams::default()).unwrap(), (0, 50));
        assert_eq!(PORTFOLIO_PAGE.resolve(PageParams::default()).unwrap(), (0, 20));
    }

    #[test]
    fn explicit_values_within_bounds_pass() {
        assert_eq!(CONTACT_PAGE.resolve(PageParams::new(10, 100)).unwrap(), (10, 100));
        assert_eq!(TESTIMONIAL_PAGE.resolve(PageParams::new(0, 1)).unwrap(), (0, 1));
    }

    #[test]
    fn out_of_range_values_are_validation_errors() {
        for params in [
            PageParams::new(-1, 10),
            PageParams::new(0, 0),
            PageParams::new(0, 101),
        ] {
            let err = CONTACT_PAGE.resolve(params).unwrap_err();
            assert!(matches!(err, NowhereError::Validation(_)), "{params:?}");
        }
        assert!(PORTFOLIO_PAGE.resolve(PageParams::new(0, 51)).is_err());
    }
}
