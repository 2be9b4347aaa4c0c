//! Pagination parameter validation shared by the search endpoints.
//!
//! Both `/v1/product/search` and `/v1/category/search` accept `limit` and
//! `page` as raw query strings with the same contract: `limit` is a positive
//! integer or the sentinel `-1` ("return everything"), `page` is a 1-based
//! index that only matters when a limit applies. Violations are reported
//! before any query executes.

use crate::error::CoreError;

/// Validated pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub limit: i64,
    pub page: i64,
}

/// Sentinel limit meaning "no pagination, return all matching rows".
pub const UNBOUNDED: i64 = -1;

impl PageParams {
    /// Parse and validate raw `limit`/`page` query values.
    ///
    /// Defaults mirror the API contract: `limit` falls back to `12`,
    /// `page` to `1`. A limit of `0`, a non-numeric limit, or a negative
    /// limit other than `-1` is rejected. When the limit is `-1` the page
    /// value is ignored entirely; otherwise it must be a positive integer.
    pub fn parse(limit: Option<&str>, page: Option<&str>) -> Result<Self, CoreError> {
        let limit: i64 = limit
            .unwrap_or("12")
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation("Invalid limit".into()))?;

        if limit == 0 || (limit < 0 && limit != UNBOUNDED) {
            return Err(CoreError::Validation("Invalid limit".into()));
        }

        if limit == UNBOUNDED {
            return Ok(Self { limit, page: 1 });
        }

        let page: i64 = page
            .unwrap_or("1")
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation("Invalid page".into()))?;

        if page < 1 {
            return Err(CoreError::Validation("Invalid page".into()));
        }

        Ok(Self { limit, page })
    }

    /// Whether the sentinel "return everything" limit was requested.
    pub fn is_unbounded(&self) -> bool {
        self.limit == UNBOUNDED
    }

    /// SQL offset, or `None` when the query is unbounded.
    pub fn offset(&self) -> Option<i64> {
        if self.is_unbounded() {
            None
        } else {
            Some((self.page - 1) * self.limit)
        }
    }

    /// The `(limit, page)` pair to report in the response envelope.
    ///
    /// For an unbounded query the response reports the actual number of
    /// rows returned as the limit, and page 1.
    pub fn reported(&self, returned: usize) -> (i64, i64) {
        if self.is_unbounded() {
            (returned as i64, 1)
        } else {
            (self.limit, self.page)
        }
    }
}
