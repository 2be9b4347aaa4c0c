//! Shared response envelope for the search endpoints.

use serde::Serialize;

/// Standard `{data, total, limit, page}` search envelope.
///
/// `total` is the filter-matching row count ignoring pagination. For an
/// unbounded (`limit=-1`) query, `limit` reports the number of rows
/// actually returned and `page` is 1.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub page: i64,
}

impl<T: Serialize> PageResponse<T> {
    /// Assemble the envelope from a result page and the reported
    /// `(limit, page)` pair.
    pub fn new(data: Vec<T>, total: i64, reported: (i64, i64)) -> Self {
        Self {
            data,
            total,
            limit: reported.0,
            page: reported.1,
        }
    }
}
