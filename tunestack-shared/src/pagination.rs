/// List query parameters
///
/// `GET` collection endpoints return every row by default. `limit` and
/// `offset` are optional and only narrow the result.

use serde::Deserialize;
use utoipa::IntoParams;

/// Upper bound accepted for `limit`
pub const MAX_PAGE_SIZE: i64 = 1000;

/// `?limit=&offset=` query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Maximum number of rows to return (1..=1000, default: all)
    pub limit: Option<i64>,

    /// Number of rows to skip (default: 0)
    pub offset: Option<i64>,
}

impl ListParams {
    /// Value for SQLite's `LIMIT` clause; `-1` means unbounded
    pub fn sql_limit(&self) -> i64 {
        match self.limit {
            Some(limit) => limit.clamp(1, MAX_PAGE_SIZE),
            None => -1,
        }
    }

    /// Value for SQLite's `OFFSET` clause
    pub fn sql_offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}
