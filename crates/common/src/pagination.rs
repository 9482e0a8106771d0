//! Pagination utilities shared by list endpoints
//!
//! Provides a simple `Pagination` struct deserialized from `?skip=&limit=`
//! query strings and helpers to normalize inputs.

use serde::Deserialize;

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 100;
/// Largest offset the SQLite driver can bind (it stores offsets as `i64`).
pub const MAX_SKIP: u64 = i64::MAX as u64;

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// rows to skip from the start
    #[serde(default)]
    pub skip: u64,
    /// maximum rows to return
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 { DEFAULT_LIMIT }

impl Pagination {
    /// Clamp to sane bounds, returning `(offset, limit)`
    pub fn normalize(self) -> (u64, u64) {
        (self.skip.min(MAX_SKIP), self.limit.clamp(1, MAX_LIMIT))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { skip: 0, limit: DEFAULT_LIMIT } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_zero_limit() {
        let (skip, limit) = Pagination { skip: 0, limit: 0 }.normalize();
        assert_eq!(skip, 0);
        assert_eq!(limit, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (skip, limit) = Pagination { skip: 40, limit: 1000 }.normalize();
        assert_eq!(skip, 40);
        assert_eq!(limit, 100);
    }

    #[test]
    fn normalize_caps_skip_at_bindable_offset() {
        let (skip, _) = Pagination { skip: u64::MAX, limit: 10 }.normalize();
        assert_eq!(skip, i64::MAX as u64);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.skip, 0);
        assert_eq!(d.limit, 100);
    }

    #[test]
    fn missing_query_fields_use_defaults() {
        let p: Pagination = serde_json::from_str(r#"{"skip": 5}"#).unwrap();
        assert_eq!(p, Pagination { skip: 5, limit: 100 });
    }
}
