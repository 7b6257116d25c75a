//! Cache key builders for query results.
//!
//! Every cached query lives under `query:{group}` or `query:{group}:{params}`,
//! so a whole group can be dropped with one key plus one prefix delete.

/// Namespace for query-result keys.
const QUERY: &str = "query";

/// Key of the unparameterized query of a group (e.g. the full list).
pub fn query_root(group: &str) -> String {
    format!("{QUERY}:{group}")
}

/// Key of a parameterized query within a group.
pub fn query(group: &str, params: &str) -> String {
    format!("{QUERY}:{group}:{params}")
}

/// Prefix shared by every parameterized query of a group.
pub fn query_group_prefix(group: &str) -> String {
    format!("{QUERY}:{group}:")
}
