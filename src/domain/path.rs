//! Dot-path resolution over JSON records.
//!
//! Field names may address a nested attribute of a record, e.g.
//! `"guardian.cpf"` points at `record["guardian"]["cpf"]`. Missing
//! intermediate nodes are treated as absent, never as an error.

use serde_json::Value;

/// Resolve a dot-separated path against a JSON value.
///
/// Returns `None` if any segment is missing or the intermediate node is not
/// an object.
pub fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_top_level() {
        let record = json!({ "name": "Ana" });
        assert_eq!(resolve(&record, "name"), Some(&json!("Ana")));
    }

    #[test]
    fn test_resolve_nested() {
        let record = json!({ "guardian": { "cpf": "12345678901" } });
        assert_eq!(resolve(&record, "guardian.cpf"), Some(&json!("12345678901")));
    }

    #[test]
    fn test_resolve_missing_leaf() {
        let record = json!({ "guardian": {} });
        assert_eq!(resolve(&record, "guardian.cpf"), None);
    }

    #[test]
    fn test_resolve_missing_intermediate() {
        let record = json!({ "name": "Ana" });
        assert_eq!(resolve(&record, "guardian.cpf"), None);
    }

    #[test]
    fn test_resolve_through_non_object() {
        let record = json!({ "guardian": "not an object" });
        assert_eq!(resolve(&record, "guardian.cpf"), None);
    }
}
