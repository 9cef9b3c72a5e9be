// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQL fragment builders shared by the query modules.

use nowhere_core::{Filter, FilterValue, NowhereError, Predicate};
use rusqlite::types::Value as SqlValue;

/// Quoted JSON path literal for a top-level field, e.g. `'$.status'`.
///
/// Field names are inlined so that the expression indexes apply, which is
/// why they are restricted to identifier characters.
pub(crate) fn json_path(field: &str) -> Result<String, NowhereError> {
    let valid = field
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(format!("'$.{field}'"))
    } else {
        Err(NowhereError::Internal(format!(
            "invalid document field name `{field}`"
        )))
    }
}

pub(crate) fn sql_value(value: &FilterValue) -> SqlValue {
    match value {
        FilterValue::Text(s) => SqlValue::Text(s.clone()),
        FilterValue::Integer(i) => SqlValue::Integer(*i),
        FilterValue::Real(f) => SqlValue::Real(*f),
        // json_extract yields 1/0 for JSON booleans.
        FilterValue::Bool(b) => SqlValue::Integer(i64::from(*b)),
    }
}

/// Builds the WHERE condition for a collection plus filter.
///
/// The collection is bound as `?1`; predicate values follow in order.
pub(crate) fn where_clause(
    collection: &str,
    filter: &Filter,
) -> Result<(String, Vec<SqlValue>), NowhereError> {
    let mut sql = String::from("collection = ?1");
    let mut params = vec![SqlValue::Text(collection.to_string())];

    for predicate in filter.predicates() {
        let op = match predicate {
            Predicate::Eq(..) => "=",
            Predicate::Gte(..) => ">=",
            Predicate::Lte(..) => "<=",
        };
        let path = json_path(predicate.field())?;
        params.push(sql_value(predicate.value()));
        sql.push_str(&format!(
            " AND json_extract(body, {path}) {op} ?{}",
            params.len()
        ));
    }

    Ok((sql, params))
}

/// Selects the rowid of the first document matching the WHERE condition.
pub(crate) fn first_match(where_sql: &str) -> String {
    format!("SELECT rowid FROM documents WHERE {where_sql} ORDER BY rowid LIMIT 1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_path_accepts_identifiers() {
        assert_eq!(json_path("created_at").unwrap(), "'$.created_at'");
        assert_eq!(json_path("_x1").unwrap(), "'$._x1'");
    }

    #[test]
    fn json_path_rejects_injection() {
        assert!(json_path("a') OR 1=1 --").is_err());
        assert!(json_path("").is_err());
        assert!(json_path("1abc").is_err());
        assert!(json_path("a.b").is_err());
    }

    #[test]
    fn where_clause_numbers_params_in_order() {
        let filter = Filter::new().eq("status", "new").gte("rating", 4i64);
        let (sql, params) = where_clause("contact_forms", &filter).unwrap();
        assert_eq!(
            sql,
            "collection = ?1 AND json_extract(body, '$.status') = ?2 \
             AND json_extract(body, '$.rating') >= ?3"
        );
        assert_eq!(params.len(), 3);
        assert_eq!(params[2], SqlValue::Integer(4));
    }

    #[test]
    fn booleans_bind_as_integers() {
        assert_eq!(sql_value(&FilterValue::Bool(true)), SqlValue::Integer(1));
        assert_eq!(sql_value(&FilterValue::Bool(false)), SqlValue::Integer(0));
    }
}
