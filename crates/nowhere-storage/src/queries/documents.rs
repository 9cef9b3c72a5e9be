// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document CRUD operations.

use nowhere_core::{
    Document, FieldUpdate, Filter, FindQuery, NowhereError, SortDirection, time,
};
use rusqlite::types::Value as SqlValue;
use rusqlite::{OptionalExtension, params, params_from_iter};
use serde_json::Value;

use crate::database::{Database, map_tr_err};
use crate::queries::sql::{first_match, json_path, where_clause};

fn parse_body(raw: &str) -> Result<Document, NowhereError> {
    Ok(serde_json::from_str(raw)?)
}

/// Insert a document. Its `id` field becomes the row key.
pub async fn insert_document(
    db: &Database,
    collection: &str,
    document: Document,
) -> Result<String, NowhereError> {
    let id = document
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| NowhereError::Internal("document is missing a string `id` field".into()))?;
    let created_at = document
        .get("created_at")
        .and_then(Value::as_str)
        .map(str::to_string);
    let body = serde_json::to_string(&document)?;
    let collection = collection.to_string();
    let row_id = id.clone();

    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO documents (collection, id, body, created_at)
                 VALUES (?1, ?2, ?3, COALESCE(?4, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')))",
                params![collection, row_id, body, created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(id)
}

/// Get the first document matching `filter`, in insertion order.
pub async fn find_document(
    db: &Database,
    collection: &str,
    filter: &Filter,
) -> Result<Option<Document>, NowhereError> {
    let (where_sql, params) = where_clause(collection, filter)?;
    let sql = format!("SELECT body FROM documents WHERE {where_sql} ORDER BY rowid LIMIT 1");

    let raw = db
        .connection()
        .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
            conn.query_row(&sql, params_from_iter(params), |row| row.get(0))
                .optional()
        })
        .await
        .map_err(map_tr_err)?;

    raw.as_deref().map(parse_body).transpose()
}

/// List documents sorted by the query's key, then paged.
///
/// Ties on the sort key are broken by insertion order in the same
/// direction, so consecutive pages never overlap.
pub async fn find_documents(
    db: &Database,
    collection: &str,
    query: &FindQuery,
) -> Result<Vec<Document>, NowhereError> {
    let (where_sql, mut params) = where_clause(collection, &query.filter)?;
    let sort_path = json_path(&query.sort_key)?;
    let direction = match query.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    // SQLite treats a negative LIMIT as unbounded.
    params.push(SqlValue::Integer(i64::try_from(query.limit).unwrap_or(-1)));
    let limit_idx = params.len();
    params.push(SqlValue::Integer(
        i64::try_from(query.skip).unwrap_or(i64::MAX),
    ));
    let offset_idx = params.len();

    let sql = format!(
        "SELECT body FROM documents WHERE {where_sql}
         ORDER BY json_extract(body, {sort_path}) {direction}, rowid {direction}
         LIMIT ?{limit_idx} OFFSET ?{offset_idx}"
    );

    let rows = db
        .connection()
        .call(move |conn| -> Result<Vec<String>, rusqlite::Error> {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(params), |row| row.get(0))?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)?;

    rows.iter().map(|raw| parse_body(raw)).collect()
}

/// Apply field updates to the first matching document, stamping `updated_at`.
///
/// Returns the number of matched documents (0 or 1).
pub async fn update_document(
    db: &Database,
    collection: &str,
    filter: &Filter,
    updates: &[FieldUpdate],
) -> Result<u64, NowhereError> {
    let (where_sql, mut params) = where_clause(collection, filter)?;

    let mut assignments = String::new();
    for update in updates {
        let path = json_path(update.field())?;
        let json = match update {
            FieldUpdate::Set(_, value) => serde_json::to_string(value)?,
            FieldUpdate::Clear(_) => "null".to_string(),
        };
        params.push(SqlValue::Text(json));
        assignments.push_str(&format!(", {path}, json(?{})", params.len()));
    }
    params.push(SqlValue::Text(time::format(&time::now())));
    let stamp_idx = params.len();

    let sql = format!(
        "UPDATE documents SET body = json_set(body{assignments}, '$.updated_at', ?{stamp_idx})
         WHERE rowid = ({})",
        first_match(&where_sql)
    );

    let changed = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(&sql, params_from_iter(params))
        })
        .await
        .map_err(map_tr_err)?;

    Ok(changed as u64)
}

/// Count documents matching `filter`.
pub async fn count_documents(
    db: &Database,
    collection: &str,
    filter: &Filter,
) -> Result<u64, NowhereError> {
    let (where_sql, params) = where_clause(collection, filter)?;
    let sql = format!("SELECT COUNT(*) FROM documents WHERE {where_sql}");

    let count = db
        .connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.query_row(&sql, params_from_iter(params), |row| row.get(0))
        })
        .await
        .map_err(map_tr_err)?;

    Ok(count.max(0) as u64)
}
