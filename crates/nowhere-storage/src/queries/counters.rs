// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Atomic numeric field updates.
//!
//! Each function is a single SQL statement, so concurrent callers never lose
//! an increment even though the statements come from different requests.

use nowhere_core::{Document, Filter, NowhereError, time};
use rusqlite::params;
use rusqlite::params_from_iter;
use rusqlite::types::Value as SqlValue;
use serde_json::Value;

use crate::database::{Database, map_tr_err};
use crate::queries::sql::{first_match, json_path, where_clause};

/// Add `by` to `field` of the first document matching `filter`.
///
/// A missing field counts as zero. Returns the matched count (0 or 1).
pub async fn increment_field(
    db: &Database,
    collection: &str,
    filter: &Filter,
    field: &str,
    by: i64,
) -> Result<u64, NowhereError> {
    let path = json_path(field)?;
    let (where_sql, mut params) = where_clause(collection, filter)?;
    params.push(SqlValue::Integer(by));
    let by_idx = params.len();
    params.push(SqlValue::Text(time::format(&time::now())));
    let stamp_idx = params.len();

    let sql = format!(
        "UPDATE documents
         SET body = json_set(body, {path}, COALESCE(json_extract(body, {path}), 0) + ?{by_idx},
                             '$.updated_at', ?{stamp_idx})
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

/// Add `by` to `field` of document `id`, creating it from `seed` if absent.
///
/// Uses `INSERT ... ON CONFLICT DO UPDATE`, so the first writer of the day
/// and every later one are serialized by SQLite itself.
pub async fn upsert_increment(
    db: &Database,
    collection: &str,
    id: &str,
    mut seed: Document,
    field: &str,
    by: i64,
) -> Result<(), NowhereError> {
    let path = json_path(field)?;
    let now = time::format(&time::now());
    seed.insert("id".into(), Value::String(id.to_string()));
    seed.insert(field.to_string(), Value::from(by));
    seed.entry("created_at")
        .or_insert_with(|| Value::String(now.clone()));
    seed.insert("updated_at".into(), Value::String(now.clone()));
    let created_at = seed
        .get("created_at")
        .and_then(Value::as_str)
        .map(str::to_string);
    let body = serde_json::to_string(&seed)?;

    let sql = format!(
        "INSERT INTO documents (collection, id, body, created_at)
         VALUES (?1, ?2, ?3, COALESCE(?4, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')))
         ON CONFLICT(collection, id) DO UPDATE
         SET body = json_set(body, {path}, COALESCE(json_extract(body, {path}), 0) + ?5,
                             '$.updated_at', ?6)"
    );
    let collection = collection.to_string();
    let id = id.to_string();

    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(&sql, params![collection, id, body, created_at, by, now])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
