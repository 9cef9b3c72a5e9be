// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store-neutral query vocabulary: filters, sorting, pagination and field updates.
//!
//! Filter values are typed and never null, so an absent request parameter
//! can only be expressed by leaving the predicate out.

use serde_json::Value;

/// A stored document: a JSON object with at least an `id` string field.
pub type Document = serde_json::Map<String, Value>;

/// A scalar a predicate can compare against.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A single comparison against a top-level document field.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(String, FilterValue),
    Gte(String, FilterValue),
    Lte(String, FilterValue),
}

impl Predicate {
    pub fn field(&self) -> &str {
        match self {
            Predicate::Eq(f, _) | Predicate::Gte(f, _) | Predicate::Lte(f, _) => f,
        }
    }

    pub fn value(&self) -> &FilterValue {
        match self {
            Predicate::Eq(_, v) | Predicate::Gte(_, v) | Predicate::Lte(_, v) => v,
        }
    }
}

/// A conjunction of predicates. The empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a filter on the document identifier.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::new().eq("id", id.into())
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.predicates.push(Predicate::Eq(field.into(), value.into()));
        self
    }

    pub fn gte(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.predicates.push(Predicate::Gte(field.into(), value.into()));
        self
    }

    pub fn lte(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.predicates.push(Predicate::Lte(field.into(), value.into()));
        self
    }

    /// Adds an equality predicate only when `value` is present.
    pub fn eq_opt<V: Into<FilterValue>>(self, field: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.eq(field, v),
            None => self,
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Parameters for `find_many`.
#[derive(Debug, Clone, PartialEq)]
pub struct FindQuery {
    pub filter: Filter,
    pub skip: u64,
    pub limit: u64,
    pub sort_key: String,
    pub direction: SortDirection,
}

impl FindQuery {
    pub fn new(filter: Filter, sort_key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            filter,
            skip: 0,
            limit: u64::MAX,
            sort_key: sort_key.into(),
            direction,
        }
    }

    pub fn page(mut self, skip: u64, limit: u64) -> Self {
        self.skip = skip;
        self.limit = limit;
        self
    }
}

/// A change to one field of a stored document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Replace the field with a value.
    Set(String, Value),
    /// Explicitly clear the field (stored as JSON null).
    Clear(String),
}

impl FieldUpdate {
    pub fn field(&self) -> &str {
        match self {
            FieldUpdate::Set(f, _) | FieldUpdate::Clear(f) => f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_opt_skips_absent_values() {
        let filter = Filter::new()
            .eq_opt("status", Some("new"))
            .eq_opt::<bool>("is_featured", None);
        assert_eq!(filter.predicates().len(), 1);
        assert_eq!(filter.predicates()[0].field(), "status");
        assert_eq!(filter.predicates()[0].value(), &FilterValue::Text("new".into()));
    }

    #[test]
    fn by_id_builds_single_equality() {
        let filter = Filter::by_id("abc");
        assert_eq!(
            filter.predicates(),
            &[Predicate::Eq("id".into(), FilterValue::Text("abc".into()))]
        );
    }

    #[test]
    fn find_query_defaults_to_unbounded_page() {
        let query = FindQuery::new(Filter::new(), "created_at", SortDirection::Descending);
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, u64::MAX);
        let paged = query.page(10, 5);
        assert_eq!((paged.skip, paged.limit), (10, 5));
    }
}
