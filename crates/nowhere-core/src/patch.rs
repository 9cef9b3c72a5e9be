// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Three-state field for partial updates.
//!
//! A JSON body field can be missing, `null`, or carry a value. Request types
//! declare such fields as `#[serde(default)] Patch<T>` so the three cases map
//! to [`Patch::Omitted`], [`Patch::Cleared`] and [`Patch::Set`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::query::FieldUpdate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not present; leave the stored value alone.
    Omitted,
    /// The field was present as `null`.
    Cleared,
    /// The field carries a new value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Omitted
    }
}

impl<T> Patch<T> {
    pub fn is_omitted(&self) -> bool {
        matches!(self, Patch::Omitted)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Serialize> Patch<T> {
    /// Converts to a store field update; `None` for an omitted field.
    pub fn to_update(&self, field: &str) -> Result<Option<FieldUpdate>, serde_json::Error> {
        Ok(match self {
            Patch::Omitted => None,
            Patch::Cleared => Some(FieldUpdate::Clear(field.to_string())),
            Patch::Set(v) => Some(FieldUpdate::Set(field.to_string(), serde_json::to_value(v)?)),
        })
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; a missing key uses Default.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Set(v),
            None => Patch::Cleared,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        assigned_to: Patch<String>,
        #[serde(default)]
        notes: Patch<Vec<String>>,
    }

    #[test]
    fn missing_field_is_omitted() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.assigned_to, Patch::Omitted);
        assert_eq!(body.notes, Patch::Omitted);
    }

    #[test]
    fn null_field_is_cleared() {
        let body: Body = serde_json::from_str(r#"{"assigned_to": null}"#).unwrap();
        assert_eq!(body.assigned_to, Patch::Cleared);
        assert_eq!(body.notes, Patch::Omitted);
    }

    #[test]
    fn value_field_is_set() {
        let body: Body =
            serde_json::from_str(r#"{"assigned_to": "sara", "notes": ["called"]}"#).unwrap();
        assert_eq!(body.assigned_to, Patch::Set("sara".into()));
        assert_eq!(body.notes, Patch::Set(vec!["called".into()]));
    }

    #[test]
    fn to_update_maps_each_state() {
        assert_eq!(Patch::<String>::Omitted.to_update("x").unwrap(), None);
        assert_eq!(
            Patch::<String>::Cleared.to_update("x").unwrap(),
            Some(FieldUpdate::Clear("x".into()))
        );
        assert_eq!(
            Patch::Set(3).to_update("x").unwrap(),
            Some(FieldUpdate::Set("x".into(), serde_json::json!(3)))
        );
    }

    proptest::proptest! {
        #[test]
        fn any_present_string_is_set(value in ".*") {
            let body: Body =
                serde_json::from_value(serde_json::json!({ "assigned_to": value.clone() })).unwrap();
            proptest::prop_assert_eq!(body.assigned_to, Patch::Set(value));
        }
    }
}
