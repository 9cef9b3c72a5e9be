// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity orchestrators.
//!
//! Each write runs validate, construct, persist, count, notify, respond in
//! that order and stops at the first fatal step. Chat is the exception: the
//! model is asked before the message is persisted, since the reply is part
//! of the record.

mod analytics;
mod booking;
mod catalog;
mod chat;
mod contact;
mod content;
mod portfolio;

use std::sync::Arc;

use nowhere_core::{DocumentStore, FieldUpdate, Filter, FindQuery, NowhereError};
use serde::de::value::StringDeserializer;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::assistant::Assistant;
use crate::counter::{CounterName, DailyCounter};
use crate::dispatcher::NotificationDispatcher;
use crate::entities::{from_document, to_document};

pub use analytics::{AnalyticsSummary, RecentCounts, TodayCounts, TotalCounts};
pub use booking::BookingQuery;
pub use catalog::{ServiceQuery, TestimonialQuery};
pub use chat::ChatReply;
pub use contact::ContactQuery;
pub use content::GeneratedContent;
pub use portfolio::PortfolioQuery;

/// All orchestrators, sharing injected collaborators.
#[derive(Clone)]
pub struct Agency {
    store: Arc<dyn DocumentStore>,
    counter: DailyCounter,
    assistant: Assistant,
    notifier: Arc<NotificationDispatcher>,
}

impl Agency {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        assistant: Assistant,
        notifier: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            counter: DailyCounter::new(store.clone()),
            store,
            assistant,
            notifier,
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn counter(&self) -> &DailyCounter {
        &self.counter
    }

    /// Counts one page view for today. Best effort.
    pub async fn record_page_view(&self) {
        self.counter.record(CounterName::PageViews).await;
    }

    async fn persist<T: Serialize>(&self, collection: &str, record: &T) -> Result<String, NowhereError> {
        let id = self.store.insert(collection, to_document(record)?).await?;
        debug!(collection, id, "record persisted");
        Ok(id)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &FindQuery,
    ) -> Result<Vec<T>, NowhereError> {
        self.store
            .find_many(collection, query)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    /// Applies `updates` to record `id`; an unmatched id is `NotFound`.
    async fn update(
        &self,
        collection: &str,
        entity: &str,
        id: &str,
        updates: Vec<FieldUpdate>,
    ) -> Result<(), NowhereError> {
        let matched = self
            .store
            .update_one(collection, &Filter::by_id(id), &updates)
            .await?;
        if matched == 0 {
            return Err(NowhereError::NotFound {
                entity: entity.to_string(),
                id: id.to_string(),
            });
        }
        debug!(collection, id, fields = updates.len(), "record updated");
        Ok(())
    }
}

/// Drops a blank text parameter so it is never matched as an empty string.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Query-string field where `?name=` means the same as leaving it out.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match non_blank(Option::<String>::deserialize(deserializer)?) {
        Some(raw) => {
            let raw: StringDeserializer<D::Error> = raw.into_deserializer();
            T::deserialize(raw).map(Some)
        }
        None => Ok(None),
    }
}
