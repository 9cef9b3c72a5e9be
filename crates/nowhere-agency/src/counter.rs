// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily counter aggregation.
//!
//! One `analytics` document per UTC calendar day, keyed by `YYYY-MM-DD`.
//! Increments go through the store's single-statement upsert so concurrent
//! requests never lose updates.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use nowhere_core::{Document, DocumentStore, Filter, NowhereError, time};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

/// Collection holding one counter document per day.
pub const ANALYTICS_COLLECTION: &str = "analytics";

/// Named daily counters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum CounterName {
    PageViews,
    UniqueVisitors,
    ContactForms,
    Bookings,
    ChatSessions,
}

/// Counter values of one day. Missing days read as all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyCounts {
    pub page_views: i64,
    pub unique_visitors: i64,
    pub contact_forms: i64,
    pub bookings: i64,
    pub chat_sessions: i64,
}

/// Increments and reads per-day counters.
#[derive(Clone)]
pub struct DailyCounter {
    store: Arc<dyn DocumentStore>,
}

impl DailyCounter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Adds one to `counter` for the current UTC day.
    pub async fn increment(&self, counter: CounterName) -> Result<(), NowhereError> {
        self.increment_on(counter, time::now()).await
    }

    /// Adds one to `counter` for the UTC day containing `at`.
    pub async fn increment_on(
        &self,
        counter: CounterName,
        at: DateTime<Utc>,
    ) -> Result<(), NowhereError> {
        let date = time::date_key(&at);
        self.store
            .upsert_increment(
                ANALYTICS_COLLECTION,
                &date,
                seed(&date),
                counter.as_ref(),
                1,
            )
            .await?;
        debug!(counter = %counter, date, "daily counter incremented");
        Ok(())
    }

    /// Best-effort increment: failures are logged, never returned.
    pub async fn record(&self, counter: CounterName) {
        if let Err(e) = self.increment(counter).await {
            warn!(counter = %counter, error = %e, "failed to update daily counter");
        }
    }

    /// Counters for the current UTC day.
    pub async fn today(&self) -> Result<DailyCounts, NowhereError> {
        self.for_date(&time::date_key(&time::now())).await
    }

    /// Counters for `date` (`YYYY-MM-DD`).
    pub async fn for_date(&self, date: &str) -> Result<DailyCounts, NowhereError> {
        let doc = self
            .store
            .find_one(ANALYTICS_COLLECTION, &Filter::by_id(date))
            .await?;
        match doc {
            Some(doc) => Ok(serde_json::from_value(Value::Object(doc))?),
            None => Ok(DailyCounts::default()),
        }
    }
}

/// First document of a day: every counter at zero.
fn seed(date: &str) -> Document {
    let mut doc = Document::new();
    doc.insert("analytics_date".into(), Value::String(date.to_string()));
    for counter in CounterName::iter() {
        doc.insert(counter.to_string(), Value::from(0));
    }
    doc
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::testing;

    #[test]
    fn counter_names_are_snake_case() {
        assert_eq!(CounterName::PageViews.as_ref(), "page_views");
        assert_eq!(CounterName::ContactForms.to_string(), "contact_forms");
    }

    #[test]
    fn seed_has_every_counter_at_zero() {
        let doc = seed("2026-01-02");
        assert_eq!(doc["analytics_date"], "2026-01-02");
        for counter in CounterName::iter() {
            assert_eq!(doc[counter.as_ref()], 0);
        }
    }

    #[tokio::test]
    async fn repeated_increments_accumulate() {
        let (store, _dir) = testing::store().await;
        let counter = DailyCounter::new(store);

        for _ in 0..3 {
            counter.increment(CounterName::Bookings).await.unwrap();
        }
        counter.increment(CounterName::PageViews).await.unwrap();

        let today = counter.today().await.unwrap();
        assert_eq!(today.bookings, 3);
        assert_eq!(today.page_views, 1);
        assert_eq!(today.contact_forms, 0);
    }

    #[tokio::test]
    async fn new_day_gets_independent_record() {
        let (store, _dir) = testing::store().await;
        let counter = DailyCounter::new(store);
        let day_one = Utc.with_ymd_and_hms(2026, 3, 1, 23, 59, 59).unwrap();
        let day_two = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 1).unwrap();

        counter.increment_on(CounterName::ContactForms, day_one).await.unwrap();
        counter.increment_on(CounterName::ContactForms, day_one).await.unwrap();
        counter.increment_on(CounterName::ContactForms, day_two).await.unwrap();

        assert_eq!(counter.for_date("2026-03-01").await.unwrap().contact_forms, 2);
        assert_eq!(counter.for_date("2026-03-02").await.unwrap().contact_forms, 1);
    }

    #[tokio::test]
    async fn missing_day_reads_as_zero() {
        let (store, _dir) = testing::store().await;
        let counter = DailyCounter::new(store);
        assert_eq!(
            counter.for_date("1999-12-31").await.unwrap(),
            DailyCounts::default()
        );
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let (store, _dir) = testing::store().await;
        let counter = DailyCounter::new(store);

        let tasks: Vec<_> = (0..40)
            .map(|_| {
                let counter = counter.clone();
                tokio::spawn(async move { counter.increment(CounterName::ChatSessions).await })
            })
            .collect();
        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        assert_eq!(counter.today().await.unwrap().chat_sessions, 40);
    }
}
