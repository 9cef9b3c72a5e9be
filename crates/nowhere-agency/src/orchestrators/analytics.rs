// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use nowhere_core::{Filter, NowhereError, time};
use serde::Serialize;

use super::Agency;
use crate::entities::{BOOKINGS, CHAT_SESSIONS, CONTACT_FORMS, PORTFOLIO};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodayCounts {
    pub page_views: i64,
    pub contact_forms: i64,
    pub bookings: i64,
    pub chat_sessions: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TotalCounts {
    pub contacts: u64,
    pub bookings: u64,
    pub chat_sessions: u64,
    pub portfolio_items: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecentCounts {
    pub contacts_today: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalyticsSummary {
    pub today: TodayCounts,
    pub total: TotalCounts,
    pub recent: RecentCounts,
}

impl Agency {
    /// Today's counters, collection totals, and contacts since UTC midnight.
    pub async fn analytics_summary(&self) -> Result<AnalyticsSummary, NowhereError> {
        let now = time::now();
        let counts = self.counter.for_date(&time::date_key(&now)).await?;
        let all = Filter::new();

        let total = TotalCounts {
            contacts: self.store.count(CONTACT_FORMS, &all).await?,
            bookings: self.store.count(BOOKINGS, &all).await?,
            chat_sessions: self.store.count(CHAT_SESSIONS, &all).await?,
            portfolio_items: self.store.count(PORTFOLIO, &all).await?,
        };

        let midnight = time::format(&time::start_of_day(&now));
        let contacts_today = self
            .store
            .count(CONTACT_FORMS, &Filter::new().gte("created_at", midnight))
            .await?;

        Ok(AnalyticsSummary {
            today: TodayCounts {
                page_views: counts.page_views,
                contact_forms: counts.contact_forms,
                bookings: counts.bookings,
                chat_sessions: counts.chat_sessions,
            },
            total,
            recent: RecentCounts { contacts_today },
        })
    }
}
