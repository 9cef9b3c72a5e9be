// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use nowhere_core::{Filter, FindQuery, NowhereError, SortDirection};
use nowhere_email::BookingDetails;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{Agency, non_blank};
use crate::counter::CounterName;
use crate::dispatcher::Notification;
use crate::entities::{BOOKINGS, Booking, BookingCreate, BookingStatus, BookingUpdate, USERS};
use crate::pagination::{BOOKING_PAGE, PageParams};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingQuery {
    #[serde(default, deserialize_with = "super::blank_as_none")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "super::blank_as_none")]
    pub status: Option<BookingStatus>,
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Agency {
    /// Stores a booking. Without a caller-supplied `user_id` the booking gets
    /// a fresh one and no confirmation is sent.
    pub async fn create_booking(
        &self,
        booking: BookingCreate,
        user_id: Option<String>,
    ) -> Result<Booking, NowhereError> {
        booking.validate()?;
        let known_user = non_blank(user_id);
        let owner = known_user
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let record = booking.into_record(owner);
        self.persist(BOOKINGS, &record).await?;
        info!(id = %record.meta.id, service = %record.service_type, "booking created");

        self.counter.record(CounterName::Bookings).await;

        if let Some(user_id) = known_user {
            match self.user_email(&user_id).await {
                Ok(Some(to)) => self.notifier.dispatch(Notification::BookingConfirmed {
                    to,
                    booking: BookingDetails {
                        service_type: record.service_type.to_string(),
                        preferred_date: record.preferred_date.clone(),
                        preferred_time: record.preferred_time.clone(),
                        duration_minutes: record.duration,
                        status: record.status.to_string(),
                        meeting_link: record.meeting_link.clone(),
                    },
                }),
                Ok(None) => debug!(user_id, "no email on file, skipping booking confirmation"),
                Err(e) => warn!(user_id, error = %e, "user lookup failed, skipping booking confirmation"),
            }
        }

        Ok(record)
    }

    /// Bookings, newest first.
    pub async fn list_bookings(&self, query: BookingQuery) -> Result<Vec<Booking>, NowhereError> {
        let (skip, limit) = BOOKING_PAGE.resolve(PageParams {
            skip: query.skip,
            limit: query.limit,
        })?;
        let filter = Filter::new()
            .eq_opt("user_id", non_blank(query.user_id))
            .eq_opt("status", query.status.map(|s| s.to_string()));
        let find = FindQuery::new(filter, "created_at", SortDirection::Descending).page(skip, limit);
        self.list(BOOKINGS, &find).await
    }

    pub async fn update_booking(&self, id: &str, update: BookingUpdate) -> Result<(), NowhereError> {
        let updates = update.field_updates()?;
        self.update(BOOKINGS, "booking", id, updates).await
    }

    async fn user_email(&self, user_id: &str) -> Result<Option<String>, NowhereError> {
        let user = self.store.find_one(USERS, &Filter::by_id(user_id)).await?;
        Ok(user
            .as_ref()
            .and_then(|doc| doc.get("email"))
            .and_then(Value::as_str)
            .filter(|email| !email.is_empty())
            .map(str::to_string))
    }
}
