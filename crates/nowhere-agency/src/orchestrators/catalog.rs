// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Services and testimonials.

use nowhere_core::{Filter, FindQuery, NowhereError, SortDirection};
use serde::Deserialize;
use tracing::info;

use super::Agency;
use crate::entities::{
    SERVICES, Service, ServiceCreate, ServiceType, ServiceUpdate, TESTIMONIALS, Testimonial,
    TestimonialCreate, TestimonialUpdate,
};
use crate::pagination::{PageParams, SERVICE_LIMIT, TESTIMONIAL_PAGE};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceQuery {
    #[serde(default, deserialize_with = "super::blank_as_none")]
    pub category: Option<ServiceType>,
    /// Defaults to active services only.
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestimonialQuery {
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Agency {
    pub async fn create_service(&self, service: ServiceCreate) -> Result<Service, NowhereError> {
        service.validate()?;
        let record = service.into_record();
        self.persist(SERVICES, &record).await?;
        info!(id = %record.meta.id, title = %record.title, "service created");
        Ok(record)
    }

    pub async fn list_services(&self, query: ServiceQuery) -> Result<Vec<Service>, NowhereError> {
        let filter = Filter::new()
            .eq("is_active", query.is_active.unwrap_or(true))
            .eq_opt("category", query.category.map(|c| c.to_string()));
        let find = FindQuery::new(filter, "created_at", SortDirection::Descending)
            .page(0, SERVICE_LIMIT);
        self.list(SERVICES, &find).await
    }

    pub async fn update_service(&self, id: &str, update: ServiceUpdate) -> Result<(), NowhereError> {
        let updates = update.field_updates()?;
        self.update(SERVICES, "service", id, updates).await
    }

    pub async fn create_testimonial(
        &self,
        testimonial: TestimonialCreate,
    ) -> Result<Testimonial, NowhereError> {
        testimonial.validate()?;
        let record = testimonial.into_record();
        self.persist(TESTIMONIALS, &record).await?;
        info!(id = %record.meta.id, rating = record.rating, "testimonial created");
        Ok(record)
    }

    /// Testimonials, highest rated first.
    pub async fn list_testimonials(
        &self,
        query: TestimonialQuery,
    ) -> Result<Vec<Testimonial>, NowhereError> {
        let (skip, limit) = TESTIMONIAL_PAGE.resolve(PageParams {
            skip: query.skip,
            limit: query.limit,
        })?;
        let filter = Filter::new().eq_opt("is_featured", query.is_featured);
        let find = FindQuery::new(filter, "rating", SortDirection::Descending).page(skip, limit);
        self.list(TESTIMONIALS, &find).await
    }

    pub async fn update_testimonial(
        &self,
        id: &str,
        update: TestimonialUpdate,
    ) -> Result<(), NowhereError> {
        let updates = update.field_updates()?;
        self.update(TESTIMONIALS, "testimonial", id, updates).await
    }
}
