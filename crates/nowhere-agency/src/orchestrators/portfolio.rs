// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use nowhere_core::{Filter, FindQuery, NowhereError, SortDirection};
use serde::Deserialize;
use tracing::info;

use super::Agency;
use crate::entities::{
    PORTFOLIO, PortfolioItem, PortfolioItemCreate, PortfolioItemUpdate, ServiceType,
};
use crate::pagination::{PORTFOLIO_PAGE, PageParams};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioQuery {
    #[serde(default, deserialize_with = "super::blank_as_none")]
    pub service_type: Option<ServiceType>,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Agency {
    pub async fn create_portfolio_item(
        &self,
        item: PortfolioItemCreate,
    ) -> Result<PortfolioItem, NowhereError> {
        item.validate()?;
        let record = item.into_record();
        self.persist(PORTFOLIO, &record).await?;
        info!(id = %record.meta.id, title = %record.title, "portfolio item created");
        Ok(record)
    }

    /// Portfolio items, newest first.
    pub async fn list_portfolio(
        &self,
        query: PortfolioQuery,
    ) -> Result<Vec<PortfolioItem>, NowhereError> {
        let (skip, limit) = PORTFOLIO_PAGE.resolve(PageParams {
            skip: query.skip,
            limit: query.limit,
        })?;
        let filter = Filter::new()
            .eq_opt("service_type", query.service_type.map(|s| s.to_string()))
            .eq_opt("is_featured", query.is_featured);
        let find = FindQuery::new(filter, "created_at", SortDirection::Descending).page(skip, limit);
        self.list(PORTFOLIO, &find).await
    }

    pub async fn update_portfolio_item(
        &self,
        id: &str,
        update: PortfolioItemUpdate,
    ) -> Result<(), NowhereError> {
        let updates = update.field_updates()?;
        self.update(PORTFOLIO, "portfolio item", id, updates).await
    }
}

#[cfg(test)]
mod tests {
    use nowhere_core::Patch;

    use super::*;
    use crate::testing::Fixture;

    fn item(title: &str, service_type: ServiceType, is_featured: bool) -> PortfolioItemCreate {
        PortfolioItemCreate {
            title: title.into(),
            description: "d".into(),
            client_name: "Client".into(),
            service_type,
            project_duration: "3 months".into(),
            results: vec!["+40% leads".into()],
            images: Vec::new(),
            technologies: vec!["Rust".into()],
            testimonial: None,
            is_featured,
        }
    }

    #[tokio::test]
    async fn filters_by_service_and_featured_flag() {
        let fx = Fixture::new(Vec::new()).await;
        fx.agency
            .create_portfolio_item(item("a", ServiceType::Seo, true))
            .await
            .unwrap();
        fx.agency
            .create_portfolio_item(item("b", ServiceType::Seo, false))
            .await
            .unwrap();
        fx.agency
            .create_portfolio_item(item("c", ServiceType::Ecommerce, true))
            .await
            .unwrap();

        let featured_seo = fx
            .agency
            .list_portfolio(PortfolioQuery {
                service_type: Some(ServiceType::Seo),
                is_featured: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(featured_seo.len(), 1);
        assert_eq!(featured_seo[0].title, "a");

        let featured = fx
            .agency
            .list_portfolio(PortfolioQuery {
                is_featured: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        let titles: Vec<_> = featured.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn update_clears_testimonial_and_misses_unknown_id() {
        let fx = Fixture::new(Vec::new()).await;
        let mut create = item("a", ServiceType::Seo, false);
        create.testimonial = Some("Great work".into());
        let record = fx.agency.create_portfolio_item(create).await.unwrap();

        fx.agency
            .update_portfolio_item(
                &record.meta.id,
                PortfolioItemUpdate {
                    testimonial: Patch::Cleared,
                    is_featured: Patch::Set(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let stored = fx.agency.list_portfolio(PortfolioQuery::default()).await.unwrap();
        assert_eq!(stored[0].testimonial, None);
        assert!(stored[0].is_featured);

        let err = fx
            .agency
            .update_portfolio_item("missing", PortfolioItemUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, NowhereError::NotFound { .. }));
    }
}
