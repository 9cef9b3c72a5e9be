// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use nowhere_core::NowhereError;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::Agency;
use crate::assistant::StrategyBrief;
use crate::entities::{CONTENT_GENERATION, ContentGeneration, ContentRequest, RecordMeta};

/// Generated marketing content and the id it was stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedContent {
    pub content: String,
    pub id: String,
}

const DEFAULT_LOCATION: &str = "UAE";

impl Agency {
    /// Generates content for `request` and stores the generation.
    pub async fn generate_content(
        &self,
        request: ContentRequest,
    ) -> Result<GeneratedContent, NowhereError> {
        request.validate()?;
        let completion = self
            .assistant
            .generate_content(&request.content_type, &request.prompt)
            .await;

        let mut metadata = serde_json::Map::new();
        metadata.insert("fallback".into(), Value::Bool(completion.degraded));

        let record = ContentGeneration {
            meta: RecordMeta::fresh(),
            user_id: request.user_id,
            content_type: request.content_type,
            prompt: request.prompt,
            generated_content: completion.text,
            is_approved: false,
            metadata,
        };
        self.persist(CONTENT_GENERATION, &record).await?;
        info!(id = %record.meta.id, content_type = %record.content_type, "content generated");

        Ok(GeneratedContent {
            content: record.generated_content,
            id: record.meta.id,
        })
    }

    /// Service recommendations for a described business.
    pub async fn recommend_services(&self, business_info: &str) -> Result<String, NowhereError> {
        if business_info.trim().is_empty() {
            return Err(NowhereError::Validation(
                "business_info must not be empty".into(),
            ));
        }
        Ok(self.assistant.recommend_services(business_info).await.text)
    }

    /// Market analysis for an industry; location defaults to the UAE.
    pub async fn market_trends(
        &self,
        industry: &str,
        location: Option<&str>,
    ) -> Result<String, NowhereError> {
        if industry.trim().is_empty() {
            return Err(NowhereError::Validation("industry must not be empty".into()));
        }
        let location = location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(DEFAULT_LOCATION);
        Ok(self.assistant.analyze_market(industry, location).await.text)
    }

    pub async fn strategy_proposal(&self, brief: &StrategyBrief) -> String {
        self.assistant.propose_strategy(brief).await.text
    }
}

#[cfg(test)]
mod tests {
    use nowhere_core::Filter;

    use super::*;
    use crate::entities::from_document;
    use crate::prompts::{CONTENT_FALLBACK, MARKET_TRENDS_FALLBACK};
    use crate::testing::{Fixture, Step};

    fn request() -> ContentRequest {
        ContentRequest {
            content_type: "ad_copy".into(),
            prompt: "Ramadan sale".into(),
            user_id: Some("u-1".into()),
        }
    }

    #[tokio::test]
    async fn generation_is_persisted() {
        let fx = Fixture::new(vec![Step::Reply("Shop now!")]).await;
        let generated = fx.agency.generate_content(request()).await.unwrap();
        assert_eq!(generated.content, "Shop now!");

        let doc = fx
            .store
            .find_one(CONTENT_GENERATION, &Filter::by_id(generated.id.as_str()))
            .await
            .unwrap()
            .unwrap();
        let stored: ContentGeneration = from_document(doc).unwrap();
        assert_eq!(stored.generated_content, "Shop now!");
        assert_eq!(stored.content_type, "ad_copy");
        assert!(!stored.is_approved);
        assert_eq!(stored.metadata["fallback"], false);
    }

    #[tokio::test]
    async fn failed_generation_stores_fallback() {
        let fx = Fixture::new(vec![Step::Fail]).await;
        let generated = fx.agency.generate_content(request()).await.unwrap();
        assert_eq!(generated.content, CONTENT_FALLBACK);
    }

    #[tokio::test]
    async fn market_trends_default_location() {
        let fx = Fixture::new(vec![Step::Reply("Growing fast.")]).await;
        let analysis = fx.agency.market_trends("real estate", None).await.unwrap();
        assert_eq!(analysis, "Growing fast.");
        let prompt = &fx.provider.requests()[0].messages[0].content;
        assert!(prompt.contains("real estate businesses in UAE"));
    }

    #[tokio::test]
    async fn market_trends_fallback_and_validation() {
        let fx = Fixture::new(vec![Step::Fail]).await;
        assert_eq!(
            fx.agency.market_trends("retail", Some("Dubai")).await.unwrap(),
            MARKET_TRENDS_FALLBACK
        );
        assert!(fx.agency.market_trends(" ", None).await.is_err());
        assert!(fx.agency.recommend_services("").await.is_err());
    }
}
