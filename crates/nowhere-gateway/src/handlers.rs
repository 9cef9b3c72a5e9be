// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.

use axum::Json;
use axum::extract::{Path, State};
use nowhere_agency::entities::{
    BookingCreate, BookingUpdate, ChatMessageCreate, ContactFormCreate, ContactFormUpdate,
    ContentRequest, PortfolioItemCreate, PortfolioItemUpdate, ServiceCreate, ServiceUpdate,
    TestimonialCreate, TestimonialUpdate,
};
use nowhere_agency::orchestrators::{
    BookingQuery, ContactQuery, PortfolioQuery, ServiceQuery, TestimonialQuery,
};
use nowhere_agency::{PageParams, StrategyBrief};
use nowhere_core::time;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::extract::{ApiJson, ApiQuery};
use crate::response::{ApiError, ApiResponse, ResultExt};
use crate::server::GatewayState;

type ApiResult = Result<ApiResponse<Value>, ApiError>;
type ApiAck = Result<ApiResponse<()>, ApiError>;

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: String,
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "NOWHERE Digital API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "online",
        "endpoints": {
            "health": "/api/health",
            "contact": "/api/contact",
            "chat": "/api/chat",
            "content": "/api/content",
            "analytics": "/api/analytics/summary",
        }
    }))
}

/// GET /api/health
pub async fn health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: time::format(&time::now()),
        service: state.service_name.to_string(),
    })
}

// --- contact ---

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<GatewayState>,
    ApiJson(body): ApiJson<ContactFormCreate>,
) -> ApiResult {
    let record = state
        .agency
        .submit_contact(body)
        .await
        .context("Failed to submit contact form")?;
    Ok(ApiResponse::ok(
        "Contact form submitted successfully. We'll get back to you soon!",
        json!({ "id": record.meta.id }),
    ))
}

/// GET /api/contact
pub async fn list_contacts(
    State(state): State<GatewayState>,
    ApiQuery(query): ApiQuery<ContactQuery>,
) -> ApiResult {
    let contacts = state
        .agency
        .list_contacts(query)
        .await
        .context("Failed to get contact forms")?;
    Ok(ApiResponse::ok(
        "Contact forms retrieved successfully",
        json!(contacts),
    ))
}

/// PUT /api/contact/{id}
pub async fn update_contact(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<ContactFormUpdate>,
) -> ApiAck {
    state
        .agency
        .update_contact(&id, body)
        .await
        .context("Failed to update contact form")?;
    Ok(ApiResponse::done("Contact form updated successfully"))
}

// --- chat ---

#[derive(Debug, Default, Deserialize)]
pub struct SessionParams {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// POST /api/chat/session
pub async fn open_chat_session(
    State(state): State<GatewayState>,
    ApiQuery(params): ApiQuery<SessionParams>,
) -> ApiResult {
    let session = state
        .agency
        .open_chat_session(params.user_id)
        .await
        .context("Failed to create chat session")?;
    Ok(ApiResponse::ok(
        "Chat session created successfully",
        json!({ "session_id": session.session_id }),
    ))
}

/// POST /api/chat/message
pub async fn send_chat_message(
    State(state): State<GatewayState>,
    ApiJson(body): ApiJson<ChatMessageCreate>,
) -> ApiResult {
    let reply = state
        .agency
        .send_chat_message(body)
        .await
        .context("Failed to send message")?;
    Ok(ApiResponse::ok(
        "Message sent successfully",
        json!({ "response": reply.response }),
    ))
}

/// GET /api/chat/history/{session_id}
pub async fn chat_history(
    State(state): State<GatewayState>,
    Path(session_id): Path<String>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> ApiResult {
    let messages = state
        .agency
        .chat_history(&session_id, page)
        .await
        .context("Failed to get chat history")?;
    Ok(ApiResponse::ok(
        "Chat history retrieved successfully",
        json!(messages),
    ))
}

// --- content ---

/// POST /api/content/generate
pub async fn generate_content(
    State(state): State<GatewayState>,
    ApiJson(body): ApiJson<ContentRequest>,
) -> ApiResult {
    let generated = state
        .agency
        .generate_content(body)
        .await
        .context("Failed to generate content")?;
    Ok(ApiResponse::ok(
        "Content generated successfully",
        json!(generated),
    ))
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub business_info: String,
}

/// GET /api/content/recommendations
pub async fn recommendations(
    State(state): State<GatewayState>,
    ApiQuery(params): ApiQuery<RecommendationParams>,
) -> ApiResult {
    let recommendations = state
        .agency
        .recommend_services(&params.business_info)
        .await
        .context("Failed to generate recommendations")?;
    Ok(ApiResponse::ok(
        "Recommendations generated successfully",
        json!({ "recommendations": recommendations }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct MarketTrendsParams {
    pub industry: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// GET /api/content/market-trends
pub async fn market_trends(
    State(state): State<GatewayState>,
    ApiQuery(params): ApiQuery<MarketTrendsParams>,
) -> ApiResult {
    let analysis = state
        .agency
        .market_trends(&params.industry, params.location.as_deref())
        .await
        .context("Failed to analyze market trends")?;
    Ok(ApiResponse::ok(
        "Market trends analysis generated successfully",
        json!({ "analysis": analysis }),
    ))
}

/// POST /api/content/strategy
pub async fn strategy_proposal(
    State(state): State<GatewayState>,
    ApiJson(brief): ApiJson<StrategyBrief>,
) -> ApiResult {
    let proposal = state.agency.strategy_proposal(&brief).await;
    Ok(ApiResponse::ok(
        "Strategy proposal generated successfully",
        json!({ "proposal": proposal }),
    ))
}

// --- portfolio ---

/// POST /api/portfolio
pub async fn create_portfolio_item(
    State(state): State<GatewayState>,
    ApiJson(body): ApiJson<PortfolioItemCreate>,
) -> ApiResult {
    let record = state
        .agency
        .create_portfolio_item(body)
        .await
        .context("Failed to create portfolio item")?;
    Ok(ApiResponse::ok(
        "Portfolio item created successfully",
        json!({ "id": record.meta.id }),
    ))
}

/// GET /api/portfolio
pub async fn list_portfolio(
    State(state): State<GatewayState>,
    ApiQuery(query): ApiQuery<PortfolioQuery>,
) -> ApiResult {
    let items = state
        .agency
        .list_portfolio(query)
        .await
        .context("Failed to get portfolio items")?;
    Ok(ApiResponse::ok(
        "Portfolio items retrieved successfully",
        json!(items),
    ))
}

/// PUT /api/portfolio/{id}
pub async fn update_portfolio_item(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<PortfolioItemUpdate>,
) -> ApiAck {
    state
        .agency
        .update_portfolio_item(&id, body)
        .await
        .context("Failed to update portfolio item")?;
    Ok(ApiResponse::done("Portfolio item updated successfully"))
}

// --- bookings ---

#[derive(Debug, Default, Deserialize)]
pub struct BookingOwner {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<GatewayState>,
    ApiQuery(owner): ApiQuery<BookingOwner>,
    ApiJson(body): ApiJson<BookingCreate>,
) -> ApiResult {
    let record = state
        .agency
        .create_booking(body, owner.user_id)
        .await
        .context("Failed to create booking")?;
    Ok(ApiResponse::ok(
        "Booking created successfully",
        json!({ "id": record.meta.id }),
    ))
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<GatewayState>,
    ApiQuery(query): ApiQuery<BookingQuery>,
) -> ApiResult {
    let bookings = state
        .agency
        .list_bookings(query)
        .await
        .context("Failed to get bookings")?;
    Ok(ApiResponse::ok(
        "Bookings retrieved successfully",
        json!(bookings),
    ))
}

/// PUT /api/bookings/{id}
pub async fn update_booking(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<BookingUpdate>,
) -> ApiAck {
    state
        .agency
        .update_booking(&id, body)
        .await
        .context("Failed to update booking")?;
    Ok(ApiResponse::done("Booking updated successfully"))
}

// --- services ---

/// POST /api/services
pub async fn create_service(
    State(state): State<GatewayState>,
    ApiJson(body): ApiJson<ServiceCreate>,
) -> ApiResult {
    let record = state
        .agency
        .create_service(body)
        .await
        .context("Failed to create service")?;
    Ok(ApiResponse::ok(
        "Service created successfully",
        json!({ "id": record.meta.id }),
    ))
}

/// GET /api/services
pub async fn list_services(
    State(state): State<GatewayState>,
    ApiQuery(query): ApiQuery<ServiceQuery>,
) -> ApiResult {
    let services = state
        .agency
        .list_services(query)
        .await
        .context("Failed to get services")?;
    Ok(ApiResponse::ok(
        "Services retrieved successfully",
        json!(services),
    ))
}

/// PUT /api/services/{id}
pub async fn update_service(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<ServiceUpdate>,
) -> ApiAck {
    state
        .agency
        .update_service(&id, body)
        .await
        .context("Failed to update service")?;
    Ok(ApiResponse::done("Service updated successfully"))
}

// --- testimonials ---

/// POST /api/testimonials
pub async fn create_testimonial(
    State(state): State<GatewayState>,
    ApiJson(body): ApiJson<TestimonialCreate>,
) -> ApiResult {
    let record = state
        .agency
        .create_testimonial(body)
        .await
        .context("Failed to create testimonial")?;
    Ok(ApiResponse::ok(
        "Testimonial created successfully",
        json!({ "id": record.meta.id }),
    ))
}

/// GET /api/testimonials
pub async fn list_testimonials(
    State(state): State<GatewayState>,
    ApiQuery(query): ApiQuery<TestimonialQuery>,
) -> ApiResult {
    let testimonials = state
        .agency
        .list_testimonials(query)
        .await
        .context("Failed to get testimonials")?;
    Ok(ApiResponse::ok(
        "Testimonials retrieved successfully",
        json!(testimonials),
    ))
}

/// PUT /api/testimonials/{id}
pub async fn update_testimonial(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<TestimonialUpdate>,
) -> ApiAck {
    state
        .agency
        .update_testimonial(&id, body)
        .await
        .context("Failed to update testimonial")?;
    Ok(ApiResponse::done("Testimonial updated successfully"))
}

// --- analytics ---

/// GET /api/analytics/summary
pub async fn analytics_summary(State(state): State<GatewayState>) -> ApiResult {
    let summary = state
        .agency
        .analytics_summary()
        .await
        .context("Failed to get analytics summary")?;
    Ok(ApiResponse::ok(
        "Analytics summary retrieved successfully",
        json!(summary),
    ))
}
