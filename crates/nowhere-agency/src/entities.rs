// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted business records and their create/update payloads.
//!
//! Every record carries a UUID `id` and `created_at`/`updated_at` stamps in
//! the store's timestamp format. Update payloads use [`Patch`] so an omitted
//! field is left alone while an explicit `null` clears it.

use chrono::{DateTime, NaiveDate, Utc};
use nowhere_core::{Document, FieldUpdate, NowhereError, Patch, time};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CONTACT_FORMS: &str = "contact_forms";
pub const BOOKINGS: &str = "bookings";
pub const CHAT_SESSIONS: &str = "chat_sessions";
pub const CHAT_MESSAGES: &str = "chat_messages";
pub const CONTENT_GENERATION: &str = "content_generation";
pub const PORTFOLIO: &str = "portfolio";
pub const SERVICES: &str = "services";
pub const TESTIMONIALS: &str = "testimonials";
pub const USERS: &str = "users";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContactStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Closed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceType {
    SocialMedia,
    Whatsapp,
    WebDevelopment,
    AiSolutions,
    Seo,
    ContentMarketing,
    Ecommerce,
    LeadGeneration,
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

/// Identifier and stamps shared by every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub id: String,
    #[serde(with = "time::micros")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "time::micros")]
    pub updated_at: DateTime<Utc>,
}

impl RecordMeta {
    pub fn fresh() -> Self {
        let now = time::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

// --- contact forms ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: ServiceType,
    pub message: String,
    pub status: ContactStatus,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactFormCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: ServiceType,
    pub message: String,
}

impl ContactFormCreate {
    pub fn validate(&self) -> Result<(), NowhereError> {
        require_text("name", &self.name)?;
        require_email("email", &self.email)?;
        require_text("phone", &self.phone)?;
        require_text("message", &self.message)
    }

    pub fn into_record(self) -> ContactForm {
        ContactForm {
            meta: RecordMeta::fresh(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone,
            service: self.service,
            message: self.message,
            status: ContactStatus::New,
            assigned_to: None,
            notes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactFormUpdate {
    #[serde(default)]
    pub status: Patch<ContactStatus>,
    #[serde(default)]
    pub assigned_to: Patch<String>,
    #[serde(default)]
    pub notes: Patch<Vec<String>>,
}

impl ContactFormUpdate {
    pub fn field_updates(&self) -> Result<Vec<FieldUpdate>, NowhereError> {
        Ok(UpdateBuilder::default()
            .required("status", &self.status)?
            .nullable("assigned_to", &self.assigned_to)?
            .required("notes", &self.notes)?
            .finish())
    }
}

// --- bookings ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub user_id: String,
    pub service_type: ServiceType,
    pub preferred_date: String,
    pub preferred_time: String,
    pub duration: u32,
    pub description: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub confirmed_date: Option<String>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

const DEFAULT_BOOKING_MINUTES: u32 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct BookingCreate {
    pub service_type: ServiceType,
    pub preferred_date: String,
    pub preferred_time: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub description: String,
}

impl BookingCreate {
    pub fn validate(&self) -> Result<(), NowhereError> {
        require_date("preferred_date", &self.preferred_date)?;
        require_text("preferred_time", &self.preferred_time)?;
        if self.duration == Some(0) {
            return Err(NowhereError::Validation(
                "duration must be at least 1 minute".into(),
            ));
        }
        Ok(())
    }

    pub fn into_record(self, user_id: String) -> Booking {
        Booking {
            meta: RecordMeta::fresh(),
            user_id,
            service_type: self.service_type,
            preferred_date: self.preferred_date,
            preferred_time: self.preferred_time,
            duration: self.duration.unwrap_or(DEFAULT_BOOKING_MINUTES),
            description: self.description,
            status: BookingStatus::Pending,
            confirmed_date: None,
            meeting_link: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingUpdate {
    #[serde(default)]
    pub status: Patch<BookingStatus>,
    #[serde(default)]
    pub preferred_date: Patch<String>,
    #[serde(default)]
    pub preferred_time: Patch<String>,
    #[serde(default)]
    pub confirmed_date: Patch<String>,
    #[serde(default)]
    pub meeting_link: Patch<String>,
    #[serde(default)]
    pub notes: Patch<String>,
}

impl BookingUpdate {
    pub fn field_updates(&self) -> Result<Vec<FieldUpdate>, NowhereError> {
        if let Some(date) = self.preferred_date.as_set() {
            require_date("preferred_date", date)?;
        }
        if let Some(date) = self.confirmed_date.as_set() {
            require_date("confirmed_date", date)?;
        }
        Ok(UpdateBuilder::default()
            .required("status", &self.status)?
            .required("preferred_date", &self.preferred_date)?
            .required("preferred_time", &self.preferred_time)?
            .nullable("confirmed_date", &self.confirmed_date)?
            .nullable("meeting_link", &self.meeting_link)?
            .nullable("notes", &self.notes)?
            .finish())
    }
}

// --- chat ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub session_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub title: String,
    pub is_active: bool,
    pub total_messages: i64,
}

impl ChatSession {
    pub fn open(user_id: Option<String>) -> Self {
        Self {
            meta: RecordMeta::fresh(),
            session_id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.filter(|u| !u.trim().is_empty()),
            title: "Chat Session".into(),
            is_active: true,
            total_messages: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub session_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub message: String,
    pub response: String,
    pub is_from_user: bool,
    #[serde(default)]
    pub metadata: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessageCreate {
    pub session_id: String,
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl ChatMessageCreate {
    pub fn validate(&self) -> Result<(), NowhereError> {
        require_text("session_id", &self.session_id)?;
        require_text("message", &self.message)
    }

    pub fn into_record(self, response: String) -> ChatMessage {
        ChatMessage {
            meta: RecordMeta::fresh(),
            session_id: self.session_id,
            user_id: self.user_id,
            message: self.message,
            response,
            is_from_user: true,
            metadata: serde_json::Map::new(),
        }
    }
}

// --- generated content ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentGeneration {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub user_id: Option<String>,
    pub content_type: String,
    pub prompt: String,
    pub generated_content: String,
    pub is_approved: bool,
    #[serde(default)]
    pub metadata: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentRequest {
    pub content_type: String,
    pub prompt: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl ContentRequest {
    pub fn validate(&self) -> Result<(), NowhereError> {
        require_text("content_type", &self.content_type)?;
        require_text("prompt", &self.prompt)
    }
}

// --- portfolio ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    pub description: String,
    pub client_name: String,
    pub service_type: ServiceType,
    pub project_duration: String,
    #[serde(default)]
    pub results: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub testimonial: Option<String>,
    pub is_featured: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioItemCreate {
    pub title: String,
    pub description: String,
    pub client_name: String,
    pub service_type: ServiceType,
    pub project_duration: String,
    #[serde(default)]
    pub results: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub testimonial: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl PortfolioItemCreate {
    pub fn validate(&self) -> Result<(), NowhereError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("client_name", &self.client_name)
    }

    pub fn into_record(self) -> PortfolioItem {
        PortfolioItem {
            meta: RecordMeta::fresh(),
            title: self.title,
            description: self.description,
            client_name: self.client_name,
            service_type: self.service_type,
            project_duration: self.project_duration,
            results: self.results,
            images: self.images,
            technologies: self.technologies,
            testimonial: self.testimonial,
            is_featured: self.is_featured,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioItemUpdate {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub client_name: Patch<String>,
    #[serde(default)]
    pub service_type: Patch<ServiceType>,
    #[serde(default)]
    pub project_duration: Patch<String>,
    #[serde(default)]
    pub results: Patch<Vec<String>>,
    #[serde(default)]
    pub images: Patch<Vec<String>>,
    #[serde(default)]
    pub technologies: Patch<Vec<String>>,
    #[serde(default)]
    pub testimonial: Patch<String>,
    #[serde(default)]
    pub is_featured: Patch<bool>,
}

impl PortfolioItemUpdate {
    pub fn field_updates(&self) -> Result<Vec<FieldUpdate>, NowhereError> {
        Ok(UpdateBuilder::default()
            .required("title", &self.title)?
            .required("description", &self.description)?
            .required("client_name", &self.client_name)?
            .required("service_type", &self.service_type)?
            .required("project_duration", &self.project_duration)?
            .required("results", &self.results)?
            .required("images", &self.images)?
            .required("technologies", &self.technologies)?
            .nullable("testimonial", &self.testimonial)?
            .required("is_featured", &self.is_featured)?
            .finish())
    }
}

// --- services ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    pub is_active: bool,
    pub category: ServiceType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCreate {
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub category: ServiceType,
}

fn default_true() -> bool {
    true
}

impl ServiceCreate {
    pub fn validate(&self) -> Result<(), NowhereError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)
    }

    pub fn into_record(self) -> Service {
        Service {
            meta: RecordMeta::fresh(),
            title: self.title,
            description: self.description,
            icon: self.icon,
            features: self.features,
            price_range: self.price_range,
            is_active: self.is_active,
            category: self.category,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceUpdate {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub icon: Patch<String>,
    #[serde(default)]
    pub features: Patch<Vec<String>>,
    #[serde(default)]
    pub price_range: Patch<String>,
    #[serde(default)]
    pub is_active: Patch<bool>,
    #[serde(default)]
    pub category: Patch<ServiceType>,
}

impl ServiceUpdate {
    pub fn field_updates(&self) -> Result<Vec<FieldUpdate>, NowhereError> {
        Ok(UpdateBuilder::default()
            .required("title", &self.title)?
            .required("description", &self.description)?
            .required("icon", &self.icon)?
            .required("features", &self.features)?
            .nullable("price_range", &self.price_range)?
            .required("is_active", &self.is_active)?
            .required("category", &self.category)?
            .finish())
    }
}

// --- testimonials ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub position: Option<String>,
    pub text: String,
    pub rating: u8,
    #[serde(default)]
    pub image: Option<String>,
    pub is_featured: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestimonialCreate {
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub position: Option<String>,
    pub text: String,
    pub rating: u8,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl TestimonialCreate {
    pub fn validate(&self) -> Result<(), NowhereError> {
        require_text("name", &self.name)?;
        require_text("company", &self.company)?;
        require_text("text", &self.text)?;
        require_rating(self.rating)
    }

    pub fn into_record(self) -> Testimonial {
        Testimonial {
            meta: RecordMeta::fresh(),
            name: self.name,
            company: self.company,
            position: self.position,
            text: self.text,
            rating: self.rating,
            image: self.image,
            is_featured: self.is_featured,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestimonialUpdate {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub company: Patch<String>,
    #[serde(default)]
    pub position: Patch<String>,
    #[serde(default)]
    pub text: Patch<String>,
    #[serde(default)]
    pub rating: Patch<u8>,
    #[serde(default)]
    pub image: Patch<String>,
    #[serde(default)]
    pub is_featured: Patch<bool>,
}

impl TestimonialUpdate {
    pub fn field_updates(&self) -> Result<Vec<FieldUpdate>, NowhereError> {
        if let Some(rating) = self.rating.as_set() {
            require_rating(*rating)?;
        }
        Ok(UpdateBuilder::default()
            .required("name", &self.name)?
            .required("company", &self.company)?
            .nullable("position", &self.position)?
            .required("text", &self.text)?
            .required("rating", &self.rating)?
            .nullable("image", &self.image)?
            .required("is_featured", &self.is_featured)?
            .finish())
    }
}

// --- helpers ---

/// Collects [`FieldUpdate`]s from patches.
#[derive(Default)]
struct UpdateBuilder {
    updates: Vec<FieldUpdate>,
}

impl UpdateBuilder {
    /// A field that may be set to `null`.
    fn nullable<T: Serialize>(mut self, field: &str, patch: &Patch<T>) -> Result<Self, NowhereError> {
        if let Some(update) = patch.to_update(field)? {
            self.updates.push(update);
        }
        Ok(self)
    }

    /// A field that must keep a value once set.
    fn required<T: Serialize>(self, field: &str, patch: &Patch<T>) -> Result<Self, NowhereError> {
        if matches!(patch, Patch::Cleared) {
            return Err(NowhereError::Validation(format!("{field} cannot be null")));
        }
        self.nullable(field, patch)
    }

    fn finish(self) -> Vec<FieldUpdate> {
        self.updates
    }
}

fn require_text(field: &str, value: &str) -> Result<(), NowhereError> {
    if value.trim().is_empty() {
        return Err(NowhereError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_email(field: &str, value: &str) -> Result<(), NowhereError> {
    nowhere_email::parse_mailbox(value)
        .map(|_| ())
        .map_err(|_| NowhereError::Validation(format!("{field} is not a valid email address")))
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn require_date(field: &str, value: &str) -> Result<(), NowhereError> {
    let value = value.trim();
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
    {
        return Ok(());
    }
    Err(NowhereError::Validation(format!(
        "{field} must be a date (YYYY-MM-DD) or RFC 3339 timestamp"
    )))
}

fn require_rating(rating: u8) -> Result<(), NowhereError> {
    if !(1..=5).contains(&rating) {
        return Err(NowhereError::Validation(format!(
            "rating must be between 1 and 5, got {rating}"
        )));
    }
    Ok(())
}

/// Serializes a record into a store document.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document, NowhereError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        _ => Err(NowhereError::Internal("record did not serialize to an object".into())),
    }
}

/// Deserializes a store document into a record.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, NowhereError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}
