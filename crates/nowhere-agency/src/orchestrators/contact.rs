// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use nowhere_core::{Filter, FindQuery, NowhereError, SortDirection, time};
use nowhere_email::ContactDetails;
use serde::Deserialize;
use tracing::info;

use super::Agency;
use crate::counter::CounterName;
use crate::dispatcher::Notification;
use crate::entities::{
    CONTACT_FORMS, ContactForm, ContactFormCreate, ContactFormUpdate, ContactStatus,
};
use crate::pagination::{CONTACT_PAGE, PageParams};

/// Filters for listing contact forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactQuery {
    #[serde(default, deserialize_with = "super::blank_as_none")]
    pub status: Option<ContactStatus>,
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Agency {
    /// Stores a contact form, counts it and emails both the admin and the
    /// submitter.
    pub async fn submit_contact(&self, form: ContactFormCreate) -> Result<ContactForm, NowhereError> {
        form.validate()?;
        let record = form.into_record();
        self.persist(CONTACT_FORMS, &record).await?;
        info!(id = %record.meta.id, service = %record.service, "contact form submitted");

        self.counter.record(CounterName::ContactForms).await;

        let details = ContactDetails {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            service: record.service.to_string(),
            message: record.message.clone(),
            submitted_at: time::format(&record.meta.created_at),
        };
        self.notifier
            .dispatch(Notification::ContactReceived(details.clone()));
        self.notifier
            .dispatch(Notification::ContactAcknowledged(details));

        Ok(record)
    }

    /// Contact forms, newest first.
    pub async fn list_contacts(&self, query: ContactQuery) -> Result<Vec<ContactForm>, NowhereError> {
        let (skip, limit) = CONTACT_PAGE.resolve(PageParams {
            skip: query.skip,
            limit: query.limit,
        })?;
        let filter = Filter::new().eq_opt("status", query.status.map(|s| s.to_string()));
        let find = FindQuery::new(filter, "created_at", SortDirection::Descending).page(skip, limit);
        self.list(CONTACT_FORMS, &find).await
    }

    pub async fn update_contact(
        &self,
        id: &str,
        update: ContactFormUpdate,
    ) -> Result<(), NowhereError> {
        let updates = update.field_updates()?;
        self.update(CONTACT_FORMS, "contact form", id, updates).await
    }
}

#[cfg(test)]
mod tests {
    use nowhere_core::Patch;

    use super::*;
    use crate::entities::ServiceType;
    use crate::testing::Fixture;

    fn form() -> ContactFormCreate {
        ContactFormCreate {
            name: "A".into(),
            email: "a@x.com".into(),
            phone: "123".into(),
            service: ServiceType::Seo,
            message: "hi".into(),
        }
    }

    #[tokio::test]
    async fn submit_persists_counts_and_notifies_twice() {
        let fx = Fixture::new(Vec::new()).await;

        let record = fx.agency.submit_contact(form()).await.unwrap();

        let stored = fx
            .store
            .count(CONTACT_FORMS, &Filter::by_id(record.meta.id.as_str()))
            .await
            .unwrap();
        assert_eq!(stored, 1);
        assert_eq!(fx.agency.counter().today().await.unwrap().contact_forms, 1);

        let sent = fx.delivered().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].subject, "New Contact Form Submission - A");
        assert_eq!(sent[1].to, "a@x.com");
    }

    #[tokio::test]
    async fn invalid_form_persists_nothing() {
        let fx = Fixture::new(Vec::new()).await;
        let mut bad = form();
        bad.message = String::new();

        let err = fx.agency.submit_contact(bad).await.unwrap_err();
        assert!(matches!(err, NowhereError::Validation(_)));
        assert_eq!(fx.store.count(CONTACT_FORMS, &Filter::new()).await.unwrap(), 0);
        assert_eq!(fx.agency.counter().today().await.unwrap().contact_forms, 0);
        assert!(fx.delivered().await.is_empty());
    }

    #[tokio::test]
    async fn list_filters_by_status_newest_first() {
        let fx = Fixture::new(Vec::new()).await;
        let first = fx.agency.submit_contact(form()).await.unwrap();
        let second = fx.agency.submit_contact(form()).await.unwrap();
        fx.agency
            .update_contact(
                &first.meta.id,
                ContactFormUpdate {
                    status: Patch::Set(ContactStatus::Contacted),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let new_only = fx
            .agency
            .list_contacts(ContactQuery {
                status: Some(ContactStatus::New),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(new_only.len(), 1);
        assert_eq!(new_only[0].meta.id, second.meta.id);

        let all = fx.agency.list_contacts(ContactQuery::default()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|c| c.meta.id.as_str()).collect();
        assert_eq!(ids, vec![second.meta.id.as_str(), first.meta.id.as_str()]);
    }

    #[tokio::test]
    async fn update_refreshes_timestamp_and_clears_fields() {
        let fx = Fixture::new(Vec::new()).await;
        let record = fx.agency.submit_contact(form()).await.unwrap();
        let id = record.meta.id.clone();

        fx.agency
            .update_contact(
                &id,
                ContactFormUpdate {
                    assigned_to: Patch::Set("sara".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        fx.agency
            .update_contact(
                &id,
                ContactFormUpdate {
                    assigned_to: Patch::Cleared,
                    notes: Patch::Set(vec!["called back".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = fx.agency.list_contacts(ContactQuery::default()).await.unwrap();
        let stored = &stored[0];
        assert_eq!(stored.assigned_to, None);
        assert_eq!(stored.notes, vec!["called back".to_string()]);
        assert_eq!(stored.status, ContactStatus::New);
        assert!(stored.meta.updated_at >= record.meta.updated_at);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_without_side_effects() {
        let fx = Fixture::new(Vec::new()).await;
        fx.agency.submit_contact(form()).await.unwrap();
        let before = fx.agency.counter().today().await.unwrap();

        let err = fx
            .agency
            .update_contact(
                "missing",
                ContactFormUpdate {
                    status: Patch::Set(ContactStatus::Closed),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, NowhereError::NotFound { .. }));
        assert_eq!(fx.agency.counter().today().await.unwrap(), before);
        let stored = fx.agency.list_contacts(ContactQuery::default()).await.unwrap();
        assert_eq!(stored[0].status, ContactStatus::New);
    }

    #[tokio::test]
    async fn out_of_range_page_is_rejected() {
        let fx = Fixture::new(Vec::new()).await;
        let err = fx
            .agency
            .list_contacts(ContactQuery {
                limit: Some(500),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, NowhereError::Validation(_)));
    }
}
