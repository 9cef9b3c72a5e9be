// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete agency pipeline.
//!
//! Each test creates an isolated TestHarness with temp SQLite, a mock model
//! provider, and a recording mail transport. Tests are independent and
//! order-insensitive.

use futures::future::join_all;
use nowhere_agency::entities::{
    ChatMessageCreate, ContactFormCreate, ContactFormUpdate, ContactStatus, ServiceType,
};
use nowhere_agency::orchestrators::ContactQuery;
use nowhere_agency::prompts::CHAT_FALLBACK;
use nowhere_agency::PageParams;
use nowhere_core::{DocumentStore, Filter, NowhereError, Patch};
use nowhere_test_utils::TestHarness;
use nowhere_test_utils::harness::TEST_ADMIN;

fn contact(name: &str) -> ContactFormCreate {
    ContactFormCreate {
        name: name.into(),
        email: "lead@example.ae".into(),
        phone: "+971500000000".into(),
        service: ServiceType::SocialMedia,
        message: "We need a launch campaign".into(),
    }
}

// ---- Test 1: Contact submission end to end ----

#[tokio::test]
async fn contact_is_listed_counted_and_mailed() {
    let harness = TestHarness::new().await.unwrap();

    let record = harness.agency.submit_contact(contact("Layla")).await.unwrap();
    assert_eq!(record.status, ContactStatus::New);

    let listed = harness
        .agency
        .list_contacts(ContactQuery {
            status: Some(ContactStatus::New),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(listed.iter().any(|c| c.meta.id == record.meta.id));

    let summary = harness.agency.analytics_summary().await.unwrap();
    assert!(summary.today.contact_forms >= 1);
    assert_eq!(summary.total.contacts, 1);
    assert_eq!(summary.recent.contacts_today, 1);

    let sent = harness.delivered_email().await;
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().any(|m| m.to == TEST_ADMIN));
    assert!(sent.iter().any(|m| m.to == "lead@example.ae"));
}

#[tokio::test]
async fn mail_failure_does_not_fail_submission() {
    let harness = TestHarness::new().await.unwrap();
    harness.transport.set_failing(true);

    let record = harness.agency.submit_contact(contact("Omar")).await;
    assert!(record.is_ok());
    assert!(harness.delivered_email().await.is_empty());
}

// ---- Test 2: Chat degrades to the fallback reply ----

#[tokio::test]
async fn chat_falls_back_when_model_fails() {
    let harness = TestHarness::new().await.unwrap();
    harness.provider.add_failure("upstream 529").await;

    let session = harness.agency.open_chat_session(None).await.unwrap();
    let reply = harness
        .agency
        .send_chat_message(ChatMessageCreate {
            session_id: session.session_id.clone(),
            message: "What do you offer?".into(),
            user_id: None,
        })
        .await
        .unwrap();
    assert_eq!(reply.response, CHAT_FALLBACK);

    let history = harness
        .agency
        .chat_history(&session.session_id, PageParams::default())
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].response, CHAT_FALLBACK);
}

#[tokio::test]
async fn chat_sends_prior_turns_as_context() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["First".into(), "Second".into()])
        .build()
        .await
        .unwrap();

    let session = harness.agency.open_chat_session(Some("u-7".into())).await.unwrap();
    for text in ["hello", "and pricing?"] {
        harness
            .agency
            .send_chat_message(ChatMessageCreate {
                session_id: session.session_id.clone(),
                message: text.into(),
                user_id: Some("u-7".into()),
            })
            .await
            .unwrap();
    }

    let requests = harness.provider.requests().await;
    assert_eq!(requests.len(), 2);
    // Second call carries the first exchange plus the new message.
    assert_eq!(requests[1].messages.len(), 3);
    assert_eq!(requests[1].messages[0].content, "hello");
    assert_eq!(requests[1].messages[1].content, "First");
}

// ---- Test 3: Concurrent counter increments ----

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_count_exactly() {
    let harness = TestHarness::builder()
        .with_queue_capacity(256)
        .build()
        .await
        .unwrap();

    let submissions = (0..25).map(|i| {
        let agency = harness.agency.clone();
        async move { agency.submit_contact(contact(&format!("Lead {i}"))).await }
    });
    let results = join_all(submissions).await;
    assert!(results.iter().all(Result::is_ok));

    let counts = harness.agency.counter().today().await.unwrap();
    assert_eq!(counts.contact_forms, 25);
}

// ---- Test 4: Unknown identifiers ----

#[tokio::test]
async fn update_of_unknown_contact_is_not_found_and_mutates_nothing() {
    let harness = TestHarness::new().await.unwrap();
    let record = harness.agency.submit_contact(contact("Sara")).await.unwrap();

    let err = harness
        .agency
        .update_contact(
            "no-such-id",
            ContactFormUpdate {
                status: Patch::Set(ContactStatus::Closed),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, NowhereError::NotFound { .. }));

    let closed = harness
        .store
        .count("contact_forms", &Filter::new().eq("status", "closed"))
        .await
        .unwrap();
    assert_eq!(closed, 0);

    let listed = harness.agency.list_contacts(ContactQuery::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].meta.id, record.meta.id);
    assert_eq!(listed[0].status, ContactStatus::New);
}
