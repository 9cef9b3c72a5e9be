// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort email notifications.
//!
//! [`NotificationDispatcher::dispatch`] renders the template and hands the
//! message to a bounded queue without waiting. A single worker task drains
//! the queue into the [`MailTransport`]. Delivery failures, a full queue and
//! an unconfigured transport are all logged and never reach the request that
//! caused the notification. Nothing is retried.

use std::sync::Arc;

use nowhere_core::{MailTransport, OutboundEmail};
use nowhere_email::{BookingDetails, ContactDetails, EmailTemplates};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A notification derived from an entity.
#[derive(Debug, Clone)]
pub enum Notification {
    /// New contact form, sent to the agency admin.
    ContactReceived(ContactDetails),
    /// Acknowledgement sent to the person who filled the contact form.
    ContactAcknowledged(ContactDetails),
    /// Booking confirmation for a user with a known address.
    BookingConfirmed { to: String, booking: BookingDetails },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::ContactReceived(_) => "contact_received",
            Notification::ContactAcknowledged(_) => "contact_acknowledged",
            Notification::BookingConfirmed { .. } => "booking_confirmed",
        }
    }
}

/// Queue handoff in front of the mail transport.
pub struct NotificationDispatcher {
    templates: EmailTemplates,
    tx: mpsc::Sender<OutboundEmail>,
    cancel: CancellationToken,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl NotificationDispatcher {
    /// Spawns the delivery worker. Must be called inside a Tokio runtime.
    pub fn start(
        transport: Arc<dyn MailTransport>,
        templates: EmailTemplates,
        capacity: usize,
    ) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let cancel = CancellationToken::new();
        let worker = tokio::spawn(run_worker(transport, rx, cancel.clone()));
        info!(capacity, "notification dispatcher started");

        Self {
            templates,
            tx,
            cancel,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Renders `notification` and queues it. Never blocks, never fails.
    pub fn dispatch(&self, notification: Notification) {
        let kind = notification.kind();
        let email = self.render(notification);
        match self.tx.try_send(email) {
            Ok(()) => debug!(kind, "notification queued"),
            Err(mpsc::error::TrySendError::Full(email)) => {
                warn!(kind, to = %email.to, "notification queue full, dropping email");
            }
            Err(mpsc::error::TrySendError::Closed(email)) => {
                warn!(kind, to = %email.to, "notification dispatcher stopped, dropping email");
            }
        }
    }

    fn render(&self, notification: Notification) -> OutboundEmail {
        match notification {
            Notification::ContactReceived(contact) => self.templates.contact_notification(&contact),
            Notification::ContactAcknowledged(contact) => {
                self.templates.contact_confirmation(&contact)
            }
            Notification::BookingConfirmed { to, booking } => {
                self.templates.booking_confirmation(&booking, &to)
            }
        }
    }

    /// Stops accepting work, delivers what is already queued, and waits for
    /// the worker to exit. Later calls return immediately.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let handle = self.worker.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "notification worker terminated abnormally");
            }
            info!("notification dispatcher stopped");
        }
    }
}

async fn run_worker(
    transport: Arc<dyn MailTransport>,
    mut rx: mpsc::Receiver<OutboundEmail>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            next = rx.recv() => match next {
                Some(email) => deliver(transport.as_ref(), &email).await,
                None => return,
            },
            _ = cancel.cancelled() => break,
        }
    }

    rx.close();
    let mut drained = 0usize;
    while let Some(email) = rx.recv().await {
        deliver(transport.as_ref(), &email).await;
        drained += 1;
    }
    debug!(drained, "notification queue drained");
}

async fn deliver(transport: &dyn MailTransport, email: &OutboundEmail) {
    match transport.send(email).await {
        Ok(true) => info!(to = %email.to, subject = %email.subject, "email sent"),
        Ok(false) => debug!(to = %email.to, "email skipped, transport not configured"),
        Err(e) => warn!(to = %email.to, error = %e, "failed to send email"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, CaptureMailer};

    fn contact() -> ContactDetails {
        ContactDetails {
            name: "Omar".into(),
            email: "omar@example.com".into(),
            phone: "050".into(),
            service: "seo".into(),
            message: "hi".into(),
            submitted_at: "2026-03-01T10:00:00.000000Z".into(),
        }
    }

    #[tokio::test]
    async fn queued_notifications_are_delivered_on_shutdown() {
        let mailer = Arc::new(CaptureMailer::default());
        let dispatcher = NotificationDispatcher::start(mailer.clone(), testing::templates(), 8);

        dispatcher.dispatch(Notification::ContactReceived(contact()));
        dispatcher.dispatch(Notification::ContactAcknowledged(contact()));
        dispatcher.shutdown().await;

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "admin@nowhere.digital");
        assert_eq!(sent[1].to, "omar@example.com");
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn transport_failure_is_logged_not_raised() {
        let mailer = Arc::new(CaptureMailer {
            fail: true,
            ..Default::default()
        });
        let dispatcher = NotificationDispatcher::start(mailer.clone(), testing::templates(), 8);

        dispatcher.dispatch(Notification::ContactReceived(contact()));
        dispatcher.shutdown().await;

        assert!(mailer.sent().is_empty());
        assert!(logs_contain("failed to send email"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn dispatch_after_shutdown_is_dropped() {
        let mailer = Arc::new(CaptureMailer::default());
        let dispatcher = NotificationDispatcher::start(mailer.clone(), testing::templates(), 8);
        dispatcher.shutdown().await;
        dispatcher.shutdown().await;

        dispatcher.dispatch(Notification::ContactReceived(contact()));
        assert!(mailer.sent().is_empty());
        assert!(logs_contain("dropping email"));
    }
}
