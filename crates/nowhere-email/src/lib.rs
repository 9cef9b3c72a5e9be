// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound email for the Nowhere agency API.
//!
//! [`SmtpMailer`] implements [`nowhere_core::MailTransport`] over lettre's
//! async SMTP transport; [`templates`] renders the HTML notifications.

pub mod templates;
pub mod transport;

pub use templates::{BookingDetails, ContactDetails, EmailTemplates};
pub use transport::{SmtpMailer, parse_mailbox};
