// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Business logic for the Nowhere agency API.
//!
//! Every write follows the same sequence: validate, construct, persist,
//! bump the daily counter, notify, respond. Only validation, not-found and
//! persistence failures reach the caller; counter and notification failures
//! are logged and swallowed. Language-model failures degrade to fixed
//! fallback text.
//!
//! All collaborators (store, provider, mail transport) are constructed by the
//! binary and injected through [`Agency::new`].

pub mod assistant;
pub mod counter;
pub mod dispatcher;
pub mod entities;
pub mod orchestrators;
pub mod pagination;
pub mod prompts;

#[cfg(test)]
mod testing;

pub use assistant::{Assistant, Completion, StrategyBrief};
pub use counter::{CounterName, DailyCounter, DailyCounts};
pub use dispatcher::{Notification, NotificationDispatcher};
pub use orchestrators::Agency;
pub use pagination::{PageBounds, PageParams};
