// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules. Each function takes a [`crate::Database`] and runs one
//! statement on the background connection thread.

pub mod counters;
pub mod documents;
mod sql;
