// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON export for strata diagnostics.
//!
//! This crate provides development tooling on top of the planner:
//!
//! - [`pretty::PrettyPrintSink`]: a [`TraceSink`](strata_core::trace::TraceSink)
//!   writing one human-readable line per planner event.
//! - [`json::plan_to_json`] and [`json::export`]: a JSON dump of a resolved
//!   plan against its [`LayerStore`](strata_core::layer::LayerStore), for
//!   diffing plans between frames or attaching to bug reports.

pub mod json;
pub mod pretty;
