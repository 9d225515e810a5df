// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types and layer tree for render-order planning.
//!
//! `strata_core` provides the document model that render planners read: a
//! hierarchy of content layers and groups, per-frame cels with z-index hints,
//! and the diagnostics vocabulary planners report through. It is `no_std`
//! compatible (with `alloc`) and uses struct-of-arrays storage with index
//! handles.
//!
//! # Architecture
//!
//! ```text
//!   LayerStore (or any host tree)
//!        │ impl LayerTree
//!        ▼
//!   strata_render::RenderPlan::add_layer() ──► [PlanItem] ──► painter
//!                       │
//!                       ▼
//!                  trace::Tracer ──► TraceSink
//! ```
//!
//! **[`layer`]**: the [`LayerTree`](layer::LayerTree) capability trait,
//! the concrete [`LayerStore`](layer::LayerStore), [`Cel`](layer::Cel)
//! payloads, and identity types. Planners only read through `LayerTree`;
//! `LayerStore` is a ready-made tree for hosts that lack one. It rejects
//! cycles as they are attached, using the dependency graph from
//! `understory_dirty`.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and planner events,
//! with the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-candidate
//!   displacement events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod layer;
pub mod trace;
