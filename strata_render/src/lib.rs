// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-order planning for strata layer trees.
//!
//! This crate turns a layer hierarchy (anything implementing
//! [`LayerTree`](strata_core::layer::LayerTree)) into a flat, back-to-front
//! list of things to draw for one frame. It defines:
//!
//! - [`PlanItem`]: a cel to draw, or (in compose mode) a whole layer
//! - [`PlanMode`]: whether plans descend into groups or treat layers as units
//! - [`RenderPlan`]: an ordered list of items, built by
//!   [`add_layer`](RenderPlan::add_layer)
//! - [`plan`] and [`plan_composed`]: one-shot conveniences
//!
//! Cels may carry a z-index that moves them a bounded number of sibling slots
//! up or down the stack. Displacement never leaves the sibling group, and
//! hidden or empty siblings still count as slots. See the `planner` module
//! docs for the exact ordering rules.
//!
//! ```rust
//! use kurbo::Rect;
//! use strata_core::layer::{Cel, Frame, ImageId, LayerKind, LayerStore};
//! use strata_render::{PlanItem, plan};
//!
//! let mut store = LayerStore::new(1);
//! let root = store.create_layer(LayerKind::Group);
//! let a = store.create_layer(LayerKind::Content);
//! let b = store.create_layer(LayerKind::Content);
//! store.add_child(root, a);
//! store.add_child(root, b);
//!
//! let bounds = Rect::new(0.0, 0.0, 16.0, 16.0);
//! store.set_cel(a, Frame(0), Some(Cel::new(ImageId(0), bounds).with_z_index(1)));
//! store.set_cel(b, Frame(0), Some(Cel::new(ImageId(1), bounds)));
//!
//! let order: Vec<_> = plan(&store, root, Frame(0)).iter().map(PlanItem::layer).collect();
//! assert_eq!(order, [b, a]);
//! ```

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod plan;
mod planner;

pub use plan::{PlanItem, PlanMode, RenderPlan, plan, plan_composed};
