// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree data model.
//!
//! A *layer* is a node in a document's layer stack. It is either:
//!
//! - a **content** layer ([`LayerKind::Content`]) holding at most one
//!   [`Cel`] per frame, or
//! - a **group** ([`LayerKind::Group`]) holding an ordered list of child
//!   layers, bottom of the stack first.
//!
//! Every layer has a visibility flag. Cels carry a z-index hint that lets a
//! single frame draw a layer's content above or below some of its siblings
//! without restructuring the tree.
//!
//! [`LayerTree`] is the read-only capability set that planners consume.
//! [`LayerStore`] is the concrete implementation: struct-of-arrays storage
//! with generational [`LayerId`] handles.

mod cel;
mod id;
mod store;
mod traverse;
mod tree;

pub use cel::Cel;
pub use id::{Frame, INVALID, ImageId, LayerId};
pub use store::{LayerFlags, LayerStore};
pub use traverse::Children;
pub use tree::{LayerKind, LayerTree};
