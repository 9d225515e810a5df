// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The read-only view of a layer hierarchy that planners consume.

use core::fmt::Debug;

use super::id::Frame;

/// What a layer holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// A leaf holding at most one cel per frame.
    #[default]
    Content,
    /// An ordered container of child layers.
    Group,
}

/// Read access to a layer hierarchy.
///
/// This is the whole capability set a render planner needs: layer kind,
/// visibility, ordered children, and per-frame cel lookup. Planners depend on
/// this trait only, so they can run over [`LayerStore`](super::LayerStore) or
/// any other representation (including small synthetic trees in tests).
///
/// Implementations must not change while a planner is walking them.
pub trait LayerTree {
    /// Layer identity. Two handles are equal iff they name the same layer.
    type Layer: Copy + Eq + Debug;
    /// Per-frame content payload.
    type Cel: Copy + Debug;

    /// Returns whether `layer` is a content leaf or a group.
    fn kind(&self, layer: Self::Layer) -> LayerKind;

    /// Returns the layer's own visibility flag.
    fn is_visible(&self, layer: Self::Layer) -> bool;

    /// Returns the children of `layer` in stacking order, bottom first.
    ///
    /// Content layers have no children.
    fn children(&self, layer: Self::Layer) -> impl Iterator<Item = Self::Layer> + '_;

    /// Returns the cel `layer` holds at `frame`, if any.
    ///
    /// Groups normally return `None`; a group that does carry a cel has its
    /// z-index applied to the group as a whole.
    fn cel(&self, layer: Self::Layer, frame: Frame) -> Option<Self::Cel>;

    /// Returns the z-index hint of a cel.
    fn z_index(&self, cel: Self::Cel) -> i32;

    /// Returns whether a cel contributes anything when drawn.
    fn is_cel_visible(&self, cel: Self::Cel) -> bool {
        _ = cel;
        true
    }

    /// Returns the number of frames; valid frames are `0..frame_count()`.
    fn frame_count(&self) -> u32;
}
