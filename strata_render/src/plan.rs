// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: an ordered sequence of draw items for one frame.

use alloc::vec::Vec;

use strata_core::layer::{Frame, LayerTree};
use strata_core::trace::Tracer;

use crate::planner;

/// What a plan's items refer to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlanMode {
    /// Walk groups and emit one item per visible cel.
    #[default]
    Content,
    /// Emit one item per requested layer without descending into it.
    ///
    /// Used when each layer is pre-rendered as an opaque block, e.g. one
    /// surface per top-level layer for thumbnails.
    Compose,
}

/// A single entry of a [`RenderPlan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanItem<L, C> {
    /// A cel to draw, produced in [`PlanMode::Content`].
    Cel {
        /// The content layer the cel belongs to.
        layer: L,
        /// The cel itself.
        cel: C,
    },
    /// A whole layer to draw as one unit, produced in [`PlanMode::Compose`].
    Layer(L),
}

impl<L: Copy, C> PlanItem<L, C> {
    /// Returns the layer this item originates from.
    #[must_use]
    pub fn layer(&self) -> L {
        match self {
            Self::Cel { layer, .. } | Self::Layer(layer) => *layer,
        }
    }

    /// Returns the cel to draw, or `None` for a composed layer.
    #[must_use]
    pub fn cel(&self) -> Option<&C> {
        match self {
            Self::Cel { cel, .. } => Some(cel),
            Self::Layer(_) => None,
        }
    }

    /// Returns `true` if the item stands for a whole layer.
    #[must_use]
    pub fn is_composed(&self) -> bool {
        matches!(self, Self::Layer(_))
    }
}

/// An ordered list of draw items for a single frame.
///
/// Items are in back-to-front order: the first item is the bottom of the
/// stack and is drawn first.
///
/// Each [`add_layer`](Self::add_layer) call resolves the given subtree from
/// scratch and appends the result; nothing is cached between calls.
#[derive(Clone, Debug)]
pub struct RenderPlan<L, C> {
    mode: PlanMode,
    items: Vec<PlanItem<L, C>>,
}

impl<L, C> Default for RenderPlan<L, C> {
    fn default() -> Self {
        Self::new(PlanMode::default())
    }
}

impl<L, C> RenderPlan<L, C> {
    /// Creates an empty plan in the given mode.
    #[must_use]
    pub fn new(mode: PlanMode) -> Self {
        Self {
            mode,
            items: Vec::new(),
        }
    }

    /// Creates an empty plan that emits one item per cel.
    #[must_use]
    pub fn content() -> Self {
        Self::new(PlanMode::Content)
    }

    /// Creates an empty plan that emits one item per requested layer.
    #[must_use]
    pub fn compose() -> Self {
        Self::new(PlanMode::Compose)
    }

    /// Returns the plan's mode.
    #[must_use]
    pub fn mode(&self) -> PlanMode {
        self.mode
    }

    /// Returns the items in drawing order.
    #[must_use]
    pub fn items(&self) -> &[PlanItem<L, C>] {
        &self.items
    }

    /// Returns an iterator over the items in drawing order.
    pub fn iter(&self) -> core::slice::Iter<'_, PlanItem<L, C>> {
        self.items.iter()
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the plan has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears the plan for reuse, keeping its mode.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Consumes the plan and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vec<PlanItem<L, C>> {
        self.items
    }
}

impl<L: Copy + Eq + core::fmt::Debug, C: Copy + core::fmt::Debug> RenderPlan<L, C> {
    /// Resolves `layer` at `frame` and appends its items.
    ///
    /// # Panics
    ///
    /// Panics if `frame` is outside the tree's timeline or if the tree
    /// contains a cycle below `layer`.
    pub fn add_layer<T>(&mut self, tree: &T, layer: L, frame: Frame)
    where
        T: LayerTree<Layer = L, Cel = C>,
    {
        self.add_layer_traced(tree, layer, frame, &mut Tracer::none());
    }

    /// Like [`add_layer`](Self::add_layer), reporting progress to `tracer`.
    pub fn add_layer_traced<T>(
        &mut self,
        tree: &T,
        layer: L,
        frame: Frame,
        tracer: &mut Tracer<'_>,
    ) where
        T: LayerTree<Layer = L, Cel = C>,
    {
        match self.mode {
            PlanMode::Content => planner::resolve(tree, layer, frame, &mut self.items, tracer),
            PlanMode::Compose => planner::compose(tree, layer, frame, &mut self.items, tracer),
        }
    }
}

impl<'a, L, C> IntoIterator for &'a RenderPlan<L, C> {
    type Item = &'a PlanItem<L, C>;
    type IntoIter = core::slice::Iter<'a, PlanItem<L, C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Plans the cels of the subtree rooted at `root` for `frame`.
///
/// # Panics
///
/// Panics if `frame` is outside the tree's timeline or if the tree contains a
/// cycle.
#[must_use]
pub fn plan<T: LayerTree>(
    tree: &T,
    root: T::Layer,
    frame: Frame,
) -> Vec<PlanItem<T::Layer, T::Cel>> {
    let mut plan = RenderPlan::content();
    plan.add_layer(tree, root, frame);
    plan.into_items()
}

/// Plans `layer` as a single opaque unit for `frame`.
///
/// Yields one item for a visible layer and none for a hidden one. Callers
/// that want one unit per child call this once per child.
///
/// # Panics
///
/// Panics if `frame` is outside the tree's timeline.
#[must_use]
pub fn plan_composed<T: LayerTree>(
    tree: &T,
    layer: T::Layer,
    frame: Frame,
) -> Vec<PlanItem<T::Layer, T::Cel>> {
    let mut plan = RenderPlan::compose();
    plan.add_layer(tree, layer, frame);
    plan.into_items()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Rect;
    use strata_core::layer::{Cel, ImageId, LayerKind, LayerStore};

    use super::*;

    fn cel(image: u32) -> Cel {
        Cel::new(ImageId(image), Rect::new(0.0, 0.0, 2.0, 2.0))
    }

    #[test]
    fn item_accessors() {
        let mut store = LayerStore::new(1);
        let layer = store.create_layer(LayerKind::Content);
        let drawn: PlanItem<_, Cel> = PlanItem::Cel {
            layer,
            cel: cel(7),
        };
        let composed: PlanItem<_, Cel> = PlanItem::Layer(layer);

        assert_eq!(drawn.layer(), layer);
        assert_eq!(drawn.cel().map(|c| c.image), Some(ImageId(7)));
        assert!(!drawn.is_composed());
        assert_eq!(composed.layer(), layer);
        assert!(composed.cel().is_none());
        assert!(composed.is_composed());
    }

    #[test]
    fn default_plan_is_empty_content_plan() {
        let plan: RenderPlan<u32, u32> = RenderPlan::default();
        assert_eq!(plan.mode(), PlanMode::Content);
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn successive_calls_append_blocks() {
        let mut store = LayerStore::new(1);
        let a = store.create_layer(LayerKind::Content);
        let b = store.create_layer(LayerKind::Content);
        store.set_cel(a, Frame::FIRST, Some(cel(1)));
        store.set_cel(b, Frame::FIRST, Some(cel(2)));

        let mut plan = RenderPlan::content();
        plan.add_layer(&store, b, Frame::FIRST);
        plan.add_layer(&store, a, Frame::FIRST);
        let layers: Vec<_> = plan.iter().map(PlanItem::layer).collect();
        assert_eq!(layers, vec![b, a]);

        plan.clear();
        assert!(plan.is_empty());
        assert_eq!(plan.mode(), PlanMode::Content);
    }

    #[test]
    fn free_functions_match_plan_builder() {
        let mut store = LayerStore::new(1);
        let root = store.create_layer(LayerKind::Group);
        let a = store.create_layer(LayerKind::Content);
        store.add_child(root, a);
        store.set_cel(a, Frame::FIRST, Some(cel(1)));

        let mut builder = RenderPlan::content();
        builder.add_layer(&store, root, Frame::FIRST);
        assert_eq!(plan(&store, root, Frame::FIRST), builder.items());

        let composed = plan_composed(&store, root, Frame::FIRST);
        assert_eq!(composed, vec![PlanItem::Layer(root)]);
    }

    #[test]
    fn borrowed_plan_iterates_in_order() {
        let mut store = LayerStore::new(1);
        let a = store.create_layer(LayerKind::Content);
        let b = store.create_layer(LayerKind::Content);
        let mut plan: RenderPlan<_, Cel> = RenderPlan::compose();
        plan.add_layer(&store, a, Frame::FIRST);
        plan.add_layer(&store, b, Frame::FIRST);

        let mut seen = Vec::new();
        for item in &plan {
            seen.push(item.layer());
        }
        assert_eq!(seen, vec![a, b]);
    }
}
