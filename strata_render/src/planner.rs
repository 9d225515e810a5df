// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-order resolution.
//!
//! Each group level is resolved on its own, innermost groups first:
//!
//! 1. Every child gets a *virtual slot* equal to its stacking position. Hidden
//!    children, cel-less content layers, and groups that resolve to nothing
//!    keep their slot but leave it empty.
//! 2. Every filled slot becomes a candidate carrying its block of items (one
//!    cel, or a whole resolved group) and the z-index of its cel.
//! 3. Each candidate asks for a target slot: its baseline moved by its
//!    z-index, clamped to the group's slots.
//! 4. Candidates are put in order by `(target, bias, baseline)`, where `bias`
//!    is the z-index clamped to `±(len - 1)`. Empty slots drop out, so a
//!    request that only reaches an empty slot changes nothing visible, while
//!    one that reaches past it trades places with the next real sibling.
//! 5. The ordered blocks, read bottom to top, give the level's output. A
//!    group's block moves as a unit; its inner order is never touched again.
//!
//! The order is the fixed point of walking every displaced candidate one
//! slot at a time toward its target until nothing moves: a request pushing
//! harder in a direction wins a shared target, and equal requests keep
//! baseline order. Raising a candidate's z-index never moves it down.

use alloc::vec::Vec;

use strata_core::layer::{Frame, LayerKind, LayerTree};
#[cfg(feature = "trace-rich")]
use strata_core::trace::DisplacementEvent;
use strata_core::trace::{GroupResolvedEvent, PlanBeginEvent, PlanEndEvent, Tracer};

use crate::plan::PlanItem;

type Item<T> = PlanItem<<T as LayerTree>::Layer, <T as LayerTree>::Cel>;

/// Resolves the cels below `root` and appends them to `out`.
pub(crate) fn resolve<T: LayerTree>(
    tree: &T,
    root: T::Layer,
    frame: Frame,
    out: &mut Vec<Item<T>>,
    tracer: &mut Tracer<'_>,
) {
    validate_frame(tree, frame);
    tracer.plan_begin(&PlanBeginEvent {
        frame,
        compose: false,
    });
    let start = out.len();

    if tree.is_visible(root) {
        match tree.kind(root) {
            LayerKind::Content => {
                if let Some(cel) = visible_cel(tree, root, frame) {
                    out.push(PlanItem::Cel { layer: root, cel });
                }
            }
            LayerKind::Group => {
                let mut resolver = Resolver {
                    tree,
                    frame,
                    tracer: &mut *tracer,
                    path: Vec::new(),
                };
                out.extend(resolver.group(root, 0));
            }
        }
    }

    tracer.plan_end(&PlanEndEvent {
        frame,
        compose: false,
        items: count(out.len() - start),
    });
}

/// Appends `layer` itself as one opaque item, without visiting its children.
pub(crate) fn compose<T: LayerTree>(
    tree: &T,
    layer: T::Layer,
    frame: Frame,
    out: &mut Vec<Item<T>>,
    tracer: &mut Tracer<'_>,
) {
    validate_frame(tree, frame);
    tracer.plan_begin(&PlanBeginEvent {
        frame,
        compose: true,
    });
    let visible = tree.is_visible(layer);
    if visible {
        out.push(PlanItem::Layer(layer));
    }
    tracer.plan_end(&PlanEndEvent {
        frame,
        compose: true,
        items: u32::from(visible),
    });
}

/// Panics if `frame` is past the end of the tree's timeline.
fn validate_frame<T: LayerTree>(tree: &T, frame: Frame) {
    assert!(
        frame.0 < tree.frame_count(),
        "frame {frame} out of range (frame count {})",
        tree.frame_count()
    );
}

/// Returns the cel `layer` draws at `frame`, if it draws anything.
fn visible_cel<T: LayerTree>(tree: &T, layer: T::Layer, frame: Frame) -> Option<T::Cel> {
    tree.cel(layer, frame).filter(|&cel| tree.is_cel_visible(cel))
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Something drawable occupying one virtual slot.
struct Candidate<L, C> {
    /// Stacking position among the siblings.
    baseline: usize,
    /// The z-index as requested.
    z_index: i32,
    /// The slot the z-index asks for, within `0..len`.
    target: usize,
    /// The z-index clamped to `±(len - 1)`.
    bias: i32,
    /// Items drawn for this slot, in order.
    block: Vec<PlanItem<L, C>>,
}

impl<L, C> Candidate<L, C> {
    fn new(baseline: usize, len: usize, z_index: i32, block: Vec<PlanItem<L, C>>) -> Self {
        let reach = usize::try_from(z_index.unsigned_abs()).unwrap_or(usize::MAX);
        let target = if z_index < 0 {
            baseline.saturating_sub(reach)
        } else {
            baseline.saturating_add(reach).min(len - 1)
        };
        let span = i32::try_from(len - 1).unwrap_or(i32::MAX);
        Self {
            baseline,
            z_index,
            target,
            bias: z_index.clamp(-span, span),
            block,
        }
    }

    fn key(&self) -> (usize, i32, usize) {
        (self.target, self.bias, self.baseline)
    }
}

struct Resolver<'t, 's, 'a, T: LayerTree> {
    tree: &'t T,
    frame: Frame,
    tracer: &'s mut Tracer<'a>,
    /// Groups currently being resolved, outermost first.
    path: Vec<T::Layer>,
}

impl<T: LayerTree> Resolver<'_, '_, '_, T> {
    /// Resolves the children of `group` into one ordered block.
    fn group(&mut self, group: T::Layer, depth: u32) -> Vec<Item<T>> {
        self.path.push(group);

        let children: Vec<T::Layer> = self.tree.children(group).collect();
        let len = children.len();
        let mut order: Vec<Candidate<T::Layer, T::Cel>> = children
            .into_iter()
            .enumerate()
            .filter_map(|(baseline, child)| self.candidate(child, baseline, len, depth))
            .collect();
        let candidates = order.len();
        let movers = displace(&mut order, depth, self.tracer);

        let items: Vec<Item<T>> = order
            .into_iter()
            .flat_map(|candidate| candidate.block)
            .collect();

        self.tracer.group_resolved(&GroupResolvedEvent {
            depth,
            slots: count(len),
            candidates: count(candidates),
            movers: count(movers),
            items: count(items.len()),
        });
        self.path.pop();
        items
    }

    /// Builds the candidate for `child`, or `None` if its slot stays empty.
    fn candidate(
        &mut self,
        child: T::Layer,
        baseline: usize,
        len: usize,
        depth: u32,
    ) -> Option<Candidate<T::Layer, T::Cel>> {
        if !self.tree.is_visible(child) {
            return None;
        }
        let (z_index, block) = match self.tree.kind(child) {
            LayerKind::Content => {
                let cel = visible_cel(self.tree, child, self.frame)?;
                let mut block = Vec::with_capacity(1);
                block.push(PlanItem::Cel { layer: child, cel });
                (self.tree.z_index(cel), block)
            }
            LayerKind::Group => {
                assert!(
                    !self.path.contains(&child),
                    "layer tree contains a cycle through {child:?}"
                );
                let block = self.group(child, depth + 1);
                if block.is_empty() {
                    return None;
                }
                let z_index = self
                    .tree
                    .cel(child, self.frame)
                    .map_or(0, |cel| self.tree.z_index(cel));
                (z_index, block)
            }
        };
        Some(Candidate::new(baseline, len, z_index, block))
    }
}

/// Puts `order`, given in baseline order, into drawing order and returns how
/// many candidates asked to move.
fn displace<L, C>(order: &mut [Candidate<L, C>], depth: u32, tracer: &mut Tracer<'_>) -> usize {
    let movers = order.iter().filter(|c| c.z_index != 0).count();
    if movers == 0 {
        return 0;
    }
    order.sort_unstable_by_key(Candidate::key);

    #[cfg(feature = "trace-rich")]
    for (pos, walker) in order.iter().enumerate() {
        if walker.z_index == 0 {
            continue;
        }
        // Siblings that ended up on the other side of the walker.
        let exchanges = order
            .iter()
            .enumerate()
            .filter(|&(other, c)| (c.baseline < walker.baseline) != (other < pos))
            .count();
        tracer.displacement(&DisplacementEvent {
            depth,
            baseline: count(walker.baseline),
            z_index: walker.z_index,
            target: count(walker.target),
            exchanges: count(exchanges),
        });
    }
    #[cfg(not(feature = "trace-rich"))]
    {
        _ = (depth, tracer);
    }

    movers
}
