// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage with allocation, topology, and cel management.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use understory_dirty::{Channel, CycleHandling, DirtyTracker};

use super::cel::Cel;
use super::id::{Frame, INVALID, LayerId};
use super::traverse::Children;
use super::tree::{LayerKind, LayerTree};

/// Channel carrying child-to-parent edges, used only to reject cycles.
const HIERARCHY: Channel = Channel::new(0);

/// Per-layer boolean flags.
///
/// Setting [`hidden`](Self::hidden) removes the layer and its entire subtree
/// from render plans. Cels can still be edited while hidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayerFlags {
    /// Whether the layer (and its subtree) is hidden.
    pub hidden: bool,
}

/// Struct-of-arrays storage for a document's layers and cels.
///
/// Layers are addressed by [`LayerId`] handles. Internally, each layer occupies
/// a slot in parallel arrays. Destroyed layers are recycled via a free list,
/// and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct LayerStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Layer properties --
    pub(crate) kind: Vec<LayerKind>,
    pub(crate) name: Vec<String>,
    pub(crate) flags: Vec<LayerFlags>,
    pub(crate) cels: Vec<BTreeMap<u32, Cel>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Timeline --
    pub(crate) frame_count: u32,

    // -- Hierarchy edges --
    pub(crate) edges: DirtyTracker<u32>,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new(1)
    }
}

impl LayerStore {
    /// Creates an empty layer store with `frame_count` frames.
    ///
    /// # Panics
    ///
    /// Panics if `frame_count` is zero.
    #[must_use]
    pub fn new(frame_count: u32) -> Self {
        assert!(frame_count > 0, "a document needs at least one frame");
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            kind: Vec::new(),
            name: Vec::new(),
            flags: Vec::new(),
            cels: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            frame_count,
            edges: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    // -- Allocation API --

    /// Creates a new layer of the given kind and returns its handle.
    ///
    /// The layer starts visible, unnamed, without cels, and with no parent.
    pub fn create_layer(&mut self, kind: LayerKind) -> LayerId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.parent[idx as usize] = INVALID;
            self.first_child[idx as usize] = INVALID;
            self.next_sibling[idx as usize] = INVALID;
            self.prev_sibling[idx as usize] = INVALID;
            self.kind[idx as usize] = kind;
            self.name[idx as usize].clear();
            self.flags[idx as usize] = LayerFlags::default();
            self.cels[idx as usize].clear();
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.kind.push(kind);
            self.name.push(String::new());
            self.flags.push(LayerFlags::default());
            self.cels.push(BTreeMap::new());
            self.generation.push(0);
            idx
        };

        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a layer, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the layer has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_layer(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy layer with children"
        );

        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        self.edges.remove_key(idx);
        self.cels[idx as usize].clear();

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Adds `child` on top of `parent`'s existing children.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `parent` is not a group, if
    /// `child` already has a parent, or if `child` is `parent` or one of its
    /// ancestors.
    pub fn add_child(&mut self, parent: LayerId, child: LayerId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        self.attach_dependency(c, p);
        self.push_last_child(p, c);
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the layer has no parent.
    pub fn remove_from_parent(&mut self, child: LayerId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "layer has no parent");

        let p = self.parent[c as usize];
        self.unlink_from_parent(c);
        self.edges.remove_dependency(c, p, HIERARCHY);
    }

    /// Moves `child` on top of `new_parent`'s children.
    ///
    /// If `child` already has a parent, it is removed first.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `new_parent` is not a group, or if
    /// the move would place `child` beneath itself.
    pub fn reparent(&mut self, child: LayerId, new_parent: LayerId) {
        self.validate(child);
        self.validate(new_parent);
        let c = child.idx;
        let p = new_parent.idx;

        let old_p = self.parent[c as usize];
        if old_p == p {
            // Already a child; only the stacking position changes.
            self.unlink_from_parent(c);
            self.push_last_child(p, c);
            return;
        }

        // Check the new edge before touching the old one so a rejected move
        // leaves the tree intact.
        self.attach_dependency(c, p);

        if old_p != INVALID {
            self.unlink_from_parent(c);
            self.edges.remove_dependency(c, old_p, HIERARCHY);
        }
        self.push_last_child(p, c);
    }

    /// Inserts `child` directly below `sibling` in the stacking order.
    ///
    /// `child` must not already have a parent. `sibling` must have a parent.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, `sibling`
    /// has no parent, or `child` is an ancestor of `sibling`.
    pub fn insert_before(&mut self, child: LayerId, sibling: LayerId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");
        self.attach_dependency(c, p);

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;
    }

    /// Returns the parent of a layer, if any.
    #[must_use]
    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(self.handle(p))
        }
    }

    /// Returns an iterator over the direct children of a layer, bottom first.
    #[must_use]
    pub fn children(&self, id: LayerId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the handles of root layers (those with no parent).
    #[must_use]
    pub fn roots(&self) -> Vec<LayerId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(self.handle(idx));
            }
        }
        roots
    }

    // -- Property API --

    /// Returns the kind of a layer.
    #[must_use]
    pub fn kind(&self, id: LayerId) -> LayerKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns the display name of a layer.
    #[must_use]
    pub fn name(&self, id: LayerId) -> &str {
        self.validate(id);
        &self.name[id.idx as usize]
    }

    /// Sets the display name of a layer.
    pub fn set_name(&mut self, id: LayerId, name: impl Into<String>) {
        self.validate(id);
        self.name[id.idx as usize] = name.into();
    }

    /// Returns the flags of a layer.
    #[must_use]
    pub fn flags(&self, id: LayerId) -> LayerFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Sets the flags of a layer.
    pub fn set_flags(&mut self, id: LayerId, flags: LayerFlags) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
    }

    /// Returns the layer's own visibility (ancestors are not consulted).
    #[must_use]
    pub fn is_visible(&self, id: LayerId) -> bool {
        !self.flags(id).hidden
    }

    /// Shows or hides a layer.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        let mut flags = self.flags(id);
        flags.hidden = !visible;
        self.set_flags(id, flags);
    }

    // -- Cel API --

    /// Returns the number of frames in the document.
    #[must_use]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Changes the number of frames, dropping cels past the new end.
    ///
    /// # Panics
    ///
    /// Panics if `frame_count` is zero.
    pub fn set_frame_count(&mut self, frame_count: u32) {
        assert!(frame_count > 0, "a document needs at least one frame");
        self.frame_count = frame_count;
        for cels in &mut self.cels {
            cels.retain(|&frame, _| frame < frame_count);
        }
    }

    /// Returns the cel a layer holds at `frame`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `frame` is out of range.
    #[must_use]
    pub fn cel(&self, id: LayerId, frame: Frame) -> Option<&Cel> {
        self.validate(id);
        self.validate_frame(frame);
        self.cels[id.idx as usize].get(&frame.0)
    }

    /// Returns the cels of a layer in frame order.
    #[must_use]
    pub fn cels(&self, id: LayerId) -> impl Iterator<Item = (Frame, &Cel)> + '_ {
        self.validate(id);
        self.cels[id.idx as usize]
            .iter()
            .map(|(&frame, cel)| (Frame(frame), cel))
    }

    /// Places (or with `None`, clears) the cel of a content layer at `frame`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale, `frame` is out of range, or the layer is
    /// a group.
    pub fn set_cel(&mut self, id: LayerId, frame: Frame, cel: Option<Cel>) {
        self.validate(id);
        self.validate_frame(frame);
        assert!(
            self.kind[id.idx as usize] == LayerKind::Content,
            "cels can only be placed on content layers"
        );
        let cels = &mut self.cels[id.idx as usize];
        match cel {
            Some(cel) => {
                cels.insert(frame.0, cel);
            }
            None => {
                cels.remove(&frame.0);
            }
        }
    }

    /// Sets the z-index of the cel at `frame`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale, `frame` is out of range, or the layer
    /// has no cel at `frame`.
    pub fn set_z_index(&mut self, id: LayerId, frame: Frame, z_index: i32) {
        self.validate(id);
        self.validate_frame(frame);
        let Some(cel) = self.cels[id.idx as usize].get_mut(&frame.0) else {
            panic!("{id:?} has no cel at frame {frame}");
        };
        cel.z_index = z_index;
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: LayerId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale LayerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Panics if `frame` is past the end of the timeline.
    fn validate_frame(&self, frame: Frame) {
        assert!(
            frame.0 < self.frame_count,
            "frame {frame} out of range (frame count {})",
            self.frame_count
        );
    }

    fn handle(&self, idx: u32) -> LayerId {
        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Records that `child` hangs below `parent`, rejecting cycles.
    fn attach_dependency(&mut self, child: u32, parent: u32) {
        assert!(
            self.kind[parent as usize] == LayerKind::Group,
            "only groups can have children"
        );
        assert!(
            child != parent,
            "attaching a layer to itself would create a cycle"
        );
        if let Err(err) = self.edges.add_dependency(child, parent, HIERARCHY) {
            panic!("cannot attach layer: {err}");
        }
    }

    /// Links `c` as the last (topmost) child of `p`.
    fn push_last_child(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Removes `idx` from its parent's child list without touching hierarchy edges.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

impl LayerTree for LayerStore {
    type Layer = LayerId;
    type Cel = Cel;

    fn kind(&self, layer: LayerId) -> LayerKind {
        Self::kind(self, layer)
    }

    fn is_visible(&self, layer: LayerId) -> bool {
        Self::is_visible(self, layer)
    }

    fn children(&self, layer: LayerId) -> impl Iterator<Item = LayerId> + '_ {
        Self::children(self, layer)
    }

    fn cel(&self, layer: LayerId, frame: Frame) -> Option<Cel> {
        Self::cel(self, layer, frame).copied()
    }

    fn z_index(&self, cel: Cel) -> i32 {
        cel.z_index
    }

    fn is_cel_visible(&self, cel: Cel) -> bool {
        cel.is_visible()
    }

    fn frame_count(&self) -> u32 {
        self.frame_count
    }
}
