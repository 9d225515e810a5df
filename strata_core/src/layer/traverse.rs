// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sibling iteration.

use super::id::{INVALID, LayerId};
use super::store::LayerStore;

/// An iterator over the direct children of a layer.
///
/// Forward iteration yields the bottom of the stack first (the order render
/// planning uses); `.rev()` yields the topmost child first, the order layer
/// panels list them in.
///
/// Created by [`LayerStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a LayerStore,
    front: u32,
    back: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a LayerStore, first: u32) -> Self {
        let mut back = first;
        if back != INVALID {
            while store.next_sibling[back as usize] != INVALID {
                back = store.next_sibling[back as usize];
            }
        }
        Self {
            store,
            front: first,
            back,
        }
    }

    fn handle(&self, idx: u32) -> LayerId {
        LayerId {
            idx,
            generation: self.store.generation[idx as usize],
        }
    }

    /// Marks the iterator finished once the cursors have met.
    fn take(&mut self, idx: u32) -> LayerId {
        if self.front == self.back {
            self.front = INVALID;
            self.back = INVALID;
        }
        self.handle(idx)
    }
}

impl Iterator for Children<'_> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        if self.front == INVALID {
            return None;
        }
        let idx = self.front;
        let id = self.take(idx);
        if self.front != INVALID {
            self.front = self.store.next_sibling[idx as usize];
        }
        Some(id)
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<LayerId> {
        if self.back == INVALID {
            return None;
        }
        let idx = self.back;
        let id = self.take(idx);
        if self.back != INVALID {
            self.back = self.store.prev_sibling[idx as usize];
        }
        Some(id)
    }
}
