// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for render planning.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! planner calls as it resolves a tree. All method bodies default to no-ops,
//! so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) gates the per-candidate
//!   [`DisplacementEvent`] and the corresponding `TraceSink` method.

use crate::layer::Frame;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a planner starts resolving a subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanBeginEvent {
    /// Frame being planned.
    pub frame: Frame,
    /// Whether the plan composes whole layers instead of individual cels.
    pub compose: bool,
}

/// Emitted after one group level has been ordered.
///
/// Inner groups finish before their parents, so a sink sees these deepest
/// first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupResolvedEvent {
    /// Nesting depth of the group (the planned root's children are depth 0).
    pub depth: u32,
    /// Number of virtual slots (children, visible or not).
    pub slots: u32,
    /// Number of slots holding something drawable.
    pub candidates: u32,
    /// Number of candidates with a non-zero z-index.
    pub movers: u32,
    /// Number of plan items the level produced, nested blocks included.
    pub items: u32,
}

/// Emitted when a planner finishes a subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanEndEvent {
    /// Frame that was planned.
    pub frame: Frame,
    /// Whether the plan composes whole layers instead of individual cels.
    pub compose: bool,
    /// Number of items appended by this subtree.
    pub items: u32,
}

/// A single candidate's displacement walk.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplacementEvent {
    /// Nesting depth of the group the candidate belongs to.
    pub depth: u32,
    /// The candidate's natural slot.
    pub baseline: u32,
    /// The z-index as stored on the cel.
    pub z_index: i32,
    /// The slot the z-index asks for, clamped to the group.
    pub target: u32,
    /// How many neighbours the candidate traded places with.
    pub exchanges: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the planner.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when planning of a subtree begins.
    fn on_plan_begin(&mut self, e: &PlanBeginEvent) {
        _ = e;
    }

    /// Called when a group level has been ordered.
    fn on_group_resolved(&mut self, e: &GroupResolvedEvent) {
        _ = e;
    }

    /// Called when planning of a subtree ends.
    fn on_plan_end(&mut self, e: &PlanEndEvent) {
        _ = e;
    }

    /// Called for each displaced candidate (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_displacement(&mut self, e: &DisplacementEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PlanBeginEvent`].
    #[inline]
    pub fn plan_begin(&mut self, e: &PlanBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_plan_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`GroupResolvedEvent`].
    #[inline]
    pub fn group_resolved(&mut self, e: &GroupResolvedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_group_resolved(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PlanEndEvent`].
    #[inline]
    pub fn plan_end(&mut self, e: &PlanEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_plan_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DisplacementEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn displacement(&mut self, e: &DisplacementEvent) {
        if let Some(s) = &mut self.sink {
            s.on_displacement(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_group() -> GroupResolvedEvent {
        GroupResolvedEvent {
            depth: 1,
            slots: 4,
            candidates: 3,
            movers: 1,
            items: 3,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_plan_begin(&PlanBeginEvent {
            frame: Frame(2),
            compose: false,
        });
        sink.on_group_resolved(&sample_group());
        sink.on_plan_end(&PlanEndEvent {
            frame: Frame(2),
            compose: false,
            items: 3,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.plan_begin(&PlanBeginEvent {
            frame: Frame::FIRST,
            compose: true,
        });
        tracer.group_resolved(&sample_group());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            depths: Vec<u32>,
        }
        impl TraceSink for RecordingSink {
            fn on_group_resolved(&mut self, e: &GroupResolvedEvent) {
                self.depths.push(e.depth);
            }
        }

        let mut sink = RecordingSink { depths: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.group_resolved(&sample_group());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.depths, &[1]);
    }
}
