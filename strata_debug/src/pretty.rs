// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use strata_core::trace::{
    DisplacementEvent, GroupResolvedEvent, PlanBeginEvent, PlanEndEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn mode_name(compose: bool) -> &'static str {
    if compose { "compose" } else { "content" }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_plan_begin(&mut self, e: &PlanBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[plan:begin] frame={} mode={}",
            e.frame,
            mode_name(e.compose),
        );
    }

    fn on_group_resolved(&mut self, e: &GroupResolvedEvent) {
        let _ = writeln!(
            self.writer,
            "[group] depth={} slots={} candidates={} movers={} items={}",
            e.depth, e.slots, e.candidates, e.movers, e.items,
        );
    }

    fn on_plan_end(&mut self, e: &PlanEndEvent) {
        let _ = writeln!(
            self.writer,
            "[plan:end] frame={} mode={} items={}",
            e.frame,
            mode_name(e.compose),
            e.items,
        );
    }

    fn on_displacement(&mut self, e: &DisplacementEvent) {
        let _ = writeln!(
            self.writer,
            "[displace] depth={} slot={} z={:+} target={} passed={}",
            e.depth, e.baseline, e.z_index, e.target, e.exchanges,
        );
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use strata_core::layer::{Cel, Frame, ImageId, LayerKind, LayerStore};
    use strata_core::trace::Tracer;
    use strata_render::RenderPlan;

    use super::*;

    #[test]
    fn pretty_print_group() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_group_resolved(&GroupResolvedEvent {
            depth: 2,
            slots: 4,
            candidates: 3,
            movers: 1,
            items: 3,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert_eq!(
            output,
            "[group] depth=2 slots=4 candidates=3 movers=1 items=3\n"
        );
    }

    #[test]
    fn traced_plan_prints_every_event() {
        let mut store = LayerStore::new(2);
        let root = store.create_layer(LayerKind::Group);
        for image in 0..3 {
            let layer = store.create_layer(LayerKind::Content);
            store.add_child(root, layer);
            let z_index = if image == 0 { 2 } else { 0 };
            let cel = Cel::new(ImageId(image), Rect::new(0.0, 0.0, 1.0, 1.0)).with_z_index(z_index);
            store.set_cel(layer, Frame(1), Some(cel));
        }

        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        let mut tracer = Tracer::new(&mut sink);
        let mut plan = RenderPlan::content();
        plan.add_layer_traced(&store, root, Frame(1), &mut tracer);
        drop(tracer);
        assert_eq!(plan.len(), 3);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "[plan:begin] frame=1 mode=content",
                "[displace] depth=0 slot=0 z=+2 target=2 passed=2",
                "[group] depth=0 slots=3 candidates=3 movers=1 items=3",
                "[plan:end] frame=1 mode=content items=3",
            ]
        );
    }
}
