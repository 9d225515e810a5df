// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of resolved render plans.
//!
//! [`plan_to_json`] pairs each plan item with what the [`LayerStore`] knows
//! about its layer. [`export`] writes the same document pretty-printed.

use std::io::{self, Write};

use serde_json::{Value, json};

use strata_core::layer::{Cel, Frame, LayerId, LayerKind, LayerStore};
use strata_render::PlanItem;

/// Renders `items`, planned from `store` at `frame`, as a JSON document.
///
/// The document is an object with the frame index and an `items` array in
/// drawing order. Each entry names its layer; cel entries also carry the
/// image, bounds (`[x0, y0, x1, y1]`), opacity, and z-index.
#[must_use]
pub fn plan_to_json(store: &LayerStore, frame: Frame, items: &[PlanItem<LayerId, Cel>]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(order, item)| item_to_json(store, order, item))
        .collect();
    json!({
        "frame": frame.0,
        "items": items,
    })
}

/// Writes the [`plan_to_json`] document to `writer`, pretty-printed.
pub fn export(
    store: &LayerStore,
    frame: Frame,
    items: &[PlanItem<LayerId, Cel>],
    writer: &mut dyn Write,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &plan_to_json(store, frame, items))?;
    writeln!(writer)
}

fn item_to_json(store: &LayerStore, order: usize, item: &PlanItem<LayerId, Cel>) -> Value {
    let layer = item.layer();
    let mut entry = json!({
        "order": order,
        "layer": {
            "index": layer.index(),
            "generation": layer.generation(),
            "name": store.name(layer),
            "kind": kind_name(store.kind(layer)),
        },
    });
    if let (Some(cel), Value::Object(map)) = (item.cel(), &mut entry) {
        map.insert(
            "cel".into(),
            json!({
                "image": cel.image.0,
                "bounds": [cel.bounds.x0, cel.bounds.y0, cel.bounds.x1, cel.bounds.y1],
                "opacity": cel.opacity,
                "z_index": cel.z_index,
            }),
        );
    }
    entry
}

fn kind_name(kind: LayerKind) -> &'static str {
    match kind {
        LayerKind::Content => "content",
        LayerKind::Group => "group",
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use strata_core::layer::ImageId;
    use strata_render::{plan, plan_composed};

    use super::*;

    fn sample() -> (LayerStore, LayerId) {
        let mut store = LayerStore::new(1);
        let root = store.create_layer(LayerKind::Group);
        store.set_name(root, "root");
        for (image, name) in [(0, "paper"), (1, "ink")] {
            let layer = store.create_layer(LayerKind::Content);
            store.set_name(layer, name);
            store.add_child(root, layer);
            let cel = Cel::new(ImageId(image), Rect::new(0.0, 0.0, 8.0, 4.0));
            store.set_cel(layer, Frame::FIRST, Some(cel));
        }
        (store, root)
    }

    #[test]
    fn items_follow_plan_order() {
        let (mut store, root) = sample();
        let paper = store.children(root).next().expect("root has children");
        store.set_z_index(paper, Frame::FIRST, 1);

        let items = plan(&store, root, Frame::FIRST);
        let doc = plan_to_json(&store, Frame::FIRST, &items);

        assert_eq!(doc["frame"], 0);
        let entries = doc["items"].as_array().expect("items array");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["layer"]["name"], "ink");
        assert_eq!(entries[1]["layer"]["name"], "paper");
        assert_eq!(entries[1]["order"], 1);
        assert_eq!(entries[1]["cel"]["z_index"], 1);
        assert_eq!(entries[1]["cel"]["bounds"], json!([0.0, 0.0, 8.0, 4.0]));
        assert_eq!(entries[1]["cel"]["opacity"], 1.0);
    }

    #[test]
    fn composed_items_have_no_cel() {
        let (store, root) = sample();
        let items = plan_composed(&store, root, Frame::FIRST);
        let doc = plan_to_json(&store, Frame::FIRST, &items);

        let entry = &doc["items"][0];
        assert_eq!(entry["layer"]["kind"], "group");
        assert_eq!(entry["layer"]["name"], "root");
        assert!(entry.get("cel").is_none());
    }

    #[test]
    fn export_writes_parseable_json() {
        let (store, root) = sample();
        let items = plan(&store, root, Frame::FIRST);
        let mut out = Vec::new();
        export(&store, Frame::FIRST, &items, &mut out).expect("write to Vec");

        let text = String::from_utf8(out).expect("utf-8 output");
        assert!(text.ends_with('\n'));
        let parsed: Value = serde_json::from_str(&text).expect("valid JSON");
        assert_eq!(parsed, plan_to_json(&store, Frame::FIRST, &items));
    }
}
