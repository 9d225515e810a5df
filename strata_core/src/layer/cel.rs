// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cels: the per-frame content of a content layer.

use kurbo::Rect;

use super::id::ImageId;

/// The drawable payload a content layer holds for one frame.
///
/// A cel pairs an externally owned image with its placement on the canvas
/// and a z-index hint. The z-index asks the planner to draw the cel earlier
/// (negative) or later (positive) than its layer's natural stacking slot,
/// measured in sibling slots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cel {
    /// The pixels to draw.
    pub image: ImageId,
    /// Nominal bounds of the image on the canvas.
    pub bounds: Rect,
    /// Cel opacity (0.0–1.0).
    pub opacity: f32,
    /// Displacement hint relative to the layer's stacking slot.
    pub z_index: i32,
}

impl Cel {
    /// Creates a fully opaque cel with a zero z-index.
    #[must_use]
    pub const fn new(image: ImageId, bounds: Rect) -> Self {
        Self {
            image,
            bounds,
            opacity: 1.0,
            z_index: 0,
        }
    }

    /// Returns this cel with the given z-index.
    #[must_use]
    pub const fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Returns this cel with the given opacity.
    #[must_use]
    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Returns `true` if the cel contributes anything when drawn.
    ///
    /// A fully transparent cel orders exactly like a missing one.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let cel = Cel::new(ImageId(3), Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(cel.z_index, 0);
        assert_eq!(cel.opacity, 1.0);
        assert!(cel.is_visible());
    }

    #[test]
    fn transparent_cel_is_not_visible() {
        let cel = Cel::new(ImageId(0), Rect::ZERO).with_opacity(0.0);
        assert!(!cel.is_visible());
        assert!(cel.with_opacity(0.25).is_visible());
    }
}
