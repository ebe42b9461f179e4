// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering backend seen from the layout engine.
//!
//! The engine never draws anything itself. It needs a backend that can finish a draw
//! pass, place and remove text, report text bounds in device pixels, and move the map
//! region once its final position is known.

use kurbo::{Point, Rect, Size};
use peniko::Color;

/// Drawing surface for one poster page.
///
/// Positions are normalized, Y-up page coordinates. Text is anchored at the top edge of
/// its bounding box and centered horizontally on the anchor's `x`.
pub trait RenderBackend {
    /// Handle to a placed text element.
    type TextHandle;

    /// Page height in device pixels.
    fn page_height_px(&self) -> f64;

    /// Whether a draw pass has completed, so that font and device metrics are valid.
    fn is_drawn(&self) -> bool;

    /// Runs a draw pass, finalizing layout metrics for everything placed so far.
    fn draw(&mut self);

    /// Places `text` at `anchor`.
    fn place_text(
        &mut self,
        text: &str,
        anchor: Point,
        font_size: f64,
        color: Color,
    ) -> Self::TextHandle;

    /// Rendered bounds of a placed element, in device pixels.
    ///
    /// `None` if the backend cannot measure yet or the handle is stale.
    fn text_bounds_px(&self, handle: &Self::TextHandle) -> Option<Size>;

    /// Removes a placed element.
    fn remove_text(&mut self, handle: Self::TextHandle);

    /// Moves the map region to `rect`.
    fn move_map_region(&mut self, rect: Rect);
}
