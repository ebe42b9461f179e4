// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving a [`RenderBackend`] through the measure-then-place sequence.

use kurbo::Rect;

use crate::{BackendProbe, CaptionBlockSpec, PosterLayout, RenderBackend, Result};

/// Measures, arranges and draws the captions for a map already drawn at `drawable`.
///
/// The backend must have completed a draw pass with the map in place. On success the
/// map region has been moved (block-centered mode), the caption lines placed, and a
/// final draw pass run. On error nothing visible has been added.
pub fn compose_captions<B: RenderBackend>(
    backend: &mut B,
    drawable: Rect,
    spec: &CaptionBlockSpec,
) -> Result<PosterLayout> {
    let layout = {
        let probe = BackendProbe::new(backend)?;
        PosterLayout::arrange(drawable, spec, &probe)?
    };

    if layout.map != drawable {
        backend.move_map_region(layout.map);
    }
    if !spec.title.text.is_empty() {
        backend.place_text(
            &spec.title.text,
            layout.title_anchor(),
            spec.title.font_size,
            spec.title.color,
        );
    }
    if let (Some(coords), Some(anchor)) = (&spec.coords, layout.coord_anchor()) {
        backend.place_text(&coords.text, anchor, coords.font_size, coords.color);
    }
    backend.draw();
    Ok(layout)
}
