// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caption measurement backed by Parley.
//!
//! [`ParleyTextMeasurer`] shapes caption text with the system fonts and reports the
//! resulting line metrics, so poster captions are placed using the same extents the
//! final renderer will see.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use core::cell::RefCell;

use mapposter_text::{FontFamily, TextMeasurer, TextMetrics, TextStyle};
use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{Alignment, AlignmentOptions, FontContext, FontWeight, LayoutContext};

/// A [`TextMeasurer`] that shapes text with Parley.
///
/// Shaping contexts are cached between calls, so reuse one measurer for a whole poster.
pub struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<LayoutContext<()>>,
    display_scale: f32,
}

impl core::fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("display_scale", &self.display_scale)
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a measurer using Parley's default system font collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(LayoutContext::new()),
            display_scale: 1.0,
        }
    }

    /// Shapes at `display_scale` times the nominal size.
    ///
    /// Hinting makes small sizes render slightly taller than their nominal size; shaping
    /// at the output resolution (e.g. `dpi / 72`) reproduces that. Results are always
    /// reported back in points.
    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f32) -> Self {
        self.display_scale = display_scale.max(0.0);
        self
    }

    fn font_stack(family: &FontFamily) -> FontStack<'_> {
        let family = match family {
            FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
            FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
            FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
            FontFamily::Named(name) => ParleyFontFamily::Named(Cow::Borrowed(name.as_ref())),
        };
        FontStack::from(family)
    }

    fn font_size_f32(font_size: f64) -> f32 {
        if !font_size.is_finite() || font_size <= 0.0 {
            return 0.0;
        }
        if font_size >= f64::from(f32::MAX) {
            f32::MAX
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Value is clamped to f32::MAX above"
            )]
            {
                font_size as f32
            }
        }
    }
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::EMPTY;
        }

        let scale = self.display_scale.max(1.0e-6);
        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder = layout_cx.ranged_builder(&mut font_cx, text, scale, true);
        builder.push_default(StyleProperty::FontSize(Self::font_size_f32(
            style.font_size,
        )));
        builder.push_default(StyleProperty::FontStack(Self::font_stack(
            &style.font_family,
        )));
        builder.push_default(StyleProperty::FontWeight(FontWeight::new(f32::from(
            style.font_weight.0,
        ))));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());

        let mut first_ascent = None;
        let mut total = 0.0_f64;
        let mut widest = 0.0_f64;
        let mut pending_leading = 0.0_f64;
        for line in layout.lines() {
            let m = line.metrics();
            first_ascent.get_or_insert(f64::from(m.ascent));
            total += pending_leading + f64::from(m.ascent) + f64::from(m.descent);
            pending_leading = f64::from(m.leading);
            widest = widest.max(f64::from(m.advance));
        }
        let Some(ascent) = first_ascent else {
            return TextMetrics::EMPTY;
        };

        let unscale = 1.0 / f64::from(scale);
        TextMetrics {
            advance_width: widest,
            ascent,
            descent: total - ascent,
        }
        .scaled(unscale)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn caption_has_positive_extent() {
        let m = ParleyTextMeasurer::new();
        let metrics = m.measure("Berlin", &TextStyle::new(36.0));
        assert!(metrics.advance_width > 0.0);
        assert!(metrics.ascent > 0.0);
        assert!(metrics.height() > 0.0);
    }

    #[test]
    fn measurement_is_repeatable() {
        let m = ParleyTextMeasurer::new().with_display_scale(300.0 / 72.0);
        let style = TextStyle::new(14.0);
        let a = m.measure("52.52° N, 13.40° E", &style);
        let b = m.measure("52.52° N, 13.40° E", &style);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_caption_measures_zero() {
        let m = ParleyTextMeasurer::new();
        assert_eq!(m.measure("", &TextStyle::new(12.0)), TextMetrics::EMPTY);
    }
}
