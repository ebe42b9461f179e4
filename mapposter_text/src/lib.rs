// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement for poster captions.
//!
//! Caption placement on a poster depends on how tall a line of text actually renders,
//! which only a font engine (or a renderer that owns one) can answer. Layout code talks
//! to that engine through the small [`TextMeasurer`] trait defined here.
//!
//! All lengths are in typographic points (1/72 inch). Converting to page fractions or
//! device pixels is the caller's business, since only the caller knows the page size.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::sync::Arc;

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Measures a run of caption text.
///
/// Implementations must be deterministic: the same text and style always produce the
/// same metrics. Caption layout relies on this to be reproducible.
pub trait TextMeasurer {
    /// Measure `text` set in `style`.
    ///
    /// Lines are separated by `\n`; the returned extent covers all of them.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Box<T> {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// Font selection and size for a caption.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: f64,
    /// Preferred family.
    pub font_family: FontFamily,
    /// CSS-style weight.
    pub font_weight: FontWeight,
}

impl TextStyle {
    /// A sans-serif, normal weight style at `font_size` points.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Generic serif.
    Serif,
    /// Generic sans-serif.
    SansSerif,
    /// Generic monospace.
    Monospace,
    /// A named family such as `"DejaVu Sans"`.
    Named(Arc<str>),
}

impl FontFamily {
    /// The family name as used in CSS and SVG `font-family` attributes.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// `400`.
    pub const NORMAL: Self = Self(400);
    /// `700`.
    pub const BOLD: Self = Self(700);
}

/// Measured extent of a run of text, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Width of the widest line.
    pub advance_width: f64,
    /// Distance from the first baseline up to the top of the text.
    pub ascent: f64,
    /// Distance from the last baseline down to the bottom of the text, plus the
    /// height of any lines in between.
    pub descent: f64,
}

impl TextMetrics {
    /// Metrics of an empty string.
    pub const EMPTY: Self = Self {
        advance_width: 0.0,
        ascent: 0.0,
        descent: 0.0,
    };

    /// Full vertical extent, `ascent + descent`.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }

    /// Metrics scaled by `factor`, e.g. to convert points into device pixels.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            advance_width: self.advance_width * factor,
            ascent: self.ascent * factor,
            descent: self.descent * factor,
        }
    }
}

/// A font-free measurer.
///
/// Assumes glyphs average 0.6em wide, an ascent of 0.8em, a descent of 0.2em, and a
/// line pitch of 1.2em. Good enough for previews and tests; real posters should use a
/// shaping backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::EMPTY;
        }
        let em = style.font_size.max(0.0);
        let glyph_w = match style.font_family {
            FontFamily::Monospace => 0.6 * em,
            _ if style.font_weight >= FontWeight::BOLD => 0.65 * em,
            _ => 0.6 * em,
        };
        let mut lines = 0_u32;
        let mut widest = 0_usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        TextMetrics {
            advance_width: glyph_w * widest as f64,
            ascent: 0.8 * em,
            descent: 0.2 * em + 1.2 * em * f64::from(lines - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn heuristic_height_tracks_font_size() {
        let m = HeuristicTextMeasurer;
        let small = m.measure("Berlin", &TextStyle::new(10.0));
        let large = m.measure("Berlin", &TextStyle::new(20.0));
        assert!((small.height() - 10.0).abs() < 1e-12);
        assert!((large.height() - 2.0 * small.height()).abs() < 1e-12);
        assert!((small.advance_width - 36.0).abs() < 1e-12);
    }

    #[test]
    fn empty_text_has_no_extent() {
        let metrics = HeuristicTextMeasurer.measure("", &TextStyle::default());
        assert_eq!(metrics, TextMetrics::EMPTY);
    }

    #[test]
    fn extra_lines_extend_descent() {
        let m = HeuristicTextMeasurer;
        let one = m.measure("a", &TextStyle::new(10.0));
        let two = m.measure("a\nbcd", &TextStyle::new(10.0));
        assert!((two.height() - one.height() - 12.0).abs() < 1e-12);
        assert!((two.advance_width - 18.0).abs() < 1e-12);
    }

    #[test]
    fn scaling_converts_points_to_pixels() {
        let pt = HeuristicTextMeasurer.measure("x", &TextStyle::new(12.0));
        let px = pt.scaled(300.0 / POINTS_PER_INCH);
        assert!((px.height() - 50.0).abs() < 1e-9);
    }
}
