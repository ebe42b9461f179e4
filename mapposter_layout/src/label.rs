// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caption lines.

use alloc::string::String;

use peniko::Color;

use crate::{LatLon, format_coordinates};

/// One caption line below the map.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelSpec {
    /// Text, unshaped.
    pub text: String,
    /// Font size in points.
    pub font_size: f64,
    /// Fill color.
    pub color: Color,
}

impl LabelSpec {
    /// Creates a black caption at 12pt.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: 12.0,
            color: Color::BLACK,
        }
    }

    /// A caption showing `pos` as `"52.52° N, 13.40° E"`.
    pub fn coordinates(pos: &LatLon) -> Self {
        Self::new(format_coordinates(pos))
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }
}
