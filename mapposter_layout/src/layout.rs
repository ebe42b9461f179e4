// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measure/arrange layout for the map and its caption block.
//!
//! - **Measure**: ask a [`TextMetricsProbe`] how tall each caption renders.
//! - **Arrange**: hang the captions below the map rectangle, spaced by multiples of the
//!   title height, and optionally move the whole map+caption block so that it is
//!   vertically centered on the page.
//!
//! All coordinates are normalized, Y-up page coordinates. A caption's Y position is the
//! top edge of its line; the line extends downwards by its measured height.

use core::fmt;
use core::str::FromStr;

use alloc::format;
use kurbo::{Point, Rect, Vec2};

use crate::{Error, LabelSpec, LayoutElement, PageEdge, Result, TextMetricsProbe};

/// Default map→title gap, in title heights.
pub const DEFAULT_PADDING_FACTOR: f64 = 0.3;

/// Default title→coordinates gap, in title heights.
pub const DEFAULT_BETWEEN_FACTOR: f64 = 0.5;

/// What gets centered on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// The map stays where the margins put it; captions hang below it.
    #[default]
    MapCentered,
    /// Map and captions move together so the block is vertically centered.
    BlockCentered,
}

impl LayoutMode {
    /// Config name: `"map_centered"` or `"block_centered"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::MapCentered => "map_centered",
            Self::BlockCentered => "block_centered",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "map_centered" | "map" => Ok(Self::MapCentered),
            "block_centered" | "block" => Ok(Self::BlockCentered),
            other => Err(Error::invalid(format!(
                "layout mode must be 'map_centered' or 'block_centered', got {other:?}"
            ))),
        }
    }
}

/// The captions below the map and how to space them.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionBlockSpec {
    /// First caption line.
    pub title: LabelSpec,
    /// Optional coordinate line under the title.
    pub coords: Option<LabelSpec>,
    /// Centering mode.
    pub mode: LayoutMode,
    /// Map→title gap as a multiple of the title height.
    pub padding_factor: f64,
    /// Title→coordinates gap as a multiple of the title height.
    ///
    /// Both gaps scale with the title, never with the coordinate line, so spacing looks
    /// the same whatever size the coordinates are set in.
    pub between_factor: f64,
}

impl CaptionBlockSpec {
    /// A title-only block with default spacing.
    pub fn new(title: LabelSpec) -> Self {
        Self {
            title,
            coords: None,
            mode: LayoutMode::default(),
            padding_factor: DEFAULT_PADDING_FACTOR,
            between_factor: DEFAULT_BETWEEN_FACTOR,
        }
    }

    /// Adds a coordinate caption.
    #[must_use]
    pub fn with_coords(mut self, coords: LabelSpec) -> Self {
        self.coords = Some(coords);
        self
    }

    /// Drops the coordinate caption.
    #[must_use]
    pub fn without_coords(mut self) -> Self {
        self.coords = None;
        self
    }

    /// Sets the centering mode.
    #[must_use]
    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the map→title padding factor.
    #[must_use]
    pub fn with_padding_factor(mut self, factor: f64) -> Self {
        self.padding_factor = factor;
        self
    }

    /// Sets the title→coordinates factor.
    #[must_use]
    pub fn with_between_factor(mut self, factor: f64) -> Self {
        self.between_factor = factor;
        self
    }
}

/// Final positions for the map and its captions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PosterLayout {
    /// Map rectangle. Differs from the input rectangle only by a vertical shift.
    pub map: Rect,
    /// Top edge of the title line.
    pub title_y: f64,
    /// Top edge of the coordinate line, if there is one.
    pub coord_y: Option<f64>,
    /// Measured title height.
    pub title_height: f64,
    /// Measured coordinate line height (0 without coordinates).
    pub coord_height: f64,
    /// Vertical displacement applied to everything (0 in map-centered mode).
    pub shift: f64,
}

impl PosterLayout {
    /// Measures the captions in `spec` with `probe` and arranges them around `drawable`.
    pub fn arrange(
        drawable: Rect,
        spec: &CaptionBlockSpec,
        probe: &dyn TextMetricsProbe,
    ) -> Result<Self> {
        let title_height = probe
            .measure(&spec.title.text, spec.title.font_size)?
            .height_fraction();
        let coord_height = match &spec.coords {
            Some(coords) => Some(probe.measure(&coords.text, coords.font_size)?.height_fraction()),
            None => None,
        };
        Self::place(
            drawable,
            title_height,
            coord_height,
            spec.mode,
            spec.padding_factor,
            spec.between_factor,
        )
    }

    /// Arranges captions of already known heights.
    ///
    /// `coord_height` is `None` when there is no coordinate caption.
    pub fn place(
        drawable: Rect,
        title_height: f64,
        coord_height: Option<f64>,
        mode: LayoutMode,
        padding_factor: f64,
        between_factor: f64,
    ) -> Result<Self> {
        for (name, factor) in [("padding", padding_factor), ("between", between_factor)] {
            if !factor.is_finite() || factor < 0.0 {
                return Err(Error::invalid(format!(
                    "{name} factor must be a non-negative number, got {factor}"
                )));
            }
        }

        let heights = [("title", Some(title_height)), ("coordinate", coord_height)];
        for (name, height) in heights {
            if let Some(height) = height {
                if !height.is_finite() || height < 0.0 {
                    return Err(Error::invalid(format!(
                        "{name} height must be a non-negative page fraction, got {height}"
                    )));
                }
            }
        }

        let padding = title_height * padding_factor;
        let title_y = drawable.y0 - padding;
        let coord_y = coord_height.map(|_| title_y - title_height - title_height * between_factor);

        let mut layout = Self {
            map: drawable,
            title_y,
            coord_y,
            title_height,
            coord_height: coord_height.unwrap_or(0.0),
            shift: 0.0,
        };

        if mode == LayoutMode::BlockCentered {
            let center = 0.5 * (layout.block_top() + layout.block_bottom());
            layout = layout.shifted(0.5 - center);
        }

        tracing::debug!(
            %mode,
            title_y = layout.title_y,
            coord_y = ?layout.coord_y,
            map_bottom = layout.map.y0,
            shift = layout.shift,
            "arranged caption block"
        );

        layout.check_bounds()?;
        Ok(layout)
    }

    /// Top of the map+caption block (the map's top edge).
    #[must_use]
    pub fn block_top(&self) -> f64 {
        self.map.y1
    }

    /// Bottom of the lowest caption line.
    #[must_use]
    pub fn block_bottom(&self) -> f64 {
        match self.coord_y {
            Some(y) => y - self.coord_height,
            None => self.title_y - self.title_height,
        }
    }

    /// Where to anchor the title text (top center).
    #[must_use]
    pub fn title_anchor(&self) -> Point {
        Point::new(0.5, self.title_y)
    }

    /// Where to anchor the coordinate text (top center), if present.
    #[must_use]
    pub fn coord_anchor(&self) -> Option<Point> {
        self.coord_y.map(|y| Point::new(0.5, y))
    }

    fn shifted(self, delta: f64) -> Self {
        Self {
            map: self.map + Vec2::new(0.0, delta),
            title_y: self.title_y + delta,
            coord_y: self.coord_y.map(|y| y + delta),
            shift: self.shift + delta,
            ..self
        }
    }

    fn check_bounds(&self) -> Result<()> {
        let overflow = |element, edge| Err(Error::LayoutOverflow { element, edge });
        if self.map.y1 > 1.0 {
            return overflow(LayoutElement::Map, PageEdge::Top);
        }
        if self.map.y0 < 0.0 {
            return overflow(LayoutElement::Map, PageEdge::Bottom);
        }
        if self.title_y > 1.0 {
            return overflow(LayoutElement::Title, PageEdge::Top);
        }
        if self.title_y - self.title_height < 0.0 {
            return overflow(LayoutElement::Title, PageEdge::Bottom);
        }
        if let Some(y) = self.coord_y {
            if y - self.coord_height < 0.0 {
                return overflow(LayoutElement::Coordinates, PageEdge::Bottom);
            }
        }
        Ok(())
    }
}
