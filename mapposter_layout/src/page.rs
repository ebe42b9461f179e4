// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Physical page sizes and the margin-bounded map rectangle.
//!
//! Page coordinates are normalized: `(0, 0)` is the bottom-left corner of the sheet and
//! `(1, 1)` the top-right, with Y pointing up. A margin given in millimeters turns into a
//! different fraction on each axis because the sheet is not square; computing the two
//! fractions independently is what keeps the margin visually equal on all four sides.

use core::fmt;
use core::str::FromStr;

use alloc::format;
use kurbo::{Rect, Size};
use mapposter_text::POINTS_PER_INCH;

use crate::{Error, Result};

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Supported ISO 216 paper sizes, portrait orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaperFormat {
    /// 297 × 420 mm.
    A3,
    /// 210 × 297 mm.
    #[default]
    A4,
}

impl PaperFormat {
    /// Every supported format.
    pub const ALL: [Self; 2] = [Self::A3, Self::A4];

    /// `(width, height)` in millimeters.
    #[must_use]
    pub fn size_mm(self) -> (f64, f64) {
        match self {
            Self::A3 => (297.0, 420.0),
            Self::A4 => (210.0, 297.0),
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::A3 => "a3",
            Self::A4 => "a4",
        }
    }
}

impl fmt::Display for PaperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaperFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid(format!("paper format must be 'a3' or 'a4', got {s:?}")))
    }
}

/// A paper format plus a uniform margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSpec {
    /// Sheet size.
    pub format: PaperFormat,
    /// Margin on every side, in millimeters.
    pub margin_mm: f64,
}

impl PageSpec {
    /// Creates a page spec. Validation happens in [`PageSpec::geometry`].
    #[must_use]
    pub fn new(format: PaperFormat, margin_mm: f64) -> Self {
        Self { format, margin_mm }
    }

    /// Parses the format name and pairs it with `margin_mm`.
    pub fn parse(format: &str, margin_mm: f64) -> Result<Self> {
        Ok(Self::new(format.parse()?, margin_mm))
    }

    /// See [`PageGeometry::compute`].
    pub fn geometry(&self) -> Result<PageGeometry> {
        PageGeometry::compute(self.format, self.margin_mm)
    }
}

/// Physical page size and the normalized rectangle the map is drawn into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    /// Sheet size this geometry was computed for.
    pub format: PaperFormat,
    /// Sheet width in inches.
    pub page_width_in: f64,
    /// Sheet height in inches.
    pub page_height_in: f64,
    /// Margin-bounded map rectangle in normalized, Y-up page coordinates
    /// (`x0` left, `y0` bottom, `x1` right, `y1` top).
    pub drawable: Rect,
}

impl PageGeometry {
    /// Computes the page size and the centered drawable rectangle.
    ///
    /// Fails with [`Error::InvalidConfiguration`] unless `margin_mm` is finite, positive
    /// and strictly less than half of the shorter sheet side.
    pub fn compute(format: PaperFormat, margin_mm: f64) -> Result<Self> {
        let (width_mm, height_mm) = format.size_mm();
        if !margin_mm.is_finite() || margin_mm <= 0.0 {
            return Err(Error::invalid(format!(
                "margin must be a positive number of millimeters, got {margin_mm}"
            )));
        }
        let limit_mm = 0.5 * width_mm.min(height_mm);
        if margin_mm >= limit_mm {
            return Err(Error::invalid(format!(
                "a {margin_mm} mm margin leaves no drawable area on {format} \
                 (must be below {limit_mm} mm)"
            )));
        }

        let page_width_in = width_mm / MM_PER_INCH;
        let page_height_in = height_mm / MM_PER_INCH;
        let margin_in = margin_mm / MM_PER_INCH;

        let margin_x = margin_in / page_width_in;
        let margin_y = margin_in / page_height_in;
        let drawable = Rect::new(margin_x, margin_y, 1.0 - margin_x, 1.0 - margin_y);

        tracing::debug!(
            %format,
            margin_mm,
            margin_x,
            margin_y,
            "computed page geometry"
        );

        Ok(Self {
            format,
            page_width_in,
            page_height_in,
            drawable,
        })
    }

    /// The drawable rectangle as `[left, bottom, width, height]`.
    #[must_use]
    pub fn axes_rect(&self) -> [f64; 4] {
        let r = self.drawable;
        [r.x0, r.y0, r.width(), r.height()]
    }

    /// `(horizontal, vertical)` margin as fractions of the page width and height.
    #[must_use]
    pub fn margin_fractions(&self) -> (f64, f64) {
        (self.drawable.x0, self.drawable.y0)
    }

    /// Sheet height in points.
    #[must_use]
    pub fn page_height_pt(&self) -> f64 {
        self.page_height_in * POINTS_PER_INCH
    }

    /// Sheet size in device pixels at `dpi`.
    #[must_use]
    pub fn page_size_px(&self, dpi: f64) -> Size {
        Size::new(self.page_width_in * dpi, self.page_height_in * dpi)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn drawable_rect_is_symmetric_for_every_format() {
        for format in PaperFormat::ALL {
            for margin_mm in [1.0, 5.0, 10.0, 25.0, 60.0, 100.0] {
                let g = PageGeometry::compute(format, margin_mm).unwrap();
                let [left, bottom, width, height] = g.axes_rect();
                let right = 1.0 - g.drawable.x1;
                let top = 1.0 - g.drawable.y1;
                assert!((left - right).abs() < EPS, "{format} {margin_mm}");
                assert!((bottom - top).abs() < EPS, "{format} {margin_mm}");
                assert!((width - (1.0 - 2.0 * left)).abs() < EPS, "{format} {margin_mm}");
                assert!((height - (1.0 - 2.0 * bottom)).abs() < EPS, "{format} {margin_mm}");
                for v in [left, bottom, width, height] {
                    assert!(v > 0.0 && v < 1.0, "{format} {margin_mm}: {v}");
                }
            }
        }
    }

    #[test]
    fn margin_fraction_is_per_axis() {
        let g = PageGeometry::compute(PaperFormat::A4, 10.0).unwrap();
        let (mx, my) = g.margin_fractions();
        assert!((mx - 10.0 / 210.0).abs() < EPS);
        assert!((my - 10.0 / 297.0).abs() < EPS);
        assert!(mx > my);
        assert!((g.page_width_in - 210.0 / 25.4).abs() < EPS);
        assert!((g.page_height_in - 297.0 / 25.4).abs() < EPS);
    }

    #[test]
    fn doubling_margin_doubles_fraction() {
        let a = PageGeometry::compute(PaperFormat::A3, 12.5).unwrap();
        let b = PageGeometry::compute(PaperFormat::A3, 25.0).unwrap();
        assert!((b.drawable.x0 - 2.0 * a.drawable.x0).abs() < EPS);
        assert!((b.drawable.y0 - 2.0 * a.drawable.y0).abs() < EPS);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = PageSpec::parse("a5", 10.0).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
        assert_eq!(" A3 ".parse::<PaperFormat>().unwrap(), PaperFormat::A3);
    }

    #[test]
    fn degenerate_margins_are_rejected() {
        for margin_mm in [0.0, -1.0, f64::NAN, f64::INFINITY, 105.0, 200.0] {
            let err = PageGeometry::compute(PaperFormat::A4, margin_mm).unwrap_err();
            assert!(
                matches!(err, Error::InvalidConfiguration { .. }),
                "margin {margin_mm} should be rejected"
            );
        }
        assert!(PageGeometry::compute(PaperFormat::A4, 104.9).is_ok());
    }

    #[test]
    fn pixel_size_follows_dpi() {
        let g = PageSpec::new(PaperFormat::A4, 10.0).geometry().unwrap();
        let px = g.page_size_px(300.0);
        assert!((px.width - 210.0 / 25.4 * 300.0).abs() < 1e-9);
        assert!((g.page_height_pt() - 297.0 / 25.4 * 72.0).abs() < 1e-9);
    }
}
