// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measuring caption heights as fractions of the page height.
//!
//! Caption placement needs the rendered height of each line. That number comes from a
//! font engine, usually the one inside the renderer, so it is hidden behind
//! [`TextMetricsProbe`] and the layout itself stays a pure function of its inputs.

use core::cell::RefCell;

use alloc::format;
use kurbo::Point;
use mapposter_text::{TextMeasurer, TextStyle};
use peniko::Color;

use crate::{Error, PageGeometry, RenderBackend, Result};

/// Where probe text is placed: left of and below the sheet, so it never shows.
const PROBE_ANCHOR: Point = Point::new(-1.0, -1.0);

/// Rendered height of a text run, as a fraction of the page height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    height_fraction: f64,
}

impl TextExtent {
    /// The extent of empty text.
    pub const ZERO: Self = Self {
        height_fraction: 0.0,
    };

    /// Wraps a measured fraction.
    ///
    /// Non-empty text must measure strictly between 0 and 1 of the page height.
    pub fn from_fraction(height_fraction: f64) -> Result<Self> {
        if !height_fraction.is_finite() || height_fraction <= 0.0 {
            return Err(Error::BackendPrecondition {
                reason: "text measured with a non-positive height",
            });
        }
        if height_fraction >= 1.0 {
            return Err(Error::invalid(format!(
                "text is {height_fraction:.2} page heights tall; reduce the font size"
            )));
        }
        Ok(Self { height_fraction })
    }

    /// The measured fraction.
    #[must_use]
    pub fn height_fraction(self) -> f64 {
        self.height_fraction
    }
}

/// Measures text height relative to the current page.
///
/// Identical inputs must give identical results for a fixed page size.
pub trait TextMetricsProbe {
    /// Height of `text` set at `font_size` points.
    fn measure(&self, text: &str, font_size: f64) -> Result<TextExtent>;
}

impl<P: TextMetricsProbe + ?Sized> TextMetricsProbe for &P {
    fn measure(&self, text: &str, font_size: f64) -> Result<TextExtent> {
        (**self).measure(text, font_size)
    }
}

fn check_font_size(font_size: f64) -> Result<()> {
    if font_size.is_finite() && font_size > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "font size must be a positive number of points, got {font_size}"
        )))
    }
}

/// A probe that asks a [`TextMeasurer`] directly, without a renderer.
#[derive(Clone, Debug)]
pub struct MeasurerProbe<M> {
    measurer: M,
    page_height_pt: f64,
}

impl<M: TextMeasurer> MeasurerProbe<M> {
    /// Measures against the page described by `geometry`.
    pub fn new(measurer: M, geometry: &PageGeometry) -> Self {
        Self {
            measurer,
            page_height_pt: geometry.page_height_pt(),
        }
    }
}

impl<M: TextMeasurer> TextMetricsProbe for MeasurerProbe<M> {
    fn measure(&self, text: &str, font_size: f64) -> Result<TextExtent> {
        check_font_size(font_size)?;
        if text.is_empty() {
            return Ok(TextExtent::ZERO);
        }
        let metrics = self.measurer.measure(text, &TextStyle::new(font_size));
        TextExtent::from_fraction(metrics.height() / self.page_height_pt)
    }
}

/// A probe that measures through the renderer that will draw the captions.
///
/// Each measurement places a throwaway text element off the page, reads its bounds, and
/// removes it again. The backend is borrowed for the probe's lifetime only.
pub struct BackendProbe<'a, B: RenderBackend> {
    backend: RefCell<&'a mut B>,
}

impl<B: RenderBackend> core::fmt::Debug for BackendProbe<'_, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BackendProbe").finish_non_exhaustive()
    }
}

impl<'a, B: RenderBackend> BackendProbe<'a, B> {
    /// Borrows `backend` for measuring.
    ///
    /// Fails with [`Error::BackendPrecondition`] if no draw pass has completed yet.
    pub fn new(backend: &'a mut B) -> Result<Self> {
        if !backend.is_drawn() {
            return Err(Error::BackendPrecondition {
                reason: "text metrics requested before the first draw pass",
            });
        }
        Ok(Self {
            backend: RefCell::new(backend),
        })
    }
}

impl<B: RenderBackend> TextMetricsProbe for BackendProbe<'_, B> {
    fn measure(&self, text: &str, font_size: f64) -> Result<TextExtent> {
        check_font_size(font_size)?;
        if text.is_empty() {
            return Ok(TextExtent::ZERO);
        }

        let mut backend = self.backend.borrow_mut();
        let handle = backend.place_text(text, PROBE_ANCHOR, font_size, Color::TRANSPARENT);
        let bounds = backend.text_bounds_px(&handle);
        backend.remove_text(handle);

        let bounds = bounds.ok_or(Error::BackendPrecondition {
            reason: "backend reported no bounds for probe text",
        })?;
        let extent = TextExtent::from_fraction(bounds.height / backend.page_height_px())?;
        tracing::trace!(
            text,
            font_size,
            height_px = bounds.height,
            fraction = extent.height_fraction(),
            "probed text extent"
        );
        Ok(extent)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use mapposter_text::HeuristicTextMeasurer;

    use super::*;
    use crate::PaperFormat;
    use crate::test_backend::RecordingBackend;

    #[test]
    fn probing_before_draw_is_rejected() {
        let mut backend = RecordingBackend::new(1000.0);
        let err = BackendProbe::new(&mut backend).unwrap_err();
        assert!(matches!(err, Error::BackendPrecondition { .. }));
    }

    #[test]
    fn backend_probe_leaves_no_trace() {
        let mut backend = RecordingBackend::new(1000.0);
        backend.draw();
        {
            let probe = BackendProbe::new(&mut backend).unwrap();
            let extent = probe.measure("Berlin", 12.0).unwrap();
            // The recording backend renders text 2px per point.
            assert!((extent.height_fraction() - 0.024).abs() < 1e-12);
        }
        assert!(backend.texts().is_empty());
        assert_eq!(backend.placed_count(), 1);
    }

    #[test]
    fn backend_probe_is_deterministic() {
        let mut backend = RecordingBackend::new(800.0);
        backend.draw();
        let probe = BackendProbe::new(&mut backend).unwrap();
        let a = probe.measure("52.52° N, 13.40° E", 9.5).unwrap();
        let b = probe.measure("52.52° N, 13.40° E", 9.5).unwrap();
        assert_eq!(a.height_fraction().to_bits(), b.height_fraction().to_bits());
    }

    #[test]
    fn empty_text_skips_the_backend() {
        let mut backend = RecordingBackend::new(1000.0);
        backend.draw();
        {
            let probe = BackendProbe::new(&mut backend).unwrap();
            assert_eq!(probe.measure("", 30.0).unwrap(), TextExtent::ZERO);
        }
        assert_eq!(backend.placed_count(), 0);
    }

    #[test]
    fn oversized_text_is_a_configuration_error() {
        let mut backend = RecordingBackend::new(100.0);
        backend.draw();
        let probe = BackendProbe::new(&mut backend).unwrap();
        let err = probe.measure("HUGE", 60.0).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
        assert!(probe.measure("x", 0.0).is_err());
    }

    #[test]
    fn measurer_probe_divides_by_page_height() {
        let geometry = PageGeometry::compute(PaperFormat::A4, 10.0).unwrap();
        let probe = MeasurerProbe::new(HeuristicTextMeasurer, &geometry);
        let extent = probe.measure("Berlin", 24.0).unwrap();
        let expected = 24.0 / geometry.page_height_pt();
        assert!((extent.height_fraction() - expected).abs() < 1e-12);
    }
}
