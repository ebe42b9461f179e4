// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Poster configuration, loaded from JSON and overridden by command-line flags.

use std::path::Path;
use std::sync::Arc;

use mapposter_layout::{
    DEFAULT_BETWEEN_FACTOR, DEFAULT_PADDING_FACTOR, LayoutMode, PageSpec,
};
use mapposter_text::{FontFamily, FontWeight};
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::Deserialize;

use crate::CliError;

/// An extra gazetteer entry.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct PlaceEntry {
    pub(crate) name: String,
    pub(crate) lat: f64,
    pub(crate) lon: f64,
}

/// Everything needed to render one poster.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PosterConfig {
    /// Place name or `"lat, lon"`.
    pub(crate) location: Option<String>,
    pub(crate) paper: String,
    pub(crate) margin_mm: f64,
    pub(crate) dpi: f64,
    pub(crate) mode: String,
    pub(crate) padding_factor: f64,
    pub(crate) between_factor: f64,
    /// Overrides the title derived from the location.
    pub(crate) title: Option<String>,
    pub(crate) title_font_size: f64,
    pub(crate) coords_font_size: f64,
    pub(crate) show_coords: bool,
    /// `serif`, `sans-serif`, `monospace`, or a family name.
    pub(crate) font_family: String,
    /// CSS weight, 100 to 900.
    pub(crate) font_weight: u16,
    pub(crate) background: String,
    pub(crate) street_color: String,
    pub(crate) text_color: String,
    /// Street stroke width in points.
    pub(crate) street_width: f64,
    pub(crate) network_type: String,
    pub(crate) radius_m: f64,
    pub(crate) places: Vec<PlaceEntry>,
    pub(crate) out: String,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            location: None,
            paper: "a4".into(),
            margin_mm: 25.0,
            dpi: 300.0,
            mode: LayoutMode::MapCentered.name().into(),
            padding_factor: DEFAULT_PADDING_FACTOR,
            between_factor: DEFAULT_BETWEEN_FACTOR,
            title: None,
            title_font_size: 24.0,
            coords_font_size: 12.0,
            show_coords: true,
            font_family: "sans-serif".into(),
            font_weight: FontWeight::NORMAL.0,
            background: "white".into(),
            street_color: "black".into(),
            text_color: "black".into(),
            street_width: 0.5,
            network_type: "drive".into(),
            radius_m: 5000.0,
            places: Vec::new(),
            out: "poster.svg".into(),
        }
    }
}

impl PosterConfig {
    pub(crate) fn from_json(text: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(text)?)
    }

    pub(crate) fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub(crate) fn page_spec(&self) -> Result<PageSpec, CliError> {
        Ok(PageSpec::parse(&self.paper, self.margin_mm)?)
    }

    pub(crate) fn layout_mode(&self) -> Result<LayoutMode, CliError> {
        Ok(self.mode.parse()?)
    }

    pub(crate) fn font_family(&self) -> FontFamily {
        match self.font_family.trim() {
            "serif" => FontFamily::Serif,
            "sans-serif" | "" => FontFamily::SansSerif,
            "monospace" => FontFamily::Monospace,
            name => FontFamily::Named(Arc::from(name)),
        }
    }

    pub(crate) fn font_weight(&self) -> Result<FontWeight, CliError> {
        if (100..=900).contains(&self.font_weight) {
            Ok(FontWeight(self.font_weight))
        } else {
            Err(mapposter_layout::Error::InvalidConfiguration {
                reason: format!("font weight must be within 100..=900, got {}", self.font_weight),
            }
            .into())
        }
    }
}

/// Parses a CSS color such as `"white"` or `"#1a1a1a"`.
pub(crate) fn color(value: &str) -> Result<Color, CliError> {
    parse_color(value.trim())
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|err| CliError::Color {
            value: value.into(),
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use mapposter_layout::PaperFormat;

    use super::*;

    #[test]
    fn empty_json_is_the_default_config() {
        let config = PosterConfig::from_json("{}").unwrap();
        assert_eq!(config, PosterConfig::default());
        assert_eq!(config.page_spec().unwrap(), PageSpec::new(PaperFormat::A4, 25.0));
        assert_eq!(config.layout_mode().unwrap(), LayoutMode::MapCentered);
    }

    #[test]
    fn json_overrides_fields() {
        let config = PosterConfig::from_json(
            r#"{
                "location": "Lisbon",
                "paper": "A3",
                "margin_mm": 20,
                "mode": "block_centered",
                "show_coords": false,
                "places": [{ "name": "Lisbon, Portugal", "lat": 38.72, "lon": -9.14 }]
            }"#,
        )
        .unwrap();
        assert_eq!(config.location.as_deref(), Some("Lisbon"));
        assert_eq!(config.page_spec().unwrap(), PageSpec::new(PaperFormat::A3, 20.0));
        assert_eq!(config.layout_mode().unwrap(), LayoutMode::BlockCentered);
        assert!(!config.show_coords);
        assert_eq!(config.places.len(), 1);
        assert_eq!(config.dpi, 300.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = PosterConfig::from_json(r#"{ "papr": "a4" }"#).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn bad_paper_surfaces_as_layout_error() {
        let config = PosterConfig {
            paper: "a5".into(),
            ..PosterConfig::default()
        };
        assert!(matches!(
            config.page_spec().unwrap_err(),
            CliError::Layout(mapposter_layout::Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn fonts_map_to_families_and_weights() {
        let config = PosterConfig::from_json(
            r#"{ "font_family": " DejaVu Serif ", "font_weight": 700 }"#,
        )
        .unwrap();
        assert_eq!(config.font_family(), FontFamily::Named("DejaVu Serif".into()));
        assert_eq!(config.font_weight().unwrap(), FontWeight::BOLD);

        let defaults = PosterConfig::default();
        assert_eq!(defaults.font_family(), FontFamily::SansSerif);
        assert_eq!(defaults.font_weight().unwrap(), FontWeight::NORMAL);

        let heavy = PosterConfig {
            font_weight: 1000,
            ..PosterConfig::default()
        };
        assert!(matches!(heavy.font_weight(), Err(CliError::Layout(_))));
    }

    #[test]
    fn colors_parse_css_names_and_hex() {
        assert_eq!(color("white").unwrap().to_rgba8().r, 255);
        let c = color("#102030").unwrap().to_rgba8();
        assert_eq!((c.r, c.g, c.b, c.a), (0x10, 0x20, 0x30, 0xff));
        assert!(matches!(color("no-such-color"), Err(CliError::Color { .. })));
    }
}
