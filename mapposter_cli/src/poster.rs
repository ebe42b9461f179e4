// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The poster pipeline: resolve, fetch, draw the map, then measure and place captions.

use mapposter_layout::{
    CaptionBlockSpec, LabelSpec, LatLon, Location, LocationResolver, PosterLayout,
    compose_captions,
};
use mapposter_text::TextMeasurer;

use crate::CliError;
use crate::config::{PosterConfig, color};
use crate::gazetteer::Gazetteer;
use crate::streets::{NetworkType, StreetSource, SyntheticStreets};
use crate::svg::{StreetStyle, SvgBackend};

/// A rendered page.
#[derive(Debug)]
pub(crate) struct Poster {
    pub(crate) svg: String,
    pub(crate) layout: PosterLayout,
    pub(crate) center: LatLon,
}

fn measurer(dpi: f64) -> Box<dyn TextMeasurer> {
    #[cfg(feature = "parley")]
    {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Display scale only needs f32 precision"
        )]
        let scale = (dpi / mapposter_text::POINTS_PER_INCH) as f32;
        Box::new(mapposter_text_parley::ParleyTextMeasurer::new().with_display_scale(scale))
    }

    #[cfg(not(feature = "parley"))]
    {
        let _ = dpi;
        Box::new(mapposter_text::HeuristicTextMeasurer)
    }
}

/// Title derived from the location: the place name up to its first comma, or the
/// formatted coordinates.
fn default_title(location: &Location, center: &LatLon) -> String {
    match location {
        Location::Place(name) => name.split(',').next().unwrap_or(name).trim().to_string(),
        Location::Coordinates(_) => center.to_string(),
    }
}

pub(crate) fn render_poster(config: &PosterConfig) -> Result<Poster, CliError> {
    let input = config
        .location
        .as_deref()
        .ok_or(CliError::Usage(crate::usage()))?;
    let location = Location::parse(input)?;
    let geometry = config.page_spec()?.geometry()?;
    let mode = config.layout_mode()?;
    if !config.dpi.is_finite() || config.dpi <= 0.0 {
        return Err(mapposter_layout::Error::InvalidConfiguration {
            reason: format!("dpi must be positive, got {}", config.dpi),
        }
        .into());
    }

    let mut gazetteer = Gazetteer::with_defaults();
    for place in &config.places {
        gazetteer.insert(&place.name, LatLon::new(place.lat, place.lon)?);
    }
    tracing::debug!(places = gazetteer.len(), "gazetteer ready");
    let center = LocationResolver::new(&gazetteer).resolve(&location)?;

    let network: NetworkType = config.network_type.parse()?;
    let graph = SyntheticStreets.fetch(center, network, config.radius_m)?;
    tracing::info!(
        center = %graph.center,
        format = %geometry.format,
        width_in = geometry.page_width_in,
        height_in = geometry.page_height_in,
        "drawing map"
    );

    let mut backend = SvgBackend::new(&geometry, config.dpi, measurer(config.dpi))
        .with_font(config.font_family(), config.font_weight()?)
        .with_background(color(&config.background)?);
    backend.draw_map(
        geometry.drawable,
        &graph,
        StreetStyle {
            color: color(&config.street_color)?,
            width_pt: config.street_width,
        },
    );
    mapposter_layout::RenderBackend::draw(&mut backend);

    let text_color = color(&config.text_color)?;
    let title = config
        .title
        .clone()
        .unwrap_or_else(|| default_title(&location, &center));
    let mut spec = CaptionBlockSpec::new(
        LabelSpec::new(title)
            .with_font_size(config.title_font_size)
            .with_color(text_color),
    )
    .with_mode(mode)
    .with_padding_factor(config.padding_factor)
    .with_between_factor(config.between_factor);
    if config.show_coords {
        spec = spec.with_coords(
            LabelSpec::coordinates(&center)
                .with_font_size(config.coords_font_size)
                .with_color(text_color),
        );
    }

    let layout = compose_captions(&mut backend, geometry.drawable, &spec)?;
    tracing::info!(
        %mode,
        title_y = layout.title_y,
        shift = layout.shift,
        "placed captions"
    );

    Ok(Poster {
        svg: backend.to_svg_string(),
        layout,
        center,
    })
}
