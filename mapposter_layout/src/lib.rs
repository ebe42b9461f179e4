// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page geometry and caption layout for map posters.
//!
//! A poster is a map centered on a sheet of paper with one or two caption lines below
//! it: a title, and optionally the coordinates of the map center. This crate computes
//! where everything goes:
//! - [`PageGeometry`] turns a paper format and margin into a normalized map rectangle.
//! - [`LocationResolver`] turns a place name or coordinate pair into a [`LatLon`].
//! - [`TextMetricsProbe`] reports how tall caption text renders.
//! - [`PosterLayout`] hangs the captions below the map and can center the whole block.
//!
//! Fetching map data, geocoding, and drawing are left to collaborators behind the
//! [`Geocoder`] and [`RenderBackend`] traits. [`compose_captions`] runs the
//! measure-then-place sequence against a backend.

#![no_std]

extern crate alloc;

mod backend;
mod compose;
mod error;
mod format;
mod label;
mod layout;
mod location;
mod page;
mod probe;
#[cfg(test)]
mod test_backend;

pub use backend::RenderBackend;
pub use compose::compose_captions;
pub use error::{Error, GeocodeError, LayoutElement, PageEdge, Result};
pub use format::format_coordinates;
pub use label::LabelSpec;
pub use layout::{
    CaptionBlockSpec, DEFAULT_BETWEEN_FACTOR, DEFAULT_PADDING_FACTOR, LayoutMode, PosterLayout,
};
pub use location::{Geocoder, LatLon, Location, LocationResolver};
pub use page::{MM_PER_INCH, PageGeometry, PageSpec, PaperFormat};
pub use probe::{BackendProbe, MeasurerProbe, TextExtent, TextMetricsProbe};
