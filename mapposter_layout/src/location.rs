// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning user input into a latitude/longitude pair.
//!
//! The pair resolved here is used both to center the map fetch and to print the
//! coordinate caption, so it is resolved once and then passed around by value.

use alloc::format;
use alloc::string::String;

use crate::{Error, GeocodeError, Result};

/// A validated WGS84 position in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon {
    lat: f64,
    lon: f64,
}

impl LatLon {
    /// Validates and builds a position.
    ///
    /// Latitude must lie in `[-90, 90]` and longitude in `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::invalid(format!(
                "latitude must be within [-90, 90], got {lat}"
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(Error::invalid(format!(
                "longitude must be within [-180, 180], got {lon}"
            )));
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees, positive north.
    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees, positive east.
    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Where the poster is centered, as given by the user.
#[derive(Clone, Debug, PartialEq)]
pub enum Location {
    /// A free-form place name such as `"Berlin, Germany"`.
    Place(String),
    /// Coordinates that need no lookup.
    Coordinates(LatLon),
}

impl Location {
    /// A place name.
    pub fn place(name: impl Into<String>) -> Self {
        Self::Place(name.into())
    }

    /// A `[lat, lon]` pair from an untyped source such as a config array.
    pub fn from_slice(pair: &[f64]) -> Result<Self> {
        match *pair {
            [lat, lon] => Ok(Self::Coordinates(LatLon::new(lat, lon)?)),
            _ => Err(Error::invalid(format!(
                "coordinates need exactly two values (lat, lon), got {}",
                pair.len()
            ))),
        }
    }

    /// Interprets command-line style input.
    ///
    /// `"52.52, 13.405"` becomes coordinates; anything that is not two comma-separated
    /// numbers is treated as a place name.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::invalid("location must not be empty"));
        }
        if let Some((lat, lon)) = input.split_once(',') {
            if let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
                return Ok(Self::Coordinates(LatLon::new(lat, lon)?));
            }
        }
        Ok(Self::Place(input.into()))
    }
}

/// Looks up place names.
///
/// Implementations make one attempt per call; retrying with a better query is up to the
/// person running the tool.
pub trait Geocoder {
    /// Resolves `place` to a position.
    fn geocode(&self, place: &str) -> Result<LatLon, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, place: &str) -> Result<LatLon, GeocodeError> {
        (**self).geocode(place)
    }
}

/// Resolves a [`Location`] into a [`LatLon`], consulting a [`Geocoder`] only for
/// place names.
#[derive(Clone, Debug)]
pub struct LocationResolver<G> {
    geocoder: G,
}

impl<G: Geocoder> LocationResolver<G> {
    /// Wraps a geocoder.
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    /// The wrapped geocoder.
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Resolves `location`.
    ///
    /// Geocoder failures surface as [`Error::Resolution`].
    pub fn resolve(&self, location: &Location) -> Result<LatLon> {
        match location {
            Location::Coordinates(pos) => LatLon::new(pos.lat, pos.lon),
            Location::Place(name) => match self.geocoder.geocode(name) {
                Ok(pos) => {
                    tracing::debug!(place = %name, lat = pos.lat, lon = pos.lon, "geocoded");
                    Ok(pos)
                }
                Err(err) => {
                    tracing::warn!(place = %name, error = %err, "geocoding failed");
                    Err(err.into())
                }
            },
        }
    }
}
