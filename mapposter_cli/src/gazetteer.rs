// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An offline geocoder backed by a small table of place names.

use hashbrown::HashMap;
use mapposter_layout::{GeocodeError, Geocoder, LatLon};

/// Built-in places: `(name, lat, lon)`.
const PLACES: &[(&str, f64, f64)] = &[
    ("Berlin, Germany", 52.52, 13.405),
    ("Hamburg, Germany", 53.5511, 9.9937),
    ("Paris, France", 48.8566, 2.3522),
    ("London, United Kingdom", 51.5074, -0.1278),
    ("New York, United States", 40.7128, -74.006),
    ("Sydney, Australia", -33.87, 151.21),
    ("Tokyo, Japan", 35.6762, 139.6503),
    ("Buenos Aires, Argentina", -34.6037, -58.3816),
    ("Springfield, Illinois", 39.7817, -89.6501),
    ("Springfield, Massachusetts", 42.1015, -72.5898),
];

/// Case-insensitive place lookup.
///
/// A query matches a place if it equals its full name (`"Berlin, Germany"`) or its
/// leading component (`"Berlin"`). Several leading-component matches are ambiguous.
#[derive(Clone, Debug, Default)]
pub(crate) struct Gazetteer {
    places: HashMap<String, (String, LatLon)>,
}

impl Gazetteer {
    pub(crate) fn with_defaults() -> Self {
        let mut gazetteer = Self::default();
        for &(name, lat, lon) in PLACES {
            if let Ok(pos) = LatLon::new(lat, lon) {
                gazetteer.insert(name, pos);
            }
        }
        gazetteer
    }

    pub(crate) fn insert(&mut self, name: &str, pos: LatLon) {
        self.places
            .insert(normalize(name), (name.trim().to_string(), pos));
    }

    pub(crate) fn len(&self) -> usize {
        self.places.len()
    }
}

fn normalize(name: &str) -> String {
    name.split(',')
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(", ")
        .to_lowercase()
}

fn leading_component(key: &str) -> &str {
    key.split(',').next().unwrap_or(key)
}

impl Geocoder for Gazetteer {
    fn geocode(&self, place: &str) -> Result<LatLon, GeocodeError> {
        let query = normalize(place);
        if let Some((_, pos)) = self.places.get(&query) {
            return Ok(*pos);
        }

        let mut matches: Vec<&(String, LatLon)> = self
            .places
            .iter()
            .filter(|(key, _)| leading_component(key) == query)
            .map(|(_, entry)| entry)
            .collect();
        match matches.len() {
            0 => Err(GeocodeError::NotFound {
                place: place.to_string(),
            }),
            1 => Ok(matches[0].1),
            candidates => {
                matches.sort_by(|a, b| a.0.cmp(&b.0));
                tracing::debug!(
                    place,
                    first = %matches[0].0,
                    candidates,
                    "ambiguous place name"
                );
                Err(GeocodeError::Ambiguous {
                    place: place.to_string(),
                    candidates,
                })
            }
        }
    }
}
