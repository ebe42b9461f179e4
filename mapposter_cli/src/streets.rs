// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Street network acquisition.
//!
//! Real street data lives behind [`StreetSource`]. The bundled [`SyntheticStreets`]
//! source generates a deterministic, slightly irregular street grid so the tool can
//! render posters offline.

use std::str::FromStr;

use kurbo::{Line, Point, Vec2};
use mapposter_layout::LatLon;

/// Largest accepted fetch radius, in meters.
///
/// Grid generation grows with the square of `radius / block`; at this radius the finest
/// network has about a million segments.
pub(crate) const MAX_RADIUS_M: f64 = 50_000.0;

/// Which streets to fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) enum NetworkType {
    #[default]
    Drive,
    Walk,
    Bike,
    All,
}

impl NetworkType {
    /// Typical block length in meters.
    fn block_m(self) -> f64 {
        match self {
            Self::Drive => 400.0,
            Self::Bike => 250.0,
            Self::Walk => 150.0,
            Self::All => 120.0,
        }
    }
}

impl FromStr for NetworkType {
    type Err = StreetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drive" => Ok(Self::Drive),
            "walk" => Ok(Self::Walk),
            "bike" => Ok(Self::Bike),
            "all" => Ok(Self::All),
            _ => Err(StreetError::UnknownNetwork(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum StreetError {
    #[error("unknown network type {0:?} (expected drive, walk, bike or all)")]
    UnknownNetwork(String),
    #[error("fetch radius must be between 0 and 50000 meters, got {0}")]
    InvalidRadius(f64),
}

/// Street segments around a center, in meters east (`x`) and north (`y`) of it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct StreetGraph {
    pub(crate) center: LatLon,
    pub(crate) radius_m: f64,
    pub(crate) edges: Vec<Line>,
}

pub(crate) trait StreetSource {
    fn fetch(
        &self,
        center: LatLon,
        network: NetworkType,
        radius_m: f64,
    ) -> Result<StreetGraph, StreetError>;
}

/// Deterministic street grid generator.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SyntheticStreets;

/// SplitMix64 finalizer.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Uniform value in `[-0.5, 0.5)`.
fn jitter(seed: u64, i: i64, j: i64, axis: u64) -> f64 {
    let h = mix(seed ^ mix((i as u64) ^ mix((j as u64) ^ mix(axis))));
    (h >> 11) as f64 / (1_u64 << 53) as f64 - 0.5
}

impl StreetSource for SyntheticStreets {
    fn fetch(
        &self,
        center: LatLon,
        network: NetworkType,
        radius_m: f64,
    ) -> Result<StreetGraph, StreetError> {
        if !radius_m.is_finite() || radius_m <= 0.0 || radius_m > MAX_RADIUS_M {
            return Err(StreetError::InvalidRadius(radius_m));
        }

        let seed = mix(center.lat().to_bits()) ^ center.lon().to_bits();
        let block = network.block_m();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "radius_m / block is at most a few hundred"
        )]
        let n = (radius_m / block).ceil() as i64;
        let node = |i: i64, j: i64| {
            let base = Vec2::new(i as f64 * block, j as f64 * block);
            let offset = Vec2::new(jitter(seed, i, j, 0), jitter(seed, i, j, 1)) * (0.35 * block);
            Point::ORIGIN + base + offset
        };
        let inside = |p: Point| p.to_vec2().hypot() <= radius_m;

        let mut edges = Vec::new();
        for i in -n..=n {
            for j in -n..=n {
                let p = node(i, j);
                if !inside(p) {
                    continue;
                }
                for q in [node(i + 1, j), node(i, j + 1)] {
                    if inside(q) {
                        edges.push(Line::new(p, q));
                    }
                }
            }
        }
        // Two avenues crossing the center.
        let r = radius_m * core::f64::consts::FRAC_1_SQRT_2;
        edges.push(Line::new((-r, -r), (r, r)));
        edges.push(Line::new((-r, r), (r, -r)));

        tracing::info!(
            edges = edges.len(),
            ?network,
            radius_m,
            "generated synthetic street network"
        );
        Ok(StreetGraph {
            center,
            radius_m,
            edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn berlin() -> LatLon {
        LatLon::new(52.52, 13.405).unwrap()
    }

    #[test]
    fn generation_is_deterministic() {
        let a = SyntheticStreets.fetch(berlin(), NetworkType::Drive, 2000.0).unwrap();
        let b = SyntheticStreets.fetch(berlin(), NetworkType::Drive, 2000.0).unwrap();
        assert_eq!(a, b);
        assert!(a.edges.len() > 20);
    }

    #[test]
    fn edges_stay_within_radius() {
        let g = SyntheticStreets.fetch(berlin(), NetworkType::Walk, 1000.0).unwrap();
        for edge in &g.edges {
            assert!(edge.p0.to_vec2().hypot() <= 1000.0 + 1e-9);
            assert!(edge.p1.to_vec2().hypot() <= 1000.0 + 1e-9);
        }
    }

    #[test]
    fn finer_networks_have_more_streets() {
        let drive = SyntheticStreets.fetch(berlin(), NetworkType::Drive, 1500.0).unwrap();
        let walk = SyntheticStreets.fetch(berlin(), NetworkType::Walk, 1500.0).unwrap();
        assert!(walk.edges.len() > drive.edges.len());
    }

    #[test]
    fn largest_radius_is_accepted() {
        let g = SyntheticStreets
            .fetch(berlin(), NetworkType::Drive, MAX_RADIUS_M)
            .unwrap();
        assert_eq!(g.radius_m, MAX_RADIUS_M);
        assert!(!g.edges.is_empty());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            SyntheticStreets.fetch(berlin(), NetworkType::All, 0.0),
            Err(StreetError::InvalidRadius(_))
        ));
        assert!(matches!(
            SyntheticStreets.fetch(berlin(), NetworkType::Drive, 1e12),
            Err(StreetError::InvalidRadius(_))
        ));
        assert!(matches!(
            SyntheticStreets.fetch(berlin(), NetworkType::Drive, f64::NAN),
            Err(StreetError::InvalidRadius(_))
        ));
        assert!(matches!(
            "tram".parse::<NetworkType>(),
            Err(StreetError::UnknownNetwork(_))
        ));
        assert_eq!(" Bike ".parse::<NetworkType>().unwrap(), NetworkType::Bike);
    }
}
