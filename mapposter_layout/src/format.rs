// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate caption text.
//!
//! Values are printed with two decimals using the standard float formatter, which rounds
//! the exact binary value of the `f64`. A literal like `13.405` is stored slightly below
//! its decimal spelling and therefore prints as `13.40`; true ties (exactly representable
//! values such as `0.125`) round half to even.

use alloc::string::{String, ToString};
use core::fmt;

use crate::LatLon;

/// Formats a position as `"52.52° N, 13.40° E"`.
#[must_use]
pub fn format_coordinates(pos: &LatLon) -> String {
    pos.to_string()
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lat, ns) = hemisphere(self.lat(), 'N', 'S');
        let (lon, ew) = hemisphere(self.lon(), 'E', 'W');
        write!(f, "{lat:.2}\u{b0} {ns}, {lon:.2}\u{b0} {ew}")
    }
}

fn hemisphere(value: f64, positive: char, negative: char) -> (f64, char) {
    if value < 0.0 {
        (-value, negative)
    } else {
        // Adding +0.0 turns -0.0 into 0.0.
        (value + 0.0, positive)
    }
}
