// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;
use core::fmt;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Everything that can stop a poster layout.
///
/// No variant carries a partial result: on error the caller must not draw.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// Bad paper format, margin, font size, factor, or coordinate input.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human readable description of the offending value.
        reason: String,
    },

    /// The geocoder could not turn a place name into coordinates.
    #[error("could not resolve location: {0}")]
    Resolution(#[from] GeocodeError),

    /// The map or a caption would end up outside the page.
    #[error("layout overflow: {element} would clip at the {edge} edge of the page")]
    LayoutOverflow {
        /// What would be clipped.
        element: LayoutElement,
        /// Which page edge it crosses.
        edge: PageEdge,
    },

    /// The rendering backend was asked for something it cannot answer yet.
    #[error("rendering backend precondition failed: {reason}")]
    BackendPrecondition {
        /// What was missing.
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Failure reported by a [`Geocoder`](crate::Geocoder).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeError {
    /// Nothing matched.
    #[error("no place matches {place:?}")]
    NotFound {
        /// The query.
        place: String,
    },
    /// More than one place matched.
    #[error("{place:?} matches {candidates} places; use a more specific name")]
    Ambiguous {
        /// The query.
        place: String,
        /// Number of matches.
        candidates: usize,
    },
    /// The service could not be reached.
    #[error("geocoding service unavailable: {message}")]
    Network {
        /// Transport error text.
        message: String,
    },
}

/// A placed element of the poster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutElement {
    /// The map region.
    Map,
    /// The title caption.
    Title,
    /// The coordinate caption.
    Coordinates,
}

impl fmt::Display for LayoutElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Map => "map",
            Self::Title => "title caption",
            Self::Coordinates => "coordinate caption",
        })
    }
}

/// A horizontal page edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageEdge {
    /// `y = 1`.
    Top,
    /// `y = 0`.
    Bottom,
}

impl fmt::Display for PageEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn overflow_message_names_element_and_edge() {
        let err = Error::LayoutOverflow {
            element: LayoutElement::Coordinates,
            edge: PageEdge::Bottom,
        };
        assert_eq!(
            err.to_string(),
            "layout overflow: coordinate caption would clip at the bottom edge of the page"
        );
    }

    #[test]
    fn geocode_errors_convert() {
        let err: Error = GeocodeError::NotFound {
            place: "Atlantis".into(),
        }
        .into();
        assert!(matches!(err, Error::Resolution(GeocodeError::NotFound { .. })));
        assert_eq!(
            err.to_string(),
            "could not resolve location: no place matches \"Atlantis\""
        );
    }
}
