//! Positions and the provider coordinate-string convention.
//!
//! Geocoding providers encode a position as a space-separated
//! `"<longitude> <latitude>"` string, while map surfaces address positions as
//! `[latitude, longitude]`. [`CoordinatePair`] is the only place either
//! ordering is produced or consumed.

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A WGS84 position with `x = longitude` and `y = latitude`.
///
/// Serialises as the provider string so persisted or logged waypoints read
/// the same way the geocoder reports them.
///
/// # Examples
/// ```
/// use waypoint_core::CoordinatePair;
///
/// let pos = CoordinatePair::from_provider_str("20.5 54.7")?;
/// assert_eq!(pos.longitude(), 20.5);
/// assert_eq!(pos.latitude(), 54.7);
/// assert_eq!(pos.to_lat_lon(), [54.7, 20.5]);
/// assert_eq!(pos.to_provider_string(), "20.5 54.7");
/// # Ok::<(), waypoint_core::CoordinateParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoordinatePair(Coord<f64>);

/// Errors returned when a provider coordinate string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateParseError {
    /// The string did not hold exactly two whitespace-separated values.
    #[error("expected \"<longitude> <latitude>\", got {input:?}")]
    Arity {
        /// Offending input.
        input: String,
    },
    /// One of the values was not a number.
    #[error("invalid coordinate value in {input:?}: {source}")]
    Number {
        /// Offending input.
        input: String,
        /// Underlying float parse error.
        #[source]
        source: ParseFloatError,
    },
    /// One of the values was NaN or infinite.
    #[error("coordinate values must be finite, got {input:?}")]
    NonFinite {
        /// Offending input.
        input: String,
    },
}

impl CoordinatePair {
    /// Construct a pair from longitude and latitude.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self(Coord {
            x: longitude,
            y: latitude,
        })
    }

    /// Construct a pair from the map surface's `[latitude, longitude]` order.
    #[must_use]
    pub const fn from_lat_lon(lat_lon: [f64; 2]) -> Self {
        let [latitude, longitude] = lat_lon;
        Self::new(longitude, latitude)
    }

    /// Parse the provider's `"<longitude> <latitude>"` string.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateParseError`] when the input does not hold exactly
    /// two finite numbers.
    pub fn from_provider_str(input: &str) -> Result<Self, CoordinateParseError> {
        let mut parts = input.split_whitespace();
        let (Some(lon), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CoordinateParseError::Arity {
                input: input.to_owned(),
            });
        };
        let parse = |raw: &str| {
            raw.parse::<f64>()
                .map_err(|source| CoordinateParseError::Number {
                    input: input.to_owned(),
                    source,
                })
        };
        let longitude = parse(lon)?;
        let latitude = parse(lat)?;
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(CoordinateParseError::NonFinite {
                input: input.to_owned(),
            });
        }
        Ok(Self::new(longitude, latitude))
    }

    /// Render the provider's `"<longitude> <latitude>"` string.
    #[must_use]
    pub fn to_provider_string(&self) -> String {
        format!("{} {}", self.longitude(), self.latitude())
    }

    /// Return the map surface's `[latitude, longitude]` order.
    #[must_use]
    pub const fn to_lat_lon(&self) -> [f64; 2] {
        [self.0.y, self.0.x]
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.0.x
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.0.y
    }

    /// The underlying `geo` coordinate.
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        self.0
    }
}

impl From<Coord<f64>> for CoordinatePair {
    fn from(coord: Coord<f64>) -> Self {
        Self(coord)
    }
}

impl FromStr for CoordinatePair {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_provider_str(s)
    }
}

impl TryFrom<String> for CoordinatePair {
    type Error = CoordinateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_provider_str(&value)
    }
}

impl From<CoordinatePair> for String {
    fn from(pair: CoordinatePair) -> Self {
        pair.to_provider_string()
    }
}

impl fmt::Display for CoordinatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.longitude(), self.latitude())
    }
}
