//! Geographic coordinates.
//!
//! Values are WGS84 degrees. Conversions to [`geo::Coord`] follow the
//! `x = longitude`, `y = latitude` convention used by the `geo` crate.

use geo::Coord;
use thiserror::Error;

/// A latitude/longitude pair in decimal degrees.
///
/// # Examples
/// ```
/// use waypath_core::Coordinate;
///
/// # fn main() -> Result<(), waypath_core::CoordinateError> {
/// let paris = Coordinate::new(48.8566, 2.3522)?;
/// assert_eq!(paris.latitude, 48.8566);
/// assert_eq!(paris.longitude, 2.3522);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Latitude in degrees, within `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in degrees, within `[-180, 180]`.
    pub longitude: f64,
}

/// Errors returned by [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// A component was NaN or infinite.
    #[error("coordinate components must be finite")]
    NonFinite,
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Coordinate {
    /// Validates and constructs a [`Coordinate`].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build a coordinate from a GeoJSON-style `[longitude, latitude]` pair.
    ///
    /// # Examples
    /// ```
    /// use waypath_core::Coordinate;
    ///
    /// let coordinate = Coordinate::from_lon_lat([2.0, 1.0]).expect("valid pair");
    /// assert_eq!(coordinate.latitude, 1.0);
    /// ```
    pub fn from_lon_lat([longitude, latitude]: [f64; 2]) -> Result<Self, CoordinateError> {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl TryFrom<Coord<f64>> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(value.y, value.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(0.0, 0.0)]
    fn accepts_boundary_values(#[case] latitude: f64, #[case] longitude: f64) {
        assert!(Coordinate::new(latitude, longitude).is_ok());
    }

    #[rstest]
    #[case(90.5, 0.0, CoordinateError::LatitudeOutOfRange(90.5))]
    #[case(0.0, -180.5, CoordinateError::LongitudeOutOfRange(-180.5))]
    #[case(f64::NAN, 0.0, CoordinateError::NonFinite)]
    #[case(0.0, f64::INFINITY, CoordinateError::NonFinite)]
    fn rejects_invalid_values(
        #[case] latitude: f64,
        #[case] longitude: f64,
        #[case] expected: CoordinateError,
    ) {
        let err = Coordinate::new(latitude, longitude).expect_err("invalid coordinate");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn geo_conversion_swaps_axes() {
        let coordinate = Coordinate::new(51.5, -0.1).expect("valid coordinate");
        let coord: Coord<f64> = coordinate.into();
        assert_eq!(coord, Coord { x: -0.1, y: 51.5 });
        assert_eq!(Coordinate::try_from(coord), Ok(coordinate));
    }
}
