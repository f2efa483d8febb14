//! Great-circle bearing and distance, and the Qibla direction.

use serde::Serialize;

use crate::Error;

/// Mean Earth radius used for haversine distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Latitude of the Kaaba.
pub const KAABA_LAT: f64 = 21.422487;

/// Longitude of the Kaaba.
pub const KAABA_LNG: f64 = 39.826206;

/// A validated point on the globe, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Validate a latitude/longitude pair.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCoordinates` if either value is not finite,
    /// latitude is outside `[-90, 90]` or longitude outside `[-180, 180]`.
    pub fn new(lat: f64, lng: f64) -> Result<Self, Error> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(Error::InvalidCoordinates(format!("non-finite coordinates ({lat}, {lng})")));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidCoordinates(format!("latitude {lat} outside [-90, 90]")));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(Error::InvalidCoordinates(format!("longitude {lng} outside [-180, 180]")));
        }
        Ok(Self { lat, lng })
    }

    /// The Kaaba in Mecca.
    pub fn kaaba() -> Self {
        Self { lat: KAABA_LAT, lng: KAABA_LNG }
    }

    /// Initial great-circle bearing to `target`, in `[0, 360)` degrees.
    pub fn bearing_to(&self, target: &Coordinates) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), target.lat.to_radians());
        let dlng = (target.lng - self.lng).to_radians();

        let y = dlng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();

        let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        if bearing >= 360.0 { 0.0 } else { bearing }
    }

    /// Haversine distance to `target` in kilometres.
    pub fn distance_km(&self, target: &Coordinates) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), target.lat.to_radians());
        let dlat = lat2 - lat1;
        let dlng = (target.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// Direction and distance to the Kaaba from a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Qibla {
    pub bearing_deg: f64,
    pub distance_km: f64,
}

/// Bearing (degrees) and distance (km) from one point to another.
///
/// # Errors
///
/// Returns `Error::InvalidCoordinates` if any input is non-finite or out of range.
pub fn bearing_and_distance(lat: f64, lng: f64, target_lat: f64, target_lng: f64) -> Result<(f64, f64), Error> {
    let from = Coordinates::new(lat, lng)?;
    let to = Coordinates::new(target_lat, target_lng)?;
    Ok((from.bearing_to(&to), from.distance_km(&to)))
}

/// Qibla direction and distance from `(lat, lng)`.
///
/// # Errors
///
/// Returns `Error::InvalidCoordinates` if the position is invalid.
pub fn qibla(lat: f64, lng: f64) -> Result<Qibla, Error> {
    let (bearing_deg, distance_km) = bearing_and_distance(lat, lng, KAABA_LAT, KAABA_LNG)?;
    Ok(Qibla { bearing_deg, distance_km })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!((actual - expected).abs() <= tolerance, "expected {expected} ± {tolerance}, got {actual}");
    }

    #[test]
    fn test_same_point_as_kaaba() {
        let (_, distance) = bearing_and_distance(KAABA_LAT, KAABA_LNG, KAABA_LAT, KAABA_LNG).unwrap();
        assert_close(distance, 0.0, 1e-9);
    }

    #[test]
    fn test_due_north_of_kaaba_points_south() {
        let (bearing, distance) = bearing_and_distance(25.0, KAABA_LNG, KAABA_LAT, KAABA_LNG).unwrap();
        assert_close(bearing, 180.0, 1e-6);
        assert_close(distance, 397.8013, 1e-3);
    }

    #[test]
    fn test_due_south_of_kaaba_points_north() {
        let (bearing, _) = bearing_and_distance(10.0, KAABA_LNG, KAABA_LAT, KAABA_LNG).unwrap();
        assert!(bearing < 1e-6 || bearing > 360.0 - 1e-6, "got {bearing}");
    }

    #[test]
    fn test_reference_cities() {
        let london = qibla(51.5074, -0.1278).unwrap();
        assert_close(london.bearing_deg, 118.987, 0.01);
        assert_close(london.distance_km, 4793.78, 0.5);

        let jakarta = qibla(-6.2088, 106.8456).unwrap();
        assert_close(jakarta.bearing_deg, 295.152, 0.01);
        assert_close(jakarta.distance_km, 7920.13, 0.5);

        let new_york = qibla(40.7128, -74.0060).unwrap();
        assert_close(new_york.bearing_deg, 58.482, 0.01);
        assert_close(new_york.distance_km, 10306.31, 0.5);
    }

    #[test]
    fn test_bearing_range() {
        for lat in [-89.0, -45.0, 0.0, 45.0, 89.0] {
            for lng in [-180.0, -90.0, 0.0, 90.0, 180.0] {
                let q = qibla(lat, lng).unwrap();
                assert!((0.0..360.0).contains(&q.bearing_deg), "{lat},{lng} -> {}", q.bearing_deg);
                assert!(q.distance_km.is_finite());
            }
        }
    }

    #[test]
    fn test_antipode_distance_is_half_circumference() {
        let (_, distance) = bearing_and_distance(-KAABA_LAT, KAABA_LNG - 180.0, KAABA_LAT, KAABA_LNG).unwrap();
        assert_close(distance, std::f64::consts::PI * EARTH_RADIUS_KM, 0.01);
    }

    #[test]
    fn test_invalid_latitude() {
        let result = bearing_and_distance(91.0, 0.0, 0.0, 0.0);
        assert!(matches!(result, Err(Error::InvalidCoordinates(_))));
    }

    #[test]
    fn test_invalid_longitude_and_target() {
        assert!(matches!(bearing_and_distance(0.0, 180.5, 0.0, 0.0), Err(Error::InvalidCoordinates(_))));
        assert!(matches!(bearing_and_distance(0.0, 0.0, -90.1, 0.0), Err(Error::InvalidCoordinates(_))));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(qibla(f64::NAN, 0.0), Err(Error::InvalidCoordinates(_))));
        assert!(matches!(qibla(0.0, f64::INFINITY), Err(Error::InvalidCoordinates(_))));
    }

    #[test]
    fn test_boundary_values_accepted() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
    }
}
