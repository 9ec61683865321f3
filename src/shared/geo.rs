use crate::core::error::{AppError, Result};

/// Earth's radius in meters (for Haversine formula)
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Meters per degree of latitude (longitude varies with latitude)
const METERS_PER_DEGREE_LAT: f64 = 111_000.0;

/// A validated latitude/longitude pair in degrees.
///
/// Latitude must be within [-90, 90] and longitude within [-180, 180];
/// construction fails otherwise. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::Validation(format!(
                "Latitude must be within [-90, 90], got {}",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::Validation(format!(
                "Longitude must be within [-180, 180], got {}",
                longitude
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_METERS * c
}

/// Rectangular latitude/longitude window used to pre-filter candidates
/// before the exact Haversine check. Deliberately oversized: it may admit
/// points outside the radius, never exclude points inside it.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn around(center: &Coordinate, radius_meters: f64) -> Self {
        // 1 degree of latitude is approximately 111km
        // For longitude, it varies by latitude, but we use a conservative estimate
        let lat_delta = (radius_meters / METERS_PER_DEGREE_LAT) * 2.0;
        let lon_delta = lat_delta / center.latitude().to_radians().cos().abs().max(0.01);

        Self {
            min_lat: (center.latitude() - lat_delta).max(-90.0),
            max_lat: (center.latitude() + lat_delta).min(90.0),
            min_lon: (center.longitude() - lon_delta).max(-180.0),
            max_lon: (center.longitude() + lon_delta).min(180.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Berlin to Potsdam, approx 27km by Haversine
        let berlin = (52.5200, 13.4050);
        let potsdam = (52.3906, 13.0645);

        let distance = haversine_distance(berlin.0, berlin.1, potsdam.0, potsdam.1);

        assert!(distance > 25_000.0 && distance < 30_000.0);
    }

    #[test]
    fn test_haversine_same_point() {
        let distance = haversine_distance(52.5200, 13.4050, 52.5200, 13.4050);

        assert!(distance < 1.0); // Less than 1 meter
    }

    #[test]
    fn test_coordinate_rejects_out_of_range() {
        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(-90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.1).is_err());
        assert!(Coordinate::new(0.0, -180.1).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_coordinate_accepts_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_bounding_box_contains_radius() {
        let center = Coordinate::new(52.5200, 13.4050).unwrap();
        let bbox = BoundingBox::around(&center, 2000.0);

        // A point ~1.5km north of the center must fall inside the box
        let north = Coordinate::new(52.5335, 13.4050).unwrap();
        assert!(north.latitude() > bbox.min_lat && north.latitude() < bbox.max_lat);
        assert!(north.longitude() > bbox.min_lon && north.longitude() < bbox.max_lon);
    }

    #[test]
    fn test_bounding_box_clamped_at_poles() {
        let center = Coordinate::new(89.9, 0.0).unwrap();
        let bbox = BoundingBox::around(&center, 50_000.0);

        assert!(bbox.max_lat <= 90.0);
        assert!(bbox.min_lon >= -180.0 && bbox.max_lon <= 180.0);
    }
}
