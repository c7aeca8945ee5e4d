//! Geodetic → UTM projection (WGS84).

use contracts::ConvertError;

/// WGS84 semi-major axis (meters)
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
/// WGS84 first eccentricity squared
const ECCENTRICITY_SQUARED: f64 = 6.694_379_990_14e-3;
/// UTM central scale factor
const SCALE_FACTOR: f64 = 0.9996;
/// UTM false easting (meters)
const FALSE_EASTING: f64 = 500_000.0;
/// UTM false northing for the southern hemisphere (meters)
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// UTM latitude band limits (degrees)
const MIN_LATITUDE: f64 = -80.0;
const MAX_LATITUDE: f64 = 84.0;

/// Planar point produced by the projection, tagged with its zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Easting (meters)
    pub easting: f64,

    /// Northing (meters)
    pub northing: f64,

    /// UTM zone the point was computed in (1..=60)
    pub zone: u8,

    /// Northern hemisphere flag
    pub north: bool,
}

/// Validate a geodetic coordinate pair for projectability
///
/// UTM is only defined between 80°S and 84°N; NaN never projects.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<(), ConvertError> {
    let lat_ok = (MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude);
    let lon_ok = (-180.0..=180.0).contains(&longitude);
    if !lat_ok || !lon_ok {
        // NaN fails both range checks
        return Err(ConvertError::InvalidCoordinate {
            latitude,
            longitude,
        });
    }
    Ok(())
}

/// UTM zone implied by a longitude (1..=60)
pub fn zone_for_longitude(longitude: f64) -> u8 {
    let zone = ((longitude + 180.0) / 6.0).floor() as i32 + 1;
    zone.clamp(1, 60) as u8
}

/// Central meridian of a zone (radians)
fn central_meridian(zone: u8) -> f64 {
    ((zone as f64 - 1.0) * 6.0 - 180.0 + 3.0).to_radians()
}

/// Project a geodetic coordinate onto the UTM plane of the given zone
///
/// Pure and deterministic: identical inputs yield bit-identical outputs.
/// The zone is taken as given (callers pin it per run); only the coordinate
/// range is validated here.
pub fn project(latitude: f64, longitude: f64, zone: u8) -> Result<ProjectedPoint, ConvertError> {
    check_coordinates(latitude, longitude)?;

    let lat_rad = latitude.to_radians();
    let lon_rad = longitude.to_radians();
    let lon_diff = lon_rad - central_meridian(zone);

    let north = latitude >= 0.0;
    let false_northing = if north { 0.0 } else { FALSE_NORTHING_SOUTH };

    let e2 = ECCENTRICITY_SQUARED;
    let n = SEMI_MAJOR_AXIS / (1.0 - e2 * lat_rad.sin().powi(2)).sqrt();
    let t = lat_rad.tan();
    let c = e2 * lat_rad.cos().powi(2) / (1.0 - e2);
    let a = lat_rad.cos() * lon_diff;

    let easting =
        FALSE_EASTING + SCALE_FACTOR * n * (a + (1.0 - t * t + c) * a.powi(3) / 6.0);

    // Meridian arc length from the equator
    let m = SEMI_MAJOR_AXIS
        * ((1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0) * lat_rad
            - (3.0 * e2 / 8.0 + 3.0 * e2.powi(2) / 32.0) * (2.0 * lat_rad).sin()
            + (15.0 * e2.powi(2) / 256.0) * (4.0 * lat_rad).sin());

    let northing = false_northing
        + SCALE_FACTOR
            * (m + n * t * (a.powi(2) / 2.0 + (5.0 - t * t + 9.0 * c + 4.0 * c.powi(2)) * a.powi(4) / 24.0));

    Ok(ProjectedPoint {
        easting,
        northing,
        zone,
        north,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_calculation() {
        assert_eq!(zone_for_longitude(-180.0), 1);
        assert_eq!(zone_for_longitude(-177.0), 1);
        assert_eq!(zone_for_longitude(0.0), 31);
        assert_eq!(zone_for_longitude(120.0), 51);
        assert_eq!(zone_for_longitude(180.0), 60);
    }

    #[test]
    fn test_central_meridian_maps_to_false_easting() {
        // lon = 117° is the central meridian of zone 51
        let p = project(30.0, 117.0, 51).unwrap();
        assert!((p.easting - FALSE_EASTING).abs() < 1e-6);
        assert!(p.north);
        assert_eq!(p.zone, 51);
    }

    #[test]
    fn test_equator_has_zero_northing() {
        let p = project(0.0, 3.0, 31).unwrap();
        assert!(p.northing.abs() < 1e-6);
    }

    #[test]
    fn test_southern_hemisphere_false_northing() {
        let p = project(-30.0, 117.0, 51).unwrap();
        assert!(!p.north);
        assert!(p.northing > 6_000_000.0 && p.northing < FALSE_NORTHING_SOUTH);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let a = project(30.123456, 120.654321, 51).unwrap();
        let b = project(30.123456, 120.654321, 51).unwrap();
        assert_eq!(a.easting.to_bits(), b.easting.to_bits());
        assert_eq!(a.northing.to_bits(), b.northing.to_bits());
    }

    #[test]
    fn test_small_latitude_step_moves_north() {
        // 0.0001° of latitude is roughly 11 meters on the WGS84 ellipsoid
        let p0 = project(30.0, 120.0, 51).unwrap();
        let p1 = project(30.0001, 120.0, 51).unwrap();
        let dn = p1.northing - p0.northing;
        assert!(dn > 10.0 && dn < 12.0, "northing step {dn}");
        assert!((p1.easting - p0.easting).abs() < 0.01);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            project(85.0, 0.0, 31),
            Err(ConvertError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            project(-80.5, 0.0, 31),
            Err(ConvertError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            project(0.0, 181.0, 31),
            Err(ConvertError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        assert!(check_coordinates(f64::NAN, 0.0).is_err());
        assert!(check_coordinates(0.0, f64::NAN).is_err());
    }
}
