pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Number of decimal places coordinates are rounded to (~11 m).
pub const COORDINATE_PRECISION: i32 = 4;

/// Lower bound for the latitude cosine used when widening the longitude
/// range, keeps the delta finite near the poles.
const MIN_LATITUDE_COSINE: f64 = 0.1;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Rounds a coordinate to `COORDINATE_PRECISION` decimal places.
///
/// Rounding an already rounded value returns it unchanged.
pub fn round_coordinate(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_PRECISION);
    let rounded = (value * factor).round() / factor;
    // avoid "-0" showing up in cache keys
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Calculates a latitude/longitude rectangle containing every point within
/// `radius_meters` of the center.
///
/// Returns `((min_lat, min_lon), (max_lat, max_lon))`. If the circle touches
/// a pole or would wrap around the antimeridian, the longitude range is the
/// full `[-180, 180]`.
pub fn calculate_bounding_box(
    lat: f64,
    lon: f64,
    radius_meters: f64,
) -> ((f64, f64), (f64, f64)) {
    let angular_distance = radius_meters / EARTH_RADIUS_METERS;

    // Latitude bounds
    let delta_lat = to_degrees(angular_distance);
    let unclamped_min_lat = lat - delta_lat;
    let unclamped_max_lat = lat + delta_lat;
    let min_lat = unclamped_min_lat.max(-90.0);
    let max_lat = unclamped_max_lat.min(90.0);

    // the circle contains a pole, every meridian passes through it
    if unclamped_min_lat <= -90.0 || unclamped_max_lat >= 90.0 {
        return ((min_lat, -180.0), (max_lat, 180.0));
    }

    // Longitude bounds (adjusted by latitude)
    let cos_lat = to_radians(lat).cos();
    let delta_lon = to_degrees(angular_distance) / cos_lat.max(MIN_LATITUDE_COSINE);

    // The widest longitude extent of a spherical cap is asin(sin(d) / cos(lat)),
    // which exceeds the flat approximation at high latitudes.
    let sin_ratio = angular_distance.sin() / cos_lat;
    if sin_ratio >= 1.0 {
        return ((min_lat, -180.0), (max_lat, 180.0));
    }
    let delta_lon = delta_lon.max(to_degrees(sin_ratio.asin()));

    let min_lon = lon - delta_lon;
    let max_lon = lon + delta_lon;
    if min_lon < -180.0 || max_lon > 180.0 {
        return ((min_lat, -180.0), (max_lat, 180.0));
    }

    ((min_lat, min_lon), (max_lat, max_lon))
}

/// Great-circle distance in meters.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);

    let dlat = to_radians(latitude_2 - latitude_1);
    let dlon = to_radians(longitude_2 - longitude_1);

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push `a` just past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Moves `distance_meters` from a point along an initial bearing (degrees,
/// clockwise from north). Longitude is wrapped into `[-180, 180]`.
pub fn destination_point(
    lat: f64,
    lon: f64,
    bearing_degrees: f64,
    distance_meters: f64,
) -> (f64, f64) {
    let angular_distance = distance_meters / EARTH_RADIUS_METERS;
    let bearing = to_radians(bearing_degrees);
    let lat_rad = to_radians(lat);
    let lon_rad = to_radians(lon);

    let lat2 = (lat_rad.sin() * angular_distance.cos()
        + lat_rad.cos() * angular_distance.sin() * bearing.cos())
    .asin();
    let lon2 = lon_rad
        + (bearing.sin() * angular_distance.sin() * lat_rad.cos())
            .atan2(angular_distance.cos() - lat_rad.sin() * lat2.sin());

    let lon2 = (to_degrees(lon2) + 540.0).rem_euclid(360.0) - 180.0;
    (to_degrees(lat2), lon2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(bbox: ((f64, f64), (f64, f64)), lat: f64, lon: f64) -> bool {
        let ((min_lat, min_lon), (max_lat, max_lon)) = bbox;
        lat >= min_lat && lat <= max_lat && lon >= min_lon && lon <= max_lon
    }

    #[test]
    fn haversine_known_distance() {
        // Berlin Alexanderplatz to Brandenburger Tor, roughly 2.6 km
        let distance = haversine_distance(52.5219, 13.4132, 52.5163, 13.3777);
        assert!((distance - 2_480.0).abs() < 150.0, "{distance}");
    }

    #[test]
    fn haversine_is_zero_for_same_point() {
        assert_eq!(haversine_distance(52.52, 13.405, 52.52, 13.405), 0.0);
    }

    #[test]
    fn haversine_of_antipodal_points_is_half_the_circumference() {
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_METERS;
        for i in 0..200 {
            let latitude = 30.0 - i as f64 * 1e-9;
            let distance = haversine_distance(-30.0, 0.0, latitude, 180.0);
            assert!(distance.is_finite(), "{latitude}");
            assert!((distance - half_circumference).abs() < 1.0, "{distance}");
        }
        let distance = haversine_distance(0.0, 0.0, 0.0, 180.0);
        assert!((distance - half_circumference).abs() < 1e-6, "{distance}");
    }

    #[test]
    fn haversine_along_meridian_matches_arc_length() {
        let delta = to_degrees(1_999.0 / EARTH_RADIUS_METERS);
        let distance = haversine_distance(52.52, 13.405, 52.52 + delta, 13.405);
        assert!((distance - 1_999.0).abs() < 1e-6, "{distance}");
    }

    #[test]
    fn bounding_box_matches_flat_approximation_at_mid_latitudes() {
        let ((min_lat, min_lon), (max_lat, max_lon)) =
            calculate_bounding_box(52.52, 13.405, 2_000.0);
        let delta_lat = 2_000.0 / EARTH_RADIUS_METERS * 180.0 / std::f64::consts::PI;
        let delta_lon = delta_lat / to_radians(52.52).cos();

        assert!((min_lat - (52.52 - delta_lat)).abs() < 1e-9);
        assert!((max_lat - (52.52 + delta_lat)).abs() < 1e-9);
        assert!((min_lon - (13.405 - delta_lon)).abs() < 1e-9);
        assert!((max_lon - (13.405 + delta_lon)).abs() < 1e-9);
    }

    #[test]
    fn bounding_box_contains_whole_circle() {
        let centers = [
            (52.52, 13.405),
            (0.0, 0.0),
            (-33.8688, 151.2093),
            (70.0, 25.0),
            (84.5, -40.0),
            (89.9, 10.0),
            (-89.95, 0.0),
            (10.0, 179.99),
            (-10.0, -179.99),
        ];
        let radii = [1.0, 500.0, 2_000.0, 10_000.0, 20_000.0];

        for (lat, lon) in centers {
            for radius in radii {
                let bbox = calculate_bounding_box(lat, lon, radius);
                for step in 0..72 {
                    let bearing = step as f64 * 5.0;
                    let (p_lat, p_lon) =
                        destination_point(lat, lon, bearing, radius * 0.999_999);
                    assert!(
                        contains(bbox, p_lat, p_lon),
                        "({lat}, {lon}) r={radius} bearing={bearing}: \
                         ({p_lat}, {p_lon}) outside {bbox:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn bounding_box_near_pole_uses_full_longitude_range() {
        let ((_, min_lon), (max_lat, max_lon)) =
            calculate_bounding_box(89.95, 10.0, 10_000.0);
        assert_eq!(max_lat, 90.0);
        assert_eq!((min_lon, max_lon), (-180.0, 180.0));
    }

    #[test]
    fn bounding_box_across_antimeridian_uses_full_longitude_range() {
        let ((_, min_lon), (_, max_lon)) =
            calculate_bounding_box(10.0, 179.99, 5_000.0);
        assert_eq!((min_lon, max_lon), (-180.0, 180.0));
    }

    #[test]
    fn rounding_is_idempotent() {
        for value in [52.520_049_9, -13.404_95, 0.000_04, -0.000_04, 179.999_99] {
            let once = round_coordinate(value);
            assert_eq!(round_coordinate(once), once);
        }
        assert_eq!(round_coordinate(52.520_049_9), 52.52);
        assert_eq!(round_coordinate(-0.000_04), 0.0);
    }
}
