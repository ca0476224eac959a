use model::{
    location::{is_valid_latitude, is_valid_longitude, GeoPoint},
    search::{FeatureKind, RadiusQuery, SearchRequest, ViewportQuery},
};
use serde::Deserialize;

use crate::{SearchError, SearchResult};

/// Query parameters exactly as they arrived, nothing parsed yet.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
    pub limit: Option<String>,
    pub feature: Option<String>,
    pub ne_lat: Option<String>,
    pub ne_lng: Option<String>,
    pub sw_lat: Option<String>,
    pub sw_lng: Option<String>,
}

impl RawSearchParams {
    fn has_viewport(&self) -> bool {
        [&self.ne_lat, &self.ne_lng, &self.sw_lat, &self.sw_lng]
            .iter()
            .any(|corner| corner.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub default_radius_meters: u32,
    pub max_radius_meters: u32,
    pub default_limit: usize,
    pub max_limit: usize,
}

pub const MIN_RADIUS_METERS: u32 = 1;

/// The endpoint a search came in through, each with its own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// General point search around a location.
    Nearby,
    /// Amenity search, wider defaults, `feature` required.
    Feature,
}

impl Endpoint {
    /// Whether a missing `feature` is rejected.
    pub const fn requires_feature(&self) -> bool {
        matches!(self, Endpoint::Feature)
    }

    pub const fn limits(&self) -> SearchLimits {
        match self {
            Endpoint::Nearby => SearchLimits {
                default_radius_meters: 2_000,
                max_radius_meters: 10_000,
                default_limit: 20,
                max_limit: 50,
            },
            Endpoint::Feature => SearchLimits {
                default_radius_meters: 5_000,
                max_radius_meters: 20_000,
                default_limit: 50,
                max_limit: 100,
            },
        }
    }
}

/// Turns raw parameters into a search request.
///
/// A complete viewport takes precedence over `lat`/`lng`. Radius and limit
/// never fail: missing or malformed values fall back to the endpoint default
/// and everything else is clamped into range.
pub fn validate(params: &RawSearchParams, endpoint: Endpoint) -> SearchResult<SearchRequest> {
    let limits = endpoint.limits();
    let feature = parse_feature(params.feature.as_deref())?;
    if feature.is_none() && endpoint.requires_feature() {
        return Err(SearchError::invalid_argument("feature", "is required"));
    }
    let limit = parse_limit(params.limit.as_deref(), &limits);

    if params.has_viewport() {
        let north_east = parse_point(
            ("neLat", params.ne_lat.as_deref()),
            ("neLng", params.ne_lng.as_deref()),
        )?;
        let south_west = parse_point(
            ("swLat", params.sw_lat.as_deref()),
            ("swLng", params.sw_lng.as_deref()),
        )?;
        if south_west.latitude() > north_east.latitude() {
            return Err(SearchError::invalid_argument(
                "swLat",
                "must not be north of neLat",
            ));
        }
        return Ok(SearchRequest::Viewport(ViewportQuery {
            north_east,
            south_west,
            limit,
            feature,
        }));
    }

    let center = parse_point(
        ("lat", params.lat.as_deref()),
        ("lng", params.lng.as_deref()),
    )?;
    Ok(SearchRequest::Radius(RadiusQuery {
        center,
        radius_meters: parse_radius(params.radius.as_deref(), &limits),
        limit,
        feature,
    }))
}

fn parse_point(
    (latitude_field, latitude): (&'static str, Option<&str>),
    (longitude_field, longitude): (&'static str, Option<&str>),
) -> SearchResult<GeoPoint> {
    let latitude = parse_coordinate(latitude_field, latitude)?;
    if !is_valid_latitude(latitude) {
        return Err(SearchError::invalid_argument(
            latitude_field,
            "must be between -90 and 90",
        ));
    }
    let longitude = parse_coordinate(longitude_field, longitude)?;
    if !is_valid_longitude(longitude) {
        return Err(SearchError::invalid_argument(
            longitude_field,
            "must be between -180 and 180",
        ));
    }
    GeoPoint::new(latitude, longitude)
        .ok_or_else(|| SearchError::invalid_argument(latitude_field, "out of range"))
}

fn parse_coordinate(field: &'static str, raw: Option<&str>) -> SearchResult<f64> {
    let raw = raw
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| SearchError::invalid_argument(field, "is required"))?;
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SearchError::invalid_argument(field, "must be a finite number"))
}

fn parse_radius(raw: Option<&str>, limits: &SearchLimits) -> u32 {
    raw.and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|radius| radius.is_finite())
        .map(|radius| {
            radius
                .round()
                .clamp(MIN_RADIUS_METERS as f64, limits.max_radius_meters as f64)
                as u32
        })
        .unwrap_or(limits.default_radius_meters)
        .min(limits.max_radius_meters)
}

fn parse_limit(raw: Option<&str>, limits: &SearchLimits) -> usize {
    raw.and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|limit| limit.is_finite())
        .map(|limit| limit.round().clamp(1.0, limits.max_limit as f64) as usize)
        .unwrap_or(limits.default_limit)
        .min(limits.max_limit)
}

fn parse_feature(raw: Option<&str>) -> SearchResult<Option<FeatureKind>> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<FeatureKind>()
            .map(Some)
            .map_err(|why| SearchError::invalid_argument("feature", why.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RawSearchParams {
        let mut params = RawSearchParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "lat" => params.lat = value,
                "lng" => params.lng = value,
                "radius" => params.radius = value,
                "limit" => params.limit = value,
                "feature" => params.feature = value,
                "neLat" => params.ne_lat = value,
                "neLng" => params.ne_lng = value,
                "swLat" => params.sw_lat = value,
                "swLng" => params.sw_lng = value,
                other => panic!("unknown parameter {other}"),
            }
        }
        params
    }

    fn radius_query(request: SearchRequest) -> RadiusQuery {
        match request {
            SearchRequest::Radius(query) => query,
            other => panic!("expected radius query, got {other:?}"),
        }
    }

    fn invalid_field(result: SearchResult<SearchRequest>) -> &'static str {
        match result {
            Err(SearchError::InvalidArgument { field, .. }) => field,
            other => panic!("expected invalid argument, got {other:?}"),
        }
    }

    #[test]
    fn applies_endpoint_defaults() {
        let raw = params(&[("lat", "52.52"), ("lng", "13.405")]);

        let nearby = radius_query(validate(&raw, Endpoint::Nearby).unwrap());
        assert_eq!(nearby.radius_meters, 2_000);
        assert_eq!(nearby.limit, 20);
        assert_eq!(nearby.feature, None);

        let raw = params(&[("lat", "52.52"), ("lng", "13.405"), ("feature", "wifi")]);
        let feature = radius_query(validate(&raw, Endpoint::Feature).unwrap());
        assert_eq!(feature.radius_meters, 5_000);
        assert_eq!(feature.limit, 50);
    }

    #[test]
    fn clamps_radius_instead_of_rejecting() {
        let raw = params(&[
            ("lat", "52.52"),
            ("lng", "13.405"),
            ("radius", "50000"),
            ("feature", "quiet"),
        ]);
        assert_eq!(
            radius_query(validate(&raw, Endpoint::Nearby).unwrap()).radius_meters,
            10_000
        );
        assert_eq!(
            radius_query(validate(&raw, Endpoint::Feature).unwrap()).radius_meters,
            20_000
        );

        let raw = params(&[("lat", "52.52"), ("lng", "13.405"), ("radius", "-10")]);
        assert_eq!(
            radius_query(validate(&raw, Endpoint::Nearby).unwrap()).radius_meters,
            MIN_RADIUS_METERS
        );
    }

    #[test]
    fn malformed_radius_and_limit_fall_back_to_defaults() {
        let raw = params(&[
            ("lat", "52.52"),
            ("lng", "13.405"),
            ("radius", "far"),
            ("limit", "lots"),
        ]);
        let query = radius_query(validate(&raw, Endpoint::Nearby).unwrap());
        assert_eq!(query.radius_meters, 2_000);
        assert_eq!(query.limit, 20);
    }

    #[test]
    fn clamps_limit() {
        let raw = params(&[
            ("lat", "52.52"),
            ("lng", "13.405"),
            ("limit", "500"),
            ("feature", "outlets"),
        ]);
        assert_eq!(radius_query(validate(&raw, Endpoint::Nearby).unwrap()).limit, 50);
        assert_eq!(radius_query(validate(&raw, Endpoint::Feature).unwrap()).limit, 100);

        let raw = params(&[("lat", "52.52"), ("lng", "13.405"), ("limit", "0")]);
        assert_eq!(radius_query(validate(&raw, Endpoint::Nearby).unwrap()).limit, 1);

        let raw = params(&[
            ("lat", "52.52"),
            ("lng", "13.405"),
            ("limit", "99999999999999999999"),
        ]);
        assert_eq!(radius_query(validate(&raw, Endpoint::Nearby).unwrap()).limit, 50);
    }

    #[test]
    fn rejects_bad_coordinates_naming_the_field() {
        let missing = params(&[("lng", "13.405")]);
        assert_eq!(invalid_field(validate(&missing, Endpoint::Nearby)), "lat");

        let malformed = params(&[("lat", "52.52"), ("lng", "east")]);
        assert_eq!(invalid_field(validate(&malformed, Endpoint::Nearby)), "lng");

        let not_finite = params(&[("lat", "NaN"), ("lng", "13.405")]);
        assert_eq!(invalid_field(validate(&not_finite, Endpoint::Nearby)), "lat");

        let out_of_range = params(&[("lat", "91"), ("lng", "13.405")]);
        assert_eq!(invalid_field(validate(&out_of_range, Endpoint::Nearby)), "lat");

        let out_of_range = params(&[("lat", "52.52"), ("lng", "-181")]);
        assert_eq!(invalid_field(validate(&out_of_range, Endpoint::Nearby)), "lng");
    }

    #[test]
    fn viewport_takes_precedence() {
        let raw = params(&[
            ("lat", "1"),
            ("lng", "1"),
            ("neLat", "52.6"),
            ("neLng", "13.5"),
            ("swLat", "52.4"),
            ("swLng", "13.3"),
        ]);
        match validate(&raw, Endpoint::Nearby).unwrap() {
            SearchRequest::Viewport(query) => {
                assert_eq!(query.north_east, GeoPoint::new(52.6, 13.5).unwrap());
                assert_eq!(query.south_west, GeoPoint::new(52.4, 13.3).unwrap());
                assert_eq!(query.limit, 20);
            }
            other => panic!("expected viewport query, got {other:?}"),
        }
    }

    #[test]
    fn incomplete_viewport_is_rejected() {
        let raw = params(&[
            ("lat", "52.52"),
            ("lng", "13.405"),
            ("neLat", "52.6"),
            ("neLng", "13.5"),
            ("swLat", "52.4"),
        ]);
        assert_eq!(invalid_field(validate(&raw, Endpoint::Nearby)), "swLng");

        let raw = params(&[
            ("neLat", "52.6"),
            ("neLng", "wide"),
            ("swLat", "52.4"),
            ("swLng", "13.3"),
        ]);
        assert_eq!(invalid_field(validate(&raw, Endpoint::Nearby)), "neLng");
    }

    #[test]
    fn inverted_viewport_latitudes_are_rejected() {
        let raw = params(&[
            ("neLat", "52.4"),
            ("neLng", "13.5"),
            ("swLat", "52.6"),
            ("swLng", "13.3"),
        ]);
        assert_eq!(invalid_field(validate(&raw, Endpoint::Nearby)), "swLat");
    }

    #[test]
    fn antimeridian_viewport_is_accepted() {
        let raw = params(&[
            ("neLat", "10"),
            ("neLng", "-170"),
            ("swLat", "-10"),
            ("swLng", "170"),
        ]);
        assert!(matches!(
            validate(&raw, Endpoint::Nearby),
            Ok(SearchRequest::Viewport(_))
        ));
    }

    #[test]
    fn parses_and_rejects_features() {
        let raw = params(&[("lat", "52.52"), ("lng", "13.405"), ("feature", "quiet")]);
        assert_eq!(
            radius_query(validate(&raw, Endpoint::Feature).unwrap()).feature,
            Some(FeatureKind::Quiet)
        );

        let raw = params(&[("lat", "52.52"), ("lng", "13.405"), ("feature", "")]);
        assert_eq!(
            radius_query(validate(&raw, Endpoint::Nearby).unwrap()).feature,
            None
        );

        let raw = params(&[("lat", "52.52"), ("lng", "13.405"), ("feature", "parking")]);
        assert_eq!(invalid_field(validate(&raw, Endpoint::Feature)), "feature");
    }

    #[test]
    fn feature_endpoint_requires_a_feature() {
        let raw = params(&[("lat", "52.52"), ("lng", "13.405")]);
        assert_eq!(invalid_field(validate(&raw, Endpoint::Feature)), "feature");

        let raw = params(&[("lat", "52.52"), ("lng", "13.405"), ("feature", " ")]);
        assert_eq!(invalid_field(validate(&raw, Endpoint::Feature)), "feature");
    }
}
