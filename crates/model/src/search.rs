use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::Serialize;
use utility::geo;

use crate::location::{BoundingBox, GeoPoint};

/// Amenity a search can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Wifi,
    Outlets,
    Quiet,
    NoTimeLimit,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 4] = [
        FeatureKind::Wifi,
        FeatureKind::Outlets,
        FeatureKind::Quiet,
        FeatureKind::NoTimeLimit,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            FeatureKind::Wifi => "wifi",
            FeatureKind::Outlets => "outlets",
            FeatureKind::Quiet => "quiet",
            FeatureKind::NoTimeLimit => "no_time_limit",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feature `{0}`")]
pub struct UnknownFeature(pub String);

impl FromStr for FeatureKind {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keyword = s.trim().to_ascii_lowercase().replace('-', "_");
        FeatureKind::ALL
            .into_iter()
            .find(|feature| feature.keyword() == keyword)
            .ok_or_else(|| UnknownFeature(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadiusQuery {
    pub center: GeoPoint,
    pub radius_meters: u32,
    pub limit: usize,
    pub feature: Option<FeatureKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportQuery {
    pub north_east: GeoPoint,
    pub south_west: GeoPoint,
    pub limit: usize,
    pub feature: Option<FeatureKind>,
}

impl ViewportQuery {
    /// Midpoint of the viewport, taking the short way across the antimeridian
    /// when the viewport crosses it.
    pub fn center(&self) -> GeoPoint {
        let latitude = (self.north_east.latitude() + self.south_west.latitude()) / 2.0;
        let west = self.south_west.longitude();
        let mut east = self.north_east.longitude();
        if west > east {
            east += 360.0;
        }
        let mut longitude = (west + east) / 2.0;
        if longitude > 180.0 {
            longitude -= 360.0;
        }
        GeoPoint::new(latitude, longitude).unwrap_or(self.north_east)
    }
}

/// A validated proximity search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRequest {
    Radius(RadiusQuery),
    Viewport(ViewportQuery),
}

impl SearchRequest {
    pub fn feature(&self) -> Option<FeatureKind> {
        match self {
            SearchRequest::Radius(query) => query.feature,
            SearchRequest::Viewport(query) => query.feature,
        }
    }

    pub fn limit(&self) -> usize {
        match self {
            SearchRequest::Radius(query) => query.limit,
            SearchRequest::Viewport(query) => query.limit,
        }
    }

    /// Point distances are measured from.
    pub fn center(&self) -> GeoPoint {
        match self {
            SearchRequest::Radius(query) => query.center,
            SearchRequest::Viewport(query) => query.center(),
        }
    }

    pub fn radius_meters(&self) -> Option<u32> {
        match self {
            SearchRequest::Radius(query) => Some(query.radius_meters),
            SearchRequest::Viewport(_) => None,
        }
    }

    /// Rounds the radius center to four decimal places.
    ///
    /// Viewport corners bound the search box directly and stay as given,
    /// rounding them could move an edge inward. The cache key rounds them on
    /// its own.
    pub fn normalized(self) -> Self {
        match self {
            SearchRequest::Radius(query) => SearchRequest::Radius(RadiusQuery {
                center: query.center.normalized(),
                ..query
            }),
            viewport @ SearchRequest::Viewport(_) => viewport,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            SearchRequest::Radius(query) => {
                BoundingBox::around(&query.center, query.radius_meters)
            }
            SearchRequest::Viewport(query) => {
                BoundingBox::from_viewport(&query.north_east, &query.south_west)
            }
        }
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::of(self)
    }
}

/// Deterministic key of a search, built from its normalized form.
///
/// It reads as the canonical query string of the request, so it doubles as
/// the link to the cached resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn of(request: &SearchRequest) -> Self {
        let mut pairs: Vec<(&str, String)> = match request.clone().normalized() {
            SearchRequest::Radius(query) => vec![
                ("lat", coordinate(query.center.latitude())),
                ("lng", coordinate(query.center.longitude())),
                ("radius", query.radius_meters.to_string()),
            ],
            SearchRequest::Viewport(query) => vec![
                ("neLat", coordinate(query.north_east.latitude())),
                ("neLng", coordinate(query.north_east.longitude())),
                ("swLat", coordinate(query.south_west.latitude())),
                ("swLng", coordinate(query.south_west.longitude())),
            ],
        };
        if let Some(feature) = request.feature() {
            pairs.push(("feature", feature.keyword().to_owned()));
        }
        pairs.push(("limit", request.limit().to_string()));

        let query = pairs
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");
        Self(query)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn coordinate(value: f64) -> String {
    format!(
        "{:.*}",
        geo::COORDINATE_PRECISION as usize,
        geo::round_coordinate(value)
    )
}
