use schemars::JsonSchema;
use serde::Serialize;
use utility::geo;

/// A point on the earth's surface in degrees.
///
/// Only constructible through [`GeoPoint::new`], so latitude is always within
/// `[-90, 90]` and longitude within `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct GeoPoint {
    #[serde(rename = "lat")]
    latitude: f64,
    #[serde(rename = "lng")]
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        (is_valid_latitude(latitude) && is_valid_longitude(longitude)).then_some(
            Self {
                latitude,
                longitude,
            },
        )
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Rounds both coordinates to four decimal places.
    pub fn normalized(&self) -> Self {
        // rounding a value inside the valid range can not leave it
        Self {
            latitude: geo::round_coordinate(self.latitude),
            longitude: geo::round_coordinate(self.longitude),
        }
    }

    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        geo::haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

pub fn is_valid_latitude(latitude: f64) -> bool {
    latitude.is_finite() && (-90.0..=90.0).contains(&latitude)
}

pub fn is_valid_longitude(longitude: f64) -> bool {
    longitude.is_finite() && (-180.0..=180.0).contains(&longitude)
}

/// Axis-aligned latitude/longitude rectangle, used as a coarse pre-filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub const FULL_LONGITUDE: (f64, f64) = (-180.0, 180.0);

    /// Rectangle containing the full circle of `radius_meters` around `center`.
    pub fn around(center: &GeoPoint, radius_meters: u32) -> Self {
        let ((min_lat, min_lng), (max_lat, max_lng)) = geo::calculate_bounding_box(
            center.latitude,
            center.longitude,
            radius_meters as f64,
        );
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Uses the viewport corners as given. A viewport crossing the
    /// antimeridian (`south_west` east of `north_east`) widens to the full
    /// longitude range instead of a wrapped box.
    pub fn from_viewport(north_east: &GeoPoint, south_west: &GeoPoint) -> Self {
        let (min_lng, max_lng) = if south_west.longitude <= north_east.longitude {
            (south_west.longitude, north_east.longitude)
        } else {
            Self::FULL_LONGITUDE
        };
        Self {
            min_lat: south_west.latitude.min(north_east.latitude),
            max_lat: south_west.latitude.max(north_east.latitude),
            min_lng,
            max_lng,
        }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lng..=self.max_lng).contains(&point.longitude)
    }

    pub fn spans_all_longitudes(&self) -> bool {
        (self.min_lng, self.max_lng) == Self::FULL_LONGITUDE
    }
}
