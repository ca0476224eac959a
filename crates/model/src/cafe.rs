use schemars::JsonSchema;
use serde::Serialize;
use utility::{fallback::first_present, id::HasId};

use crate::{location::GeoPoint, ExampleData, WithDistance};

/// Sentinel stored in amenity fields when nobody has reported a value yet.
pub const UNKNOWN: &str = "unknown";

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Cafe {
    pub place_id: Option<String>,
    pub name: String,
    #[serde(skip)]
    pub location: Option<GeoPoint>,
    pub address: Option<String>,
    #[serde(flatten)]
    pub amenities: Amenities,
    pub rating: Option<f64>,
    pub google_rating: Option<f64>,
    #[serde(skip)]
    pub is_active: Option<bool>,
}

impl Cafe {
    /// Ranking score, in order of precedence:
    ///
    /// 1. `rating`, the directory's own community rating
    /// 2. `google_rating`, imported from the legacy listing
    ///
    /// Absent when neither is set.
    pub fn score(&self) -> Option<f64> {
        first_present([self.rating, self.google_rating])
    }

    /// Inactive means explicitly deactivated, a missing flag counts as active.
    pub fn is_active(&self) -> bool {
        self.is_active != Some(false)
    }

    pub fn with_distance_to(self, point: &GeoPoint) -> Option<WithDistance<Cafe>> {
        let distance = self.location.as_ref()?.distance_to(point);
        Some(WithDistance::new(distance, self))
    }
}

impl HasId for Cafe {
    type IdType = String;
}

impl ExampleData for Cafe {
    fn example_data() -> Self {
        Cafe {
            place_id: Some("ChIJAVkDPzdOqEcRcDteW0YgIQQ".to_owned()),
            name: "Café Fleury".to_owned(),
            location: GeoPoint::new(52.5303, 13.4013),
            address: Some("Weinbergsweg 20, 10119 Berlin".to_owned()),
            amenities: Amenities {
                wifi: Some("free".to_owned()),
                outlets: Some("some".to_owned()),
                noise_level: Some("moderate".to_owned()),
                laptop_policy: Some("Unlimited stay".to_owned()),
            },
            rating: Some(4.4),
            google_rating: None,
            is_active: Some(true),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, JsonSchema)]
pub struct Amenities {
    pub wifi: Option<String>,
    pub outlets: Option<String>,
    pub noise_level: Option<String>,
    pub laptop_policy: Option<String>,
}

impl Amenities {
    pub fn get(&self, field: AmenityField) -> Option<&str> {
        match field {
            AmenityField::Wifi => self.wifi.as_deref(),
            AmenityField::Outlets => self.outlets.as_deref(),
            AmenityField::NoiseLevel => self.noise_level.as_deref(),
            AmenityField::LaptopPolicy => self.laptop_policy.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmenityField {
    Wifi,
    Outlets,
    NoiseLevel,
    LaptopPolicy,
}
