use model::{
    cafe::{AmenityField, Amenities, UNKNOWN},
    search::FeatureKind,
};

/// Noise levels that count as quiet enough to work.
pub const QUIET_NOISE_LEVELS: &[&str] = &["quiet", "moderate"];

/// Marker in the laptop policy of cafes without a time limit.
pub const UNLIMITED_STAY: &str = "unlimited";

/// A single check on one amenity field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The field is set and not the `unknown` sentinel.
    Known(AmenityField),
    /// The field equals one of the values exactly.
    OneOf(AmenityField, &'static [&'static str]),
    /// The field contains the needle, ignoring case.
    ContainsIgnoreCase(AmenityField, &'static str),
}

impl Condition {
    pub fn field(&self) -> AmenityField {
        match self {
            Condition::Known(field)
            | Condition::OneOf(field, _)
            | Condition::ContainsIgnoreCase(field, _) => *field,
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            Condition::Known(_) => value != UNKNOWN,
            Condition::OneOf(_, values) => values.contains(&value),
            Condition::ContainsIgnoreCase(_, needle) => {
                value.to_lowercase().contains(&needle.to_lowercase())
            }
        }
    }
}

/// Declarative amenity filter handed to the record store. All conditions
/// have to hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturePredicate {
    pub feature: FeatureKind,
    pub conditions: Vec<Condition>,
}

impl FeaturePredicate {
    pub fn for_feature(feature: FeatureKind) -> Self {
        let conditions = match feature {
            FeatureKind::Wifi => vec![Condition::Known(AmenityField::Wifi)],
            FeatureKind::Outlets => vec![Condition::Known(AmenityField::Outlets)],
            FeatureKind::Quiet => vec![Condition::OneOf(
                AmenityField::NoiseLevel,
                QUIET_NOISE_LEVELS,
            )],
            FeatureKind::NoTimeLimit => vec![
                Condition::Known(AmenityField::LaptopPolicy),
                Condition::ContainsIgnoreCase(
                    AmenityField::LaptopPolicy,
                    UNLIMITED_STAY,
                ),
            ],
        };
        Self {
            feature,
            conditions,
        }
    }

    pub fn matches(&self, amenities: &Amenities) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(amenities.get(condition.field())))
    }
}
