use model::{
    cafe::{Amenities, Cafe},
    location::GeoPoint,
};
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct CafeRow {
    pub id: String,
    pub place_id: Option<String>,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub wifi: Option<String>,
    pub outlets: Option<String>,
    pub noise_level: Option<String>,
    pub laptop_policy: Option<String>,
    pub rating: Option<f64>,
    pub google_rating: Option<f64>,
    pub is_active: Option<bool>,
}

impl DatabaseRow for CafeRow {
    type Model = Cafe;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id.clone())
    }

    fn to_model(self) -> Self::Model {
        Cafe {
            place_id: self.place_id,
            name: self.name,
            // rows with out-of-range coordinates are treated as unlocated
            location: match (self.latitude, self.longitude) {
                (Some(lat), Some(long)) => GeoPoint::new(lat, long),
                _ => None,
            },
            address: self.address,
            amenities: Amenities {
                wifi: self.wifi,
                outlets: self.outlets,
                noise_level: self.noise_level,
                laptop_policy: self.laptop_policy,
            },
            rating: self.rating,
            google_rating: self.google_rating,
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CafeRow {
        CafeRow {
            id: "fleury".to_owned(),
            place_id: None,
            name: "Café Fleury".to_owned(),
            latitude: Some(52.5303),
            longitude: Some(13.4013),
            address: None,
            wifi: Some("free".to_owned()),
            outlets: None,
            noise_level: None,
            laptop_policy: None,
            rating: None,
            google_rating: Some(4.1),
            is_active: None,
        }
    }

    #[test]
    fn converts_row_to_model() {
        let row = row();
        assert_eq!(row.get_id().raw(), "fleury");
        let cafe = row.to_model();
        assert_eq!(cafe.location, GeoPoint::new(52.5303, 13.4013));
        assert_eq!(cafe.amenities.wifi.as_deref(), Some("free"));
        assert_eq!(cafe.score(), Some(4.1));
        assert!(cafe.is_active());
    }

    #[test]
    fn incomplete_or_invalid_coordinates_mean_no_location() {
        let cafe = CafeRow {
            longitude: None,
            ..row()
        }
        .to_model();
        assert!(cafe.location.is_none());

        let cafe = CafeRow {
            latitude: Some(123.0),
            ..row()
        }
        .to_model();
        assert!(cafe.location.is_none());
    }
}
