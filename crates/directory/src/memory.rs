use std::sync::Arc;

use async_trait::async_trait;
use model::{cafe::Cafe, WithId};

use crate::database::{CafeRepo, CandidateQuery, Database, Result};

/// Read-only store over a fixed set of cafes, evaluating candidate queries in
/// memory. Candidates come back in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    cafes: Arc<Vec<WithId<Cafe>>>,
}

impl MemoryDatabase {
    pub fn new(cafes: Vec<WithId<Cafe>>) -> Self {
        Self {
            cafes: Arc::new(cafes),
        }
    }
}

pub struct MemoryAutocommit {
    cafes: Arc<Vec<WithId<Cafe>>>,
}

impl Database for MemoryDatabase {
    type Autocommit = MemoryAutocommit;

    fn auto(&self) -> Self::Autocommit {
        MemoryAutocommit {
            cafes: self.cafes.clone(),
        }
    }
}

#[async_trait]
impl CafeRepo for MemoryAutocommit {
    async fn find_candidates(
        &mut self,
        query: &CandidateQuery,
    ) -> Result<Vec<WithId<Cafe>>> {
        Ok(self
            .cafes
            .iter()
            .filter(|cafe| query.matches(&cafe.content))
            .take(query.limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use model::{location::BoundingBox, location::GeoPoint, search::FeatureKind, ExampleData};
    use utility::id::Id;

    use super::*;
    use crate::feature::FeaturePredicate;

    fn cafe(id: &str, latitude: f64, longitude: f64) -> WithId<Cafe> {
        WithId::new(
            Id::new(id.to_owned()),
            Cafe {
                location: GeoPoint::new(latitude, longitude),
                ..Cafe::example_data()
            },
        )
    }

    fn berlin_box() -> BoundingBox {
        BoundingBox {
            min_lat: 52.4,
            max_lat: 52.6,
            min_lng: 13.3,
            max_lng: 13.5,
        }
    }

    async fn ids(database: &MemoryDatabase, query: CandidateQuery) -> Vec<String> {
        database
            .auto()
            .find_candidates(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|cafe| cafe.id.raw())
            .collect()
    }

    #[tokio::test]
    async fn filters_by_box_and_active_flag() {
        let mut inactive = cafe("inactive", 52.5, 13.4);
        inactive.content.is_active = Some(false);
        let mut unflagged = cafe("unflagged", 52.5, 13.4);
        unflagged.content.is_active = None;
        let mut unlocated = cafe("unlocated", 52.5, 13.4);
        unlocated.content.location = None;

        let database = MemoryDatabase::new(vec![
            cafe("inside", 52.5, 13.4),
            cafe("outside", 48.1, 11.5),
            inactive,
            unflagged,
            unlocated,
        ]);
        assert_eq!(
            ids(&database, CandidateQuery::new(berlin_box(), None)).await,
            vec!["inside", "unflagged"]
        );
    }

    #[tokio::test]
    async fn applies_feature_predicate_and_cap() {
        let mut limited = cafe("limited", 52.5, 13.4);
        limited.content.amenities.laptop_policy = Some("2 hour limit".to_owned());
        let database = MemoryDatabase::new(vec![
            limited,
            cafe("unlimited-1", 52.5, 13.4),
            cafe("unlimited-2", 52.5, 13.4),
        ]);

        let predicate = FeaturePredicate::for_feature(FeatureKind::NoTimeLimit);
        let query = CandidateQuery::new(berlin_box(), Some(predicate));
        assert_eq!(
            ids(&database, query.clone()).await,
            vec!["unlimited-1", "unlimited-2"]
        );

        let capped = CandidateQuery { limit: 1, ..query };
        assert_eq!(ids(&database, capped).await, vec!["unlimited-1"]);
    }
}
