use std::{error, result};

use async_trait::async_trait;
use model::{cafe::Cafe, location::BoundingBox, WithId};

use crate::feature::FeaturePredicate;

/// Upper bound of raw candidates a single search fetches from the store.
pub const MAX_CANDIDATES: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Other(Box<dyn error::Error + Send + Sync>),
}

pub type Result<T> = result::Result<T, DatabaseError>;

/// Everything the store needs to pre-filter candidates of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateQuery {
    pub bounding_box: BoundingBox,
    pub feature: Option<FeaturePredicate>,
    pub limit: usize,
}

impl CandidateQuery {
    pub fn new(bounding_box: BoundingBox, feature: Option<FeaturePredicate>) -> Self {
        Self {
            bounding_box,
            feature,
            limit: MAX_CANDIDATES,
        }
    }

    /// In-memory evaluation of the query, for stores that cannot push it down.
    pub fn matches(&self, cafe: &Cafe) -> bool {
        let in_box = cafe
            .location
            .as_ref()
            .is_some_and(|location| self.bounding_box.contains(location));
        let has_feature = self
            .feature
            .as_ref()
            .map_or(true, |predicate| predicate.matches(&cafe.amenities));
        in_box && cafe.is_active() && has_feature
    }
}

#[async_trait]
pub trait CafeRepo {
    /// Active cafes inside the bounding box that satisfy the feature
    /// predicate, at most `query.limit` of them, in a stable order.
    async fn find_candidates(
        &mut self,
        query: &CandidateQuery,
    ) -> Result<Vec<WithId<Cafe>>>;
}

pub trait DatabaseOperations: CafeRepo + Send {}

impl<T> DatabaseOperations for T where T: CafeRepo + Send {}

/// Handle to the record store, cheap to clone and shared across requests.
pub trait Database: Clone + Send + Sync + 'static {
    type Autocommit: DatabaseOperations;

    fn auto(&self) -> Self::Autocommit;
}
