use model::search::SearchRequest;

use crate::{
    database::{CafeRepo as _, CandidateQuery, Database},
    feature::FeaturePredicate,
    ranking::DistanceRanker,
    response::{self, AssembledResponse},
    validation::{self, Endpoint, RawSearchParams},
    SearchError, SearchResult,
};

/// Entry point of the proximity search. Holds nothing but the store handle,
/// every search runs as an independent pipeline.
#[derive(Debug, Clone)]
pub struct Client<D>
where
    D: Database,
{
    pub database: D,
}

impl<D> Client<D>
where
    D: Database,
{
    pub fn new(database: D) -> Self {
        Self { database }
    }

    /// Validates raw parameters, then runs the search.
    pub async fn search(
        &self,
        params: &RawSearchParams,
        endpoint: Endpoint,
    ) -> SearchResult<AssembledResponse> {
        let request = validation::validate(params, endpoint).map_err(|why| {
            log::debug!("rejected search {:?}: {}", params, why);
            why
        })?;
        self.search_request(request).await
    }

    pub async fn search_request(
        &self,
        request: SearchRequest,
    ) -> SearchResult<AssembledResponse> {
        let request = request.normalized();
        let query = CandidateQuery::new(
            request.bounding_box(),
            request.feature().map(FeaturePredicate::for_feature),
        );
        log::debug!(
            "searching {} within {:?}",
            request.cache_key(),
            query.bounding_box
        );

        let candidates = self
            .database
            .auto()
            .find_candidates(&query)
            .await
            .map_err(|why| {
                log::error!("could not fetch candidates for {}: {}", request.cache_key(), why);
                SearchError::upstream("fetch candidates", why)
            })?;
        let num_candidates = candidates.len();

        let ranked = DistanceRanker::for_request(&request).rank(candidates);
        log::debug!(
            "ranked {} of {} candidates for {}",
            ranked.len(),
            num_candidates,
            request.cache_key()
        );

        Ok(response::assemble(&request, ranked))
    }
}
