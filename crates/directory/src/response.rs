use std::fmt;

use model::{
    cafe::{Amenities, Cafe},
    location::GeoPoint,
    search::{CacheKey, FeatureKind, SearchRequest},
    WithDistance, WithId,
};
use schemars::JsonSchema;
use serde::Serialize;
use utility::id::Id;

/// Freshness contract of a search response, enforced by the HTTP cache in
/// front of the service, not by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheDirective {
    pub max_age_secs: u32,
    pub shared_max_age_secs: u32,
    pub stale_while_revalidate_secs: u32,
}

impl CacheDirective {
    pub const SEARCH: CacheDirective = CacheDirective {
        max_age_secs: 60,
        shared_max_age_secs: 60,
        stale_while_revalidate_secs: 120,
    };
}

impl fmt::Display for CacheDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "public, max-age={}, s-maxage={}, stale-while-revalidate={}",
            self.max_age_secs, self.shared_max_age_secs, self.stale_while_revalidate_secs
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub north_east: GeoPoint,
    pub south_west: GeoPoint,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CafeResult {
    pub id: Id<Cafe>,
    pub place_id: Option<String>,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Whole meters from the search center.
    pub distance: u32,
    pub address: Option<String>,
    #[serde(flatten)]
    pub amenities: Amenities,
    pub score: Option<f64>,
}

impl CafeResult {
    /// `None` for records without a location, the ranker never yields those.
    pub fn from_ranked(ranked: WithDistance<WithId<Cafe>>) -> Option<Self> {
        let WithDistance {
            distance_meters,
            content: WithId { id, content: cafe },
        } = ranked;
        let location = cafe.location?;
        Some(Self {
            score: cafe.score(),
            id,
            place_id: cafe.place_id,
            name: cafe.name,
            lat: location.latitude(),
            lng: location.longitude(),
            distance: distance_meters.round() as u32,
            address: cafe.address,
            amenities: cafe.amenities,
        })
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SearchResponse {
    pub center: GeoPoint,
    pub radius: Option<u32>,
    pub viewport: Option<Viewport>,
    pub feature: Option<FeatureKind>,
    pub cafes: Vec<CafeResult>,
}

/// A response together with the caching contract it is served under.
#[derive(Debug, Clone)]
pub struct AssembledResponse {
    pub body: SearchResponse,
    pub cache_key: CacheKey,
    pub cache_directive: CacheDirective,
}

pub fn assemble(
    request: &SearchRequest,
    ranked: Vec<WithDistance<WithId<Cafe>>>,
) -> AssembledResponse {
    let viewport = match request {
        SearchRequest::Viewport(query) => Some(Viewport {
            north_east: query.north_east,
            south_west: query.south_west,
        }),
        SearchRequest::Radius(_) => None,
    };
    AssembledResponse {
        body: SearchResponse {
            center: request.center(),
            radius: request.radius_meters(),
            viewport,
            feature: request.feature(),
            cafes: ranked.into_iter().filter_map(CafeResult::from_ranked).collect(),
        },
        cache_key: request.cache_key(),
        cache_directive: CacheDirective::SEARCH,
    }
}
