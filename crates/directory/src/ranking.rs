use model::{
    cafe::Cafe, location::GeoPoint, search::SearchRequest, WithDistance, WithId,
};

/// Orders candidates by great-circle distance from a center.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRanker {
    center: GeoPoint,
    /// Exact cutoff in meters, `None` keeps every candidate.
    radius_meters: Option<f64>,
    limit: usize,
}

impl DistanceRanker {
    pub fn new(center: GeoPoint, radius_meters: Option<f64>, limit: usize) -> Self {
        Self {
            center,
            radius_meters,
            limit,
        }
    }

    /// Radius searches cut off at their radius, viewport searches keep
    /// everything the store returned for the box.
    pub fn for_request(request: &SearchRequest) -> Self {
        Self::new(
            request.center(),
            request.radius_meters().map(f64::from),
            request.limit(),
        )
    }

    pub fn rank(&self, candidates: Vec<WithId<Cafe>>) -> Vec<WithDistance<WithId<Cafe>>> {
        let mut ranked = candidates
            .into_iter()
            .filter_map(|cafe| {
                cafe.content
                    .with_distance_to(&self.center)
                    .map(|with_distance| with_distance.with_id(cafe.id))
            })
            .filter(|cafe| {
                self.radius_meters
                    .map_or(true, |radius| cafe.distance_meters <= radius)
            })
            .collect::<Vec<_>>();

        // stable, equal distances keep the store's order
        ranked.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
        ranked.truncate(self.limit);
        ranked
    }
}
