use directory::{
    database::{CandidateQuery, Result},
    feature::{Condition, FeaturePredicate},
};
use model::{
    cafe::{AmenityField, Cafe, UNKNOWN},
    WithId,
};
use sqlx::{Executor, Postgres, QueryBuilder};
use utility::let_also::LetAlso;

use crate::data_model::{cafe::CafeRow, with_ids};

use super::convert_error;

pub async fn find_candidates<'c, E>(
    executor: E,
    query: &CandidateQuery,
) -> Result<Vec<WithId<Cafe>>>
where
    E: Executor<'c, Database = Postgres>,
{
    candidate_query(query)
        .build_query_as::<CafeRow>()
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|cafes: Vec<CafeRow>| Ok(with_ids(cafes)))
}

fn candidate_query(query: &CandidateQuery) -> QueryBuilder<'static, Postgres> {
    let bbox = &query.bounding_box;
    let mut builder = QueryBuilder::new(
        "
        SELECT
            id, place_id, name, latitude, longitude, address,
            wifi, outlets, noise_level, laptop_policy,
            rating, google_rating, is_active
        FROM
            cafes
        WHERE
            latitude BETWEEN ",
    );
    builder
        .push_bind(bbox.min_lat)
        .push(" AND ")
        .push_bind(bbox.max_lat);
    // a full longitude range filters nothing
    if !bbox.spans_all_longitudes() {
        builder
            .push(" AND longitude BETWEEN ")
            .push_bind(bbox.min_lng)
            .push(" AND ")
            .push_bind(bbox.max_lng);
    } else {
        builder.push(" AND longitude IS NOT NULL");
    }
    builder.push(" AND is_active IS DISTINCT FROM FALSE");
    if let Some(predicate) = &query.feature {
        push_feature_predicate(&mut builder, predicate);
    }
    builder
        .push(" ORDER BY id LIMIT ")
        .push_bind(query.limit as i64);
    builder
}

fn push_feature_predicate(
    builder: &mut QueryBuilder<'static, Postgres>,
    predicate: &FeaturePredicate,
) {
    for condition in predicate.conditions.iter() {
        let column = column(condition.field());
        match condition {
            Condition::Known(_) => {
                builder
                    .push(format!(" AND {column} IS NOT NULL AND {column} <> "))
                    .push_bind(UNKNOWN);
            }
            Condition::OneOf(_, values) => {
                builder.push(format!(" AND {column} IN ("));
                let mut separated = builder.separated(", ");
                for value in values.iter() {
                    separated.push_bind(*value);
                }
                separated.push_unseparated(")");
            }
            Condition::ContainsIgnoreCase(_, needle) => {
                builder
                    .push(format!(" AND {column} ILIKE "))
                    .push_bind(format!("%{}%", escape_like(needle)));
            }
        }
    }
}

fn column(field: AmenityField) -> &'static str {
    match field {
        AmenityField::Wifi => "wifi",
        AmenityField::Outlets => "outlets",
        AmenityField::NoiseLevel => "noise_level",
        AmenityField::LaptopPolicy => "laptop_policy",
    }
}

fn escape_like(pattern: &str) -> String {
    pattern
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
