use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Query, State},
    http::{header, HeaderName, Method},
    routing::{get, on},
    Extension, Json, Router,
};
use directory::{
    database::Database,
    response::{AssembledResponse, SearchResponse},
    validation::{Endpoint, RawSearchParams},
};
use model::cafe::Cafe;
use utility::let_also::LetAlso;

use crate::{
    common::{
        route_not_found, schema, schema_no_example, RouteErrorResponse, RouteResult,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/cafes{}", format_args!($($arg)*))
    };
}

type CachedSearch = (
    [(HeaderName, String); 1],
    Json<hateoas::Response<SearchResponse>>,
);

pub(crate) fn routes<D>(state: WebState<D>) -> Router
where
    D: Database,
{
    Router::new()
        .route("/schema", get(schema::<Cafe>))
        .route("/nearby", get(nearby::<D>))
        .route("/nearby/schema", get(schema_no_example::<SearchResponse>))
        .route("/features", get(features::<D>))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn nearby<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { directory }): State<WebState<D>>,
    Query(params): Query<RawSearchParams>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> RouteResult<CachedSearch> {
    directory
        .search(&params, Endpoint::Nearby)
        .await
        .map(|response| search_hateoas(response, "/nearby", base_url))
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn features<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { directory }): State<WebState<D>>,
    Query(params): Query<RawSearchParams>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> RouteResult<CachedSearch> {
    directory
        .search(&params, Endpoint::Feature)
        .await
        .map(|response| search_hateoas(response, "/features", base_url))
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

/// Wraps a search response with its canonical link and the caching headers
/// it may be served under.
fn search_hateoas(
    response: AssembledResponse,
    path: &str,
    base_url: Arc<BaseUrl>,
) -> CachedSearch {
    let AssembledResponse {
        body,
        cache_key,
        cache_directive,
    } = response;
    hateoas::Response::builder(body, base_url)
        .link("self", resource!("{}?{}", path, cache_key))
        .debug_info("cacheKey", cache_key.as_str())
        .build()
        .let_owned(|body| {
            (
                [(header::CACHE_CONTROL, cache_directive.to_string())],
                body.json(),
            )
        })
}
