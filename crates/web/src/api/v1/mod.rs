use axum::{routing::on, Router};
use directory::database::Database;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

mod cafes;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::resource!("/v1{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes<D>(state: WebState<D>) -> Router
where
    D: Database,
{
    Router::new()
        .nest_service("/cafes", cafes::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}
