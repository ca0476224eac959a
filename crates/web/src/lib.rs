pub use crate::common::RouteResult;

use axum::{routing::on, Router};
use config::ServerConfig;
use directory::{client::Client, database::Database};
use tokio::net::TcpListener;
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::common::{route_not_found, METHOD_FILTER_ALL};

pub mod api;
pub mod common;
pub mod config;
pub mod hateoas;
pub mod middleware;

#[derive(Debug, Clone)]
pub struct WebState<D>
where
    D: Database,
{
    pub directory: Client<D>,
}

pub fn app<D>(state: WebState<D>, config: &ServerConfig) -> Router
where
    D: Database,
{
    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
        // dropping the handler on timeout also drops the pending store fetch
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

pub async fn start_web_server<D>(
    state: WebState<D>,
    config: ServerConfig,
) -> std::io::Result<()>
where
    D: Database,
{
    let routes = app(state, &config);

    let listener = TcpListener::bind(config.bind_address).await?;
    log::info!("listening on {}", config.bind_address);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}
