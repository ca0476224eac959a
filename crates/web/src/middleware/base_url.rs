use axum::{
    extract::{self},
    http::HeaderMap,
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;

/// Scheme, host and path prefix the client used to reach us, so links in
/// responses survive reverse proxies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    proto: String,
    host: String,
    prefix: String,
}

impl BaseUrl {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let proto = forwarded(headers, "x-forwarded-proto").unwrap_or("http");
        let host = forwarded(headers, "x-forwarded-host")
            .or_else(|| forwarded(headers, "host"))
            .unwrap_or("localhost");
        let prefix = forwarded(headers, "x-forwarded-prefix")
            .unwrap_or("")
            .trim_end_matches('/');

        BaseUrl {
            proto: proto.to_owned(),
            host: host.to_owned(),
            prefix: prefix.to_owned(),
        }
    }

    pub fn full_url<S: Into<String>>(&self, path: S) -> String {
        format!(
            "{}://{}{}{}",
            self.proto,
            self.host,
            self.prefix,
            path.into()
        )
    }
}

/// First value of a header, proxies append theirs comma separated.
fn forwarded<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub async fn base_url_middleware(req: extract::Request, next: Next) -> impl IntoResponse {
    let base_url = BaseUrl::from_headers(req.headers());

    let mut req = req;
    req.extensions_mut().insert(Arc::new(base_url));

    next.run(req).await
}
