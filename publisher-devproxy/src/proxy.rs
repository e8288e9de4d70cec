//! Request forwarding to the backend.
//!
//! The path and query go upstream unchanged, as do the method, end-to-end
//! headers and body. The upstream response is streamed back as it arrives, so
//! server-sent events keep flowing.

use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::TryStreamExt;
use publisher_types::RouteRule;

/// Connection-level headers that must not be forwarded.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Forward `req` to the backend named by `rule`.
///
/// Request bodies larger than `max_body` bytes are refused with `413`. An
/// unreachable backend yields `502`.
pub async fn forward(
    client: &reqwest::Client,
    rule: &RouteRule,
    req: Request,
    max_body: usize,
) -> Response {
    let (parts, body) = req.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = rule.upstream_url(path_and_query);

    let body = match axum::body::to_bytes(body, max_body).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Rejecting {} {}: {}", parts.method, url, e);
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("request body exceeds {max_body} bytes"),
            )
                .into_response();
        }
    };

    let mut headers = parts.headers;
    strip_hop_by_hop(&mut headers);
    // reqwest derives the length from the buffered body.
    headers.remove(header::CONTENT_LENGTH);

    let upstream = client
        .request(parts.method.clone(), &url)
        .headers(headers)
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Backend unreachable for {} {}: {}", parts.method, url, e);
            return (
                StatusCode::BAD_GATEWAY,
                format!("backend unreachable: {}", rule.target()),
            )
                .into_response();
        }
    };

    tracing::debug!("{} {} <- {}", parts.method, url, upstream.status());

    let status = upstream.status();
    let mut response_headers = upstream.headers().clone();
    strip_hop_by_hop(&mut response_headers);

    let stream = upstream.bytes_stream().map_err(|e| {
        tracing::warn!("Backend stream interrupted: {}", e);
        e
    });

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    response
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    // Headers named in `Connection` are hop-by-hop as well.
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in HOP_BY_HOP.iter().chain(listed.iter()) {
        headers.remove(name);
    }
}
