//! Serving the frontend build from disk.

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

/// Page served with `404` when a path has no file, if the build has one.
pub const NOT_FOUND_PAGE: &str = "404.html";

/// Serve `path` from `root`.
///
/// `path` is the raw request path; its segments are percent-decoded.
/// Directories resolve to their `index.html`. Only `GET` and `HEAD` are
/// allowed. Paths that try to leave `root` are treated as missing, and missing
/// files get the build's `404.html` when there is one.
pub async fn serve(root: &Path, method: &Method, path: &str) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, HeaderValue::from_static("GET, HEAD"))],
        )
            .into_response();
    }

    let Some(mut file) = resolve(root, path) else {
        return not_found(root, method).await;
    };
    if tokio::fs::metadata(&file)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        file.push("index.html");
    }

    match read_file(&file).await {
        Some(bytes) => file_response(StatusCode::OK, &file, bytes, method),
        None => not_found(root, method).await,
    }
}

async fn not_found(root: &Path, method: &Method) -> Response {
    let page = root.join(NOT_FOUND_PAGE);
    match read_file(&page).await {
        Some(bytes) => file_response(StatusCode::NOT_FOUND, &page, bytes, method),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn read_file(file: &Path) -> Option<Vec<u8>> {
    match tokio::fs::read(file).await {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", file.display(), e);
            None
        }
    }
}

fn file_response(status: StatusCode, file: &Path, bytes: Vec<u8>, method: &Method) -> Response {
    let length = bytes.len();
    let body = if method == Method::HEAD {
        Body::empty()
    } else {
        Body::from(bytes)
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type(file)),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    response
}

/// Map a raw URL path onto `root`.
///
/// Each `/`-separated segment is percent-decoded on its own. A segment that
/// decodes to `..`, contains a separator, or is not valid UTF-8 is refused.
fn resolve(root: &Path, path: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    for raw in path.split('/') {
        let segment = percent_decode_str(raw).decode_utf8().ok()?;
        match segment.as_ref() {
            "" | "." => {}
            ".." => return None,
            s if s.contains(['/', '\\', '\0']) => return None,
            s => {
                let mut components = Path::new(s).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(name)), None) => resolved.push(name),
                    _ => return None,
                }
            }
        }
    }
    Some(resolved)
}

fn content_type(file: &Path) -> &'static str {
    let ext = file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") | Some("map") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}
