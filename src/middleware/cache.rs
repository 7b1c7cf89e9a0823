use axum::{
    body::Body,
    http::{HeaderValue, Request, Response, header},
    middleware::Next,
};

use crate::upload::UPLOAD_URL_PREFIX;

/// Middleware to set cache control headers
/// - Uploaded images: cached for a year, their names are random and never reused
/// - Other static files: revalidated on every use
/// - All other routes: no caching
pub async fn cache_control_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let path = req.uri().path();
    let is_upload = path.starts_with(UPLOAD_URL_PREFIX);
    let is_static_file = path.starts_with("/static/");

    let mut response = next.run(req).await;
    let is_success = response.status().is_success();
    let headers = response.headers_mut();

    if is_upload && is_success {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=31536000, immutable"),
        );
    } else if is_static_file && is_success {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, no-cache"),
        );
    } else {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/static/uploads/heroes/{name}", get(|| async { "image" }))
            .route("/static/css/style.css", get(|| async { "body {}" }))
            .route("/", get(|| async { "home" }))
            .layer(middleware::from_fn(cache_control_middleware))
    }

    async fn cache_control(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let value = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        (response.status(), value)
    }

    #[tokio::test]
    async fn test_uploads_are_immutable() {
        let (status, value) = cache_control("/static/uploads/heroes/ab12.png").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, "public, max-age=31536000, immutable");
    }

    #[tokio::test]
    async fn test_stylesheet_is_revalidated() {
        let (status, value) = cache_control("/static/css/style.css").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, "public, no-cache");
    }

    #[tokio::test]
    async fn test_pages_and_missing_files_are_not_stored() {
        let (_, value) = cache_control("/").await;
        assert!(value.starts_with("no-store"));

        let (status, value) = cache_control("/static/uploads/missing/ab12.png").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(value.starts_with("no-store"));
    }
}
