/// Request extractors that reject with [`ApiError`]
///
/// axum's own `Json`, `Path` and `Query` answer bad input with a plain-text
/// body. These wrappers run the same extraction and turn the rejection into
/// the JSON error body every other failure uses.
///
/// ```text
/// POST /users/register  {"username": "alice"}
/// -> 422 { "error": "validation_error", "details": [{ "field": "body", ... }] }
///
/// GET /songs/abc
/// -> 400 { "error": "bad_request", "message": "Invalid URL: ..." }
/// ```

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Path parameters
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// Query string parameters
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::Request,
        http::StatusCode,
        routing::{get, post},
        Router,
    };
    use serde::Deserialize;
    use serde_json::Value;
    use tower::Service as _;

    #[derive(Deserialize)]
    struct Greeting {
        name: String,
    }

    #[derive(Deserialize)]
    struct Paging {
        limit: Option<i64>,
    }

    async fn greet(AppJson(greeting): AppJson<Greeting>) -> String {
        greeting.name
    }

    async fn item(AppPath(id): AppPath<i64>, AppQuery(paging): AppQuery<Paging>) -> String {
        format!("{id}:{:?}", paging.limit)
    }

    fn app() -> Router {
        Router::new()
            .route("/greet", post(greet))
            .route("/items/:id", get(item))
    }

    async fn send(request: Request) -> (StatusCode, Value) {
        let response = app().call(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    fn post_json(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/greet")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_field_is_a_json_422() {
        let (status, json) = send(post_json(r#"{"nickname": "al"}"#)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["details"][0]["field"], "body");
        assert!(json["details"][0]["message"]
            .as_str()
            .unwrap()
            .contains("name"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_json_400() {
        let (status, json) = send(post_json(r#"{"name": "#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_a_json_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/greet")
            .body(Body::from(r#"{"name": "al"}"#))
            .unwrap();
        let (status, json) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_bad_path_and_query_are_json_400s() {
        let request = |uri: &str| Request::builder().uri(uri).body(Body::empty()).unwrap();

        let (status, json) = send(request("/items/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "bad_request");

        let (status, json) = send(request("/items/7?limit=lots")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "bad_request");

        let response = app().call(request("/items/7?limit=3")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
