//! /demo URL structure.
//!
//! Responsibility:
//! - Define which paths exist under /demo
//! - Decide which of them sit behind bearer auth (`route_layer` on the
//!   protected subset; public routes stay outside it)

use axum::{Router, middleware, routing::get};

use crate::api::demo::handlers::{age, age_object, hello, token_uuid_version};
use crate::middleware::bearer_auth::bearer_auth_middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/token", get(token_uuid_version))
        .route_layer(middleware::from_fn_with_state(state, bearer_auth_middleware));

    Router::new()
        .route("/hello", get(hello))
        .route("/age", get(age))
        .route("/age-object", get(age_object))
        .merge(protected)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::services::auth::{TokenIssuer, TokenVerifier};

    const SECRET: &[u8] = b"test-secret-for-route-tests";

    fn test_app() -> Router {
        let state = AppState::new(Arc::new(TokenVerifier::new(SECRET)));
        Router::new()
            .nest("/demo", routes(state.clone()))
            .with_state(state)
    }

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn authed_request(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn hello_is_public() {
        let response = test_app().oneshot(request("/demo/hello")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Hello from the demo API!");
    }

    #[tokio::test]
    async fn age_adds_ten_years() {
        let response = test_app().oneshot(request("/demo/age?age=5")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"15");
    }

    #[tokio::test]
    async fn age_rejects_a_non_integer() {
        let response = test_app()
            .oneshot(request("/demo/age?age=abc"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_AGE");
    }

    #[tokio::test]
    async fn age_requires_the_parameter() {
        let response = test_app().oneshot(request("/demo/age")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_AGE");
    }

    #[tokio::test]
    async fn age_object_wraps_the_result() {
        let response = test_app()
            .oneshot(request("/demo/age-object?age=5"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body, json!({ "age": 15 }));
    }

    #[tokio::test]
    async fn token_returns_the_uuid_version() {
        let token = TokenIssuer::new(SECRET, 600).issue(Uuid::new_v4()).unwrap();

        let response = test_app()
            .oneshot(authed_request("/demo/token", &token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"4");
    }

    #[tokio::test]
    async fn token_without_a_header_is_unauthorized() {
        let response = test_app().oneshot(request("/demo/token")).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_with_a_non_bearer_scheme_is_unauthorized() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/demo/token")
                    .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let token = TokenIssuer::new(SECRET, -600).issue(Uuid::new_v4()).unwrap();

        let response = test_app()
            .oneshot(authed_request("/demo/token", &token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_unauthorized() {
        let token = TokenIssuer::new(b"some-other-secret", 600)
            .issue(Uuid::new_v4())
            .unwrap();

        let response = test_app()
            .oneshot(authed_request("/demo/token", &token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // The 401 body must not say which check rejected the request: a missing
    // header, an expired token and a bad signature all read identically.
    #[tokio::test]
    async fn unauthorized_responses_are_indistinguishable() {
        let expired = TokenIssuer::new(SECRET, -600).issue(Uuid::new_v4()).unwrap();
        let forged = TokenIssuer::new(b"some-other-secret", 600)
            .issue(Uuid::new_v4())
            .unwrap();

        let from_missing_header =
            json_body(test_app().oneshot(request("/demo/token")).await.unwrap()).await;
        let from_expired = json_body(
            test_app()
                .oneshot(authed_request("/demo/token", &expired))
                .await
                .unwrap(),
        )
        .await;
        let from_forged = json_body(
            test_app()
                .oneshot(authed_request("/demo/token", &forged))
                .await
                .unwrap(),
        )
        .await;

        let expected = json!({ "error": { "code": "UNAUTHORIZED", "message": "unauthorized" } });
        assert_eq!(from_missing_header, expected);
        assert_eq!(from_expired, expected);
        assert_eq!(from_forged, expected);
    }
}
