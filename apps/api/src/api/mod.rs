//! API routes module

pub mod ready;
pub mod tasks;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .nest("/tasks", tasks::router(state))
        .merge(ready::router(state.clone()))
}

async fn welcome() -> &'static str {
    "Welcome to test-backend"
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_welcome_message() {
        let app = Router::new().route("/", get(super::welcome));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Welcome to test-backend");
    }
}
