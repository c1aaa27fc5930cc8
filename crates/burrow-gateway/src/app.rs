use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{add_form_handler, add_query_handler, health_handler, redirect_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/add", get(add_query_handler).post(add_form_handler))
            .route("/{key}", get(redirect_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::ADD_FORM;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use burrow_core::KeyStore;
    use burrow_generator::Base62Generator;
    use burrow_storage::{LogStore, StoreSettings};
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    struct Fixture {
        _dir: TempDir,
        store: Arc<LogStore<Base62Generator>>,
        router: Router,
    }

    impl Fixture {
        async fn new() -> Self {
            let dir = tempdir().unwrap();
            let settings = StoreSettings::builder()
                .path(dir.path().join("store.json"))
                .build();
            let store = Arc::new(LogStore::open(settings, Base62Generator).await.unwrap());
            let router = App::router(AppState::new(store.clone()));
            Self {
                _dir: dir,
                store,
                router,
            }
        }

        async fn send(&self, request: Request<Body>) -> Response {
            self.router.clone().oneshot(request).await.unwrap()
        }
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn add_without_url_renders_form() {
        let fixture = Fixture::new().await;

        let response = fixture.send(get("/add")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert_eq!(body_string(response).await, ADD_FORM);
        assert_eq!(fixture.store.count(), 0);
    }

    #[tokio::test]
    async fn post_with_empty_url_renders_form() {
        let fixture = Fixture::new().await;

        let response = fixture.send(post_form("/add", "url=")).await;
        assert_eq!(body_string(response).await, ADD_FORM);
        assert_eq!(fixture.store.count(), 0);
    }

    #[tokio::test]
    async fn post_stores_url_and_returns_key() {
        let fixture = Fixture::new().await;

        let response = fixture
            .send(post_form("/add", "url=https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let key = body_string(response).await;

        assert_eq!(key, "a");
        assert_eq!(
            fixture.store.get(&key).as_deref(),
            Some("https://example.com/a?b=c")
        );
    }

    #[tokio::test]
    async fn add_accepts_query_string() {
        let fixture = Fixture::new().await;

        let response = fixture.send(get("/add?url=https://example.com")).await;
        let key = body_string(response).await;

        assert_eq!(fixture.store.get(&key).as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn known_key_redirects() {
        let fixture = Fixture::new().await;
        let key = fixture.store.put("https://example.com/target").await;

        let response = fixture.send(get(&format!("/{key}"))).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/target"
        );
    }

    #[tokio::test]
    async fn unknown_key_is_not_found() {
        let fixture = Fixture::new().await;

        let response = fixture.send(get("/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_key_is_not_found() {
        let fixture = Fixture::new().await;

        let response = fixture.send(get("/favicon.ico")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn root_is_not_found() {
        let fixture = Fixture::new().await;

        let response = fixture.send(get("/")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_entries() {
        let fixture = Fixture::new().await;
        fixture.store.put("https://example.com").await;

        let response = fixture.send(get("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            r#"{"status":"ok","entries":1}"#
        );
    }
}
