use std::path::{Path, PathBuf};

use axum::{
    Router,
    http::Uri,
    middleware,
    response::{Html, IntoResponse, Response},
};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::{error::AppError, state::SharedState};

/// Swagger UI and OpenAPI document.
pub mod docs;
/// Request logging middleware.
pub mod logging;
/// Liveness route.
pub mod ping;
/// Player CRUD routes.
pub mod players;

/// Compose all route trees, wiring in shared state, documentation and the
/// static frontend served from `public_dir`.
pub fn router(state: SharedState, public_dir: &Path) -> Router<()> {
    let api_router = ping::router()
        .merge(players::router())
        .fallback(api_not_found);

    let index = public_dir.join("index.html");

    Router::new()
        .nest("/api", api_router)
        .merge(docs::router())
        .nest_service("/assets", ServeDir::new(public_dir.join("assets")))
        .fallback(move |uri: Uri| spa_index(index.clone(), uri))
        .layer(middleware::from_fn(logging::log_request))
        .with_state(state)
}

/// Unknown `/api` paths never fall through to the single-page app.
async fn api_not_found() -> AppError {
    AppError::NotFound("Not found".into())
}

/// Serve the frontend entry point for every other path, whatever the method.
/// Anything starting with `/api` (including `/apix`) stays a JSON 404.
async fn spa_index(index: PathBuf, uri: Uri) -> Response {
    if uri.path().starts_with("/api") {
        return api_not_found().await.into_response();
    }

    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            warn!(path = %index.display(), error = %err, "frontend index unavailable");
            AppError::NotFound("Not found".into()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{dao::player_store::memory::MemoryPlayerStore, state::AppState};

    fn app() -> Router {
        app_serving(&PathBuf::from("does-not-exist"))
    }

    fn app_serving(public_dir: &Path) -> Router {
        let state = AppState::new(Arc::new(MemoryPlayerStore::new()));
        router(state, public_dir)
    }

    fn public_dir_with_index(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("contoso-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<html>contoso</html>").unwrap();
        dir
    }

    async fn text_body(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn ping_answers_pong() {
        let response = send(&app(), "GET", "/api/ping", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"message": "pong"}));
    }

    #[tokio::test]
    async fn empty_store_lists_empty_array() {
        let response = send(&app(), "GET", "/api/players", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn crud_round_trip_over_http() {
        let app = app();

        let response = send(
            &app,
            "POST",
            "/api/players",
            Some(json!({"id": "ignored", "name": "Ada", "surname": "Lovelace", "balance": 100.5})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(
            created,
            json!({"id": "1", "name": "Ada", "surname": "Lovelace", "balance": 100.5})
        );

        let response = send(&app, "GET", "/api/players/1", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, created);

        let response = send(
            &app,
            "PUT",
            "/api/players/1",
            Some(json!({"name": "Ada", "surname": "King", "balance": 3})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"id": "1", "name": "Ada", "surname": "King", "balance": 3.0})
        );

        let response = send(&app, "GET", "/api/players", None).await;
        let listed = json_body(response).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
        assert_eq!(listed[0]["surname"], "King");

        let response = send(&app, "DELETE", "/api/players/1", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());

        let response = send(&app, "GET", "/api/players/1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn identifier_failures_map_to_client_errors() {
        let app = app();

        let response = send(&app, "GET", "/api/players/abc", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());

        let response = send(&app, "GET", "/api/players/999999", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, "DELETE", "/api/players/abc", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            "PUT",
            "/api/players/abc",
            Some(json!({"name": "Ada", "surname": "Lovelace", "balance": 1})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleting_unknown_player_is_no_content() {
        let response = send(&app(), "DELETE", "/api/players/424242", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn malformed_bodies_are_bad_requests() {
        let app = app();

        let request = Request::builder()
            .method("POST")
            .uri("/api/players")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, "POST", "/api/players", Some(json!({"name": "Ada"}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            "POST",
            "/api/players",
            Some(json!({"name": "Ada", "surname": "Lovelace", "balance": "lots"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            "POST",
            "/api/players",
            Some(json!({"name": "", "surname": "Lovelace"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_api_paths_return_json_not_found() {
        let response = send(&app(), "GET", "/api/unknown", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn openapi_document_lists_player_routes() {
        let response = send(&app(), "GET", "/api-doc/openapi.json", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let document = json_body(response).await;
        assert!(document["paths"]["/api/players"].is_object());
        assert!(document["paths"]["/api/players/{id}"].is_object());
    }

    #[tokio::test]
    async fn api_prefixed_paths_outside_the_api_tree_stay_json() {
        let app = app_serving(&public_dir_with_index("api-prefix"));

        let response = send(&app, "GET", "/apix", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, json!({"error": "Not found"}));

        let response = send(&app, "GET", "/api", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn frontend_index_is_served_for_any_method() {
        let app = app_serving(&public_dir_with_index("spa"));

        let response = send(&app, "GET", "/players/list", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text_body(response).await, "<html>contoso</html>");

        let response = send(&app, "POST", "/somewhere", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
    }

    #[tokio::test]
    async fn missing_frontend_build_is_not_found() {
        let response = send(&app(), "GET", "/", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
