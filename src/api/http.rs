//! HTTP transport for the guestbook API.
//!
//! Requires the `http` feature. Uses axum for routing, with permissive CORS
//! and per-request tracing from tower-http.
//!
//! ## Example
//!
//! ```ignore
//! use guestbook::{api::{self, Api}, SignatureStore};
//!
//! let api = Api::new(SignatureStore::new());
//!
//! // Get the router to compose with other axum routes
//! let app = api::http::router(api.clone());
//!
//! // Or serve on a bound listener until ctrl-c
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! api::http::serve_with_shutdown(api, listener, async {
//!     let _ = tokio::signal::ctrl_c().await;
//! })
//! .await?;
//! ```

use std::future::Future;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method as HttpMethod, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{parse_body, Api, ApiError, ApiResponse};

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

/// Build an axum `Router` serving the signature routes from the given API.
pub fn router(api: Api) -> Router {
    Router::new()
        .route("/signatures", get(list_handler).post(create_handler))
        .route(
            "/signatures/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(api)
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(
    api: Api,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "guestbook listening");
    axum::serve(listener, router(api))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("guestbook stopped");
    Ok(())
}

/// `GET /signatures`
async fn list_handler(State(api): State<Api>) -> ApiResponse {
    api.list()
}

/// `GET /signatures/:id`
async fn get_handler(State(api): State<Api>, Path(id): Path<String>) -> ApiResponse {
    api.get(&id)
}

/// `POST /signatures`
async fn create_handler(State(api): State<Api>, body: Bytes) -> ApiResponse {
    match parse_body(&body) {
        Ok(body) => api.create(body.as_ref()),
        Err(err) => Err::<ApiResponse, _>(err).into(),
    }
}

/// `PUT /signatures/:id`
async fn update_handler(
    State(api): State<Api>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResponse {
    match parse_body(&body) {
        Ok(body) => api.update(&id, body.as_ref()),
        Err(err) => Err::<ApiResponse, _>(err).into(),
    }
}

/// `DELETE /signatures/:id`
async fn delete_handler(State(api): State<Api>, Path(id): Path<String>) -> ApiResponse {
    api.delete(&id)
}

async fn fallback_handler(method: HttpMethod, uri: Uri) -> ApiResponse {
    Err::<ApiResponse, _>(ApiError::UnknownRoute {
        method: method.to_string(),
        path: uri.path().to_string(),
    })
    .into()
}
