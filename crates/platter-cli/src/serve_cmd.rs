use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use platter_core::assets::AssetStore;
use platter_core::backend::Backend;
use platter_core::models::{MealPlan, MealSlot, PlanRequest};
use platter_core::orchestrator::{PlanError, run_plan};
use platter_core::render;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{err:#}"),
        }
    }

    /// Every pipeline failure kind is a server-side error; the message
    /// names the kind so clients can tell generation failures from
    /// malformed-plan failures.
    fn from_plan_error(err: PlanError) -> Self {
        tracing::error!(error = %err, "meal plan request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// State and router
// ---------------------------------------------------------------------------

/// Shared state: the injected generation backend and the asset store.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub store: AssetStore,
}

pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(state.store.root().to_path_buf());
    Router::new()
        .route("/", get(index))
        .route("/meal_plan", post(create_meal_plan))
        .route("/meal_plan_html/{meal_name}", get(meal_plan_html))
        .nest_service("/static", assets)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(state: AppState, bind: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("platter serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("platter serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Base URL of the current request, derived from the Host header so
/// generated links stay correct regardless of deployment host/port.
fn request_base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}/")
}

async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "platter meal-plan service. POST to /meal_plan."
    }))
}

async fn create_meal_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PlanRequest>,
) -> Result<Json<MealPlan>, AppError> {
    if request.ingredients.trim().is_empty() {
        return Err(AppError::bad_request("ingredients must not be empty"));
    }
    if request.kcal == 0 {
        return Err(AppError::bad_request("kcal must be greater than zero"));
    }

    let base_url = request_base_url(&headers);
    let plan = run_plan(state.backend.as_ref(), &state.store, &request, &base_url)
        .await
        .map_err(AppError::from_plan_error)?;
    Ok(Json(plan))
}

async fn meal_plan_html(
    State(state): State<AppState>,
    Path(meal_name): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let slot: MealSlot = meal_name
        .parse()
        .map_err(|e: platter_core::models::MealSlotParseError| AppError::bad_request(e.to_string()))?;

    let text = state
        .store
        .read_recipe(slot)
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("no recipe has been generated for {slot} yet")))?;

    let base_url = request_base_url(&headers);
    let paths = state.store.paths_for(slot);
    let image_url = state
        .store
        .public_url(&paths.image, &base_url)
        .map_err(|e| AppError::internal(anyhow::Error::new(e)))?;
    let audio_url = state
        .store
        .public_url(&paths.audio, &base_url)
        .map_err(|e| AppError::internal(anyhow::Error::new(e)))?;

    let body_html = render::render_markdown(&text);
    Ok(Html(render::recipe_page(slot, &body_html, &image_url, &audio_url)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
