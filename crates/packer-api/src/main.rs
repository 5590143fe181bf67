use axum::{
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use packer_core::{render_result, Packer, PackingError, PackingRequest, PackingResult, SvgOptions};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Packer API");

    let app = Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
        .route("/api/pack", post(pack))
        .route("/api/generate/svg", post(generate_svg))
        .layer(CorsLayer::permissive());

    let addr = std::env::var("PACKER_API_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Try: curl http://localhost:3000/api/health");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "packer-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Main packing endpoint
async fn pack(Json(request): Json<PackingRequest>) -> Result<Json<PackingResult>, AppError> {
    info!(
        "Received packing request with {} item entries, container side {}, algorithm {}",
        request.items.len(),
        request.container_size,
        request.algorithm.name()
    );

    // Searches may run for seconds; keep them off the async workers.
    let result = tokio::task::spawn_blocking(move || Packer::new(request)?.pack()).await??;

    info!(
        "Packing complete: {} containers, {:.2}% waste, score {:.3}",
        result.summary.total_containers, result.summary.waste_percentage, result.summary.score
    );

    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct SvgParams {
    scale: Option<f64>,
}

/// Generate SVG visualization
async fn generate_svg(
    Query(params): Query<SvgParams>,
    Json(result): Json<PackingResult>,
) -> Result<Response, AppError> {
    info!(
        "Generating SVG for {} containers",
        result.solution.num_containers()
    );

    let mut options = SvgOptions::default();
    if let Some(scale) = params.scale.filter(|s| s.is_finite() && *s > 0.0) {
        options.scale = scale;
    }
    let svg = render_result(&result, options).map_err(|err| AppError(err.into()))?;

    Ok((StatusCode::OK, [("Content-Type", "image/svg+xml")], svg).into_response())
}

async fn index() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Packer</title>
</head>
<body>
    <h1>Packer API</h1>
    <h2>API Endpoints:</h2>
    <ul>
        <li>GET /api/health - Health check</li>
        <li>POST /api/pack - Pack a request</li>
        <li>POST /api/generate/svg - Render a result as SVG</li>
    </ul>
</body>
</html>"#,
    )
}

/// Application error type
struct AppError(anyhow::Error);

impl From<PackingError> for AppError {
    fn from(err: PackingError) -> Self {
        AppError(err.into())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        // Every core error describes a problem with the request itself.
        let status = if self.0.is::<PackingError>() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
