//! Query server for district lookup.
//!
//! Provides HTTP API for district search, reverse lookup and forecast grid
//! resolution.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use dongne::districts::{from_location, DistrictIndex};
use dongne::forecast::{forecast_base, kst_now, nowcast_base, GridQuery};
use dongne::{format_for_display, CoordinateResolver, CoordinateTables, Location, Locator};

mod config;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "District lookup query server")]
struct Args {
    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,

    /// District JSON file path or URL (overrides config)
    #[arg(long)]
    districts: Option<String>,
}

/// Application state shared across handlers
struct AppState {
    locator: Locator,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(districts) = args.districts {
        config.districts.source = districts;
    }

    info!("Dongne Query Server");
    info!("District source: {}", config.districts.source);

    let locator = Locator::new(
        DistrictIndex::from_boxed(from_location(&config.districts.source)),
        CoordinateResolver::new(CoordinateTables::korea()),
    );

    // Warm the index; failures are logged and retried on first request.
    let count = locator.index().load().await.len();
    info!("{} districts available", count);

    let state = Arc::new(AppState { locator });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/search", get(search_handler))
        .route("/v1/reverse", get(reverse_handler))
        .route("/v1/grid", get(grid_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let districts = state.locator.index().load().await.len();

    Json(HealthResponse {
        status: if districts > 0 { "ok" } else { "degraded" },
        districts,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    districts: usize,
}

/// Free-text district search
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQueryParams>,
) -> Json<SearchResponse> {
    let features = state.locator.search(&params.text).await;
    Json(SearchResponse { features })
}

/// Nearest district to a point
async fn reverse_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseQueryParams>,
) -> Json<ReverseResponse> {
    let district = state
        .locator
        .nearest(params.point_lat, params.point_lon)
        .await;

    Json(ReverseResponse {
        display_name: format_for_display(district.as_deref()),
        district,
    })
}

/// Forecast grid cell and provider query parameters for a point
async fn grid_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GridQueryParams>,
) -> Json<GridResponse> {
    let cell = state.locator.grid_for(params.lat, params.lon);
    let now = kst_now();

    let nowcast = GridQuery::new(cell, nowcast_base(now));
    let forecast = GridQuery::new(cell, forecast_base(now));

    Json(GridResponse {
        nx: cell.nx,
        ny: cell.ny,
        nowcast: nowcast.query_pairs().into_iter().collect(),
        forecast: forecast.query_pairs().into_iter().collect(),
    })
}

#[derive(Deserialize)]
struct SearchQueryParams {
    /// Search text
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ReverseQueryParams {
    /// Point latitude
    #[serde(rename = "point.lat")]
    point_lat: f64,
    /// Point longitude
    #[serde(rename = "point.lon")]
    point_lon: f64,
}

#[derive(Deserialize)]
struct GridQueryParams {
    lat: f64,
    lon: f64,
}

#[derive(Serialize)]
struct SearchResponse {
    features: Vec<Location>,
}

#[derive(Serialize)]
struct ReverseResponse {
    district: Option<String>,
    display_name: Option<String>,
}

#[derive(Serialize)]
struct GridResponse {
    nx: i32,
    ny: i32,
    /// Parameters for the current-conditions request
    nowcast: BTreeMap<&'static str, String>,
    /// Parameters for the short-term forecast request
    forecast: BTreeMap<&'static str, String>,
}
