use crate::infra::{AppState, SitingState};
use crate::presentation::{layer_presentations, LayerPresentation};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use solar_siting::error::AppError;
use solar_siting::siting::{
    BoundingRegion, FeatureCollectionImporter, SiteOutcome, SiteReport, SiteResult, SourceLayer,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RegionRequest {
    pub(crate) north: f64,
    pub(crate) south: f64,
    pub(crate) east: f64,
    pub(crate) west: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OptimalSiteRequest {
    pub(crate) region: RegionRequest,
    pub(crate) layer: SourceLayer,
    /// GeoJSON FeatureCollection of the layer's features.
    pub(crate) features: serde_json::Value,
    #[serde(default)]
    pub(crate) include_breakdown: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct OptimalSiteResponse {
    pub(crate) status: SiteStatus,
    pub(crate) layer: SourceLayer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) site: Option<SiteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) breakdown: Option<SiteReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SiteStatus {
    Site,
    NoSite,
}

#[derive(Debug, Serialize)]
pub(crate) struct LayersResponse {
    pub(crate) layers: Vec<LayerPresentation>,
}

pub(crate) fn with_siting_routes(state: SitingState) -> Router {
    Router::new()
        .route("/api/v1/sites/optimal", post(optimal_site_endpoint))
        .with_state(state)
        .route("/api/v1/layers", get(layers_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn layers_endpoint() -> Json<LayersResponse> {
    Json(LayersResponse {
        layers: layer_presentations(),
    })
}

pub(crate) async fn optimal_site_endpoint(
    State(state): State<SitingState>,
    Json(payload): Json<OptimalSiteRequest>,
) -> Result<Json<OptimalSiteResponse>, AppError> {
    let OptimalSiteRequest {
        region,
        layer,
        features,
        include_breakdown,
    } = payload;

    let region = BoundingRegion::new(region.west, region.south, region.east, region.north)?;
    let candidates = FeatureCollectionImporter::new(layer).import_value(features)?;
    let report = state
        .locator
        .locate_with_report(&region, &candidates, layer.scoring_mode());

    let (status, site) = match report.outcome() {
        SiteOutcome::Site(site) => (SiteStatus::Site, Some(site)),
        SiteOutcome::NoSite => (SiteStatus::NoSite, None),
    };

    Ok(Json(OptimalSiteResponse {
        status,
        layer,
        site,
        breakdown: include_breakdown.then_some(report),
    }))
}
