use crate::cli::ServeArgs;
use crate::infra::{AppState, SitingState};
use crate::routes::with_siting_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use solar_siting::config::AppConfig;
use solar_siting::error::AppError;
use solar_siting::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let locator = config.siting.locator()?;
    info!(
        normalization = locator.scorer().normalization(),
        "siting pipeline configured"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_siting_routes(SitingState::new(locator))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "solar siting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
