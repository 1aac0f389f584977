use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySnapshotRepository};
use crate::routes::with_setup_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use trade_journal::config::AppConfig;
use trade_journal::error::AppError;
use trade_journal::playbook::SetupScoringService;
use trade_journal::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySnapshotRepository::default());
    let service = Arc::new(SetupScoringService::new(repository, config.scoring));

    let app = with_setup_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        primary_multiplier = config.scoring.primary_confluence_multiplier,
        "trade journal scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
