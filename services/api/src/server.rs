use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryResultRepository, LoggingUnlockPublisher};
use crate::routes::with_checkin_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use checkin::config::AppConfig;
use checkin::error::AppError;
use checkin::questionnaire::CheckinService;
use checkin::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryResultRepository::default());
    let unlocks = Arc::new(LoggingUnlockPublisher);
    let checkin_service = Arc::new(CheckinService::new(repository, unlocks));

    let app = with_checkin_routes(checkin_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "wellness check-in service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
