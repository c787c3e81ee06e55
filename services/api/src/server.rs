use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLeadRepository, InMemoryNotifier};
use crate::routes::with_platform_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use panama_advisory::config::AppConfig;
use panama_advisory::error::AppError;
use panama_advisory::intake::ConsultationService;
use panama_advisory::properties::HttpPropertyDirectory;
use panama_advisory::telemetry;
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

    let repository = Arc::new(InMemoryLeadRepository::default());
    let notifier = Arc::new(InMemoryNotifier::default());
    let consultations = Arc::new(ConsultationService::new(repository, notifier));
    let directory = Arc::new(HttpPropertyDirectory::from_config(&config.properties));

    let app = with_platform_routes(consultations, directory)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, listings = %config.properties.api_base_url, "advisory platform ready");

    axum::serve(listener, app).await?;
    Ok(())
}
