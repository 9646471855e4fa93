use crate::cli::ServeArgs;
use crate::demo::load_catalog;
use crate::infra::{
    AppState, InMemoryCustomerDirectory, InMemoryMatchStore, InMemoryPropertyCatalog,
};
use crate::routes::with_match_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lead_match::config::AppConfig;
use lead_match::error::AppError;
use lead_match::matching::MatchService;
use lead_match::telemetry;
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

    let (listings, imported) = load_catalog(config.matching.catalog_csv.clone())?;
    let catalog = Arc::new(InMemoryPropertyCatalog::new(listings));
    info!(
        listings = catalog.len(),
        imported,
        "property catalog loaded"
    );

    let match_service = Arc::new(MatchService::new(
        catalog,
        Arc::new(InMemoryMatchStore::default()),
        Arc::new(InMemoryCustomerDirectory::default()),
        config.matching.ranking_options(),
    ));

    let app = with_match_routes(match_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lead matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
