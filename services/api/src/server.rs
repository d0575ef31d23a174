use crate::cli::ServeArgs;
use crate::infra::{
    load_document, AppState, InMemoryJobRepository, InMemoryStudentRepository, SeedDocument,
};
use crate::routes::with_placement_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use placement_match::config::AppConfig;
use placement_match::error::AppError;
use placement_match::telemetry;
use placement_match::workflows::placement::PlacementMatchService;
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

    let seed = match args.seed.as_deref() {
        Some(path) => load_document::<SeedDocument>(path)?,
        None => SeedDocument::default(),
    };
    let students = Arc::new(InMemoryStudentRepository::with_profiles(seed.students));
    let jobs = Arc::new(InMemoryJobRepository::with_jobs(seed.jobs));
    info!(
        students = students.len(),
        jobs = jobs.len(),
        "loaded placement records"
    );

    let match_service = Arc::new(PlacementMatchService::new(
        students,
        jobs,
        config.matching.clone(),
    ));

    let app = with_placement_routes(match_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "placement match service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
