use crate::cli::ServeArgs;
use crate::infra::{default_scoring_config, AppState};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use mentor_ai::assessments::{AssessmentService, InMemoryProfileStore};
use mentor_ai::config::AppConfig;
use mentor_ai::error::AppError;
use mentor_ai::telemetry;
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

    let store = Arc::new(InMemoryProfileStore::new());
    let assessment_service = Arc::new(
        AssessmentService::new(store, default_scoring_config())
            .map_err(mentor_ai::assessments::ServiceError::from)
            .map_err(AppError::from)?
            .with_processing_delay(config.assessment.processing_delay()),
    );

    let app = with_assessment_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "guidance assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
