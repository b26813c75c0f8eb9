use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use city_lens::config::AppConfig;
use city_lens::error::AppError;
use city_lens::pipeline::ImpactPipeline;
use city_lens::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{default_scoring_config, AppState, StaticSignalProvider};
use crate::routes::with_impact_routes;

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

    let provider = Arc::new(StaticSignalProvider);
    let pipeline = Arc::new(ImpactPipeline::new(provider, default_scoring_config()));

    let app = with_impact_routes(pipeline)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "impact scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
