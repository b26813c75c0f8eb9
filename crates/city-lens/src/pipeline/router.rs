use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::ProjectInput;
use super::service::ImpactPipeline;
use super::signals::SignalProvider;

/// Router builder exposing the single pipeline entrypoint over HTTP.
pub fn impact_router<P>(pipeline: Arc<ImpactPipeline<P>>) -> Router
where
    P: SignalProvider + 'static,
{
    Router::new()
        .route("/api/v1/impact/simulate", post(simulate_handler::<P>))
        .with_state(pipeline)
}

pub(crate) async fn simulate_handler<P>(
    State(pipeline): State<Arc<ImpactPipeline<P>>>,
    axum::Json(project): axum::Json<ProjectInput>,
) -> Response
where
    P: SignalProvider + 'static,
{
    match pipeline.run(&project) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
