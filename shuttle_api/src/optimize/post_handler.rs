use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use schemars::JsonSchema;
use serde::Deserialize;
use shuttle_dispatch::{
    dispatcher::OptimizeResponse, json::request::JsonOptimizeRequest,
    views::visit_kind::VisitKind,
};
use shuttle_route_optimization::route_solver::RouteSolver;

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize, JsonSchema, Debug, Default)]
pub struct OptimizeQuery {
    /// Visits listed in `detailed_visits`, drop-offs when absent.
    pub visits: Option<VisitKind>,
}

pub async fn post_handler<S>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<OptimizeQuery>,
    Json(body): Json<JsonOptimizeRequest>,
) -> Result<Json<OptimizeResponse>, ApiError>
where
    S: RouteSolver + 'static,
{
    let response = state
        .dispatcher
        .optimize(body, query.visits.unwrap_or_default())
        .await?;

    Ok(Json(response))
}
