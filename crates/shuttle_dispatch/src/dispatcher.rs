use jiff::Timestamp;
use schemars::JsonSchema;
use serde::Serialize;
use shuttle_route_optimization::route_solver::RouteSolver;
use tracing::{info, instrument};

use crate::{
    config::DispatchConfig,
    error::DispatchError,
    json::request::JsonOptimizeRequest,
    solution::solved_route::{SolveMetrics, Solution, SolvedRoute},
    views::{
        detailed_visits::{DetailedRoute, build_detailed_visits},
        legacy_response::{LegacyResponse, build_legacy_response},
        summary::{Summary, build_summary},
        visit_kind::VisitKind,
    },
};

pub const STATUS_SUCCESS: &str = "success";

#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct OptimizeResponse {
    pub status: String,
    pub metrics: SolveMetrics,
    pub skipped_shipments: Vec<String>,
    pub summary: Summary,
    pub routes: Vec<SolvedRoute>,
    pub detailed_visits: Vec<DetailedRoute>,
    pub api_response: LegacyResponse,
}

/// Runs one optimization: validation, a single solver call, then the three
/// views over the solved routes.
pub struct Dispatcher<S> {
    config: DispatchConfig,
    solver: S,
}

impl<S> Dispatcher<S>
where
    S: RouteSolver,
{
    pub fn new(config: DispatchConfig, solver: S) -> Self {
        Self { config, solver }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub async fn optimize(
        &self,
        request: JsonOptimizeRequest,
        kind: VisitKind,
    ) -> Result<OptimizeResponse, DispatchError> {
        self.optimize_at(request, kind, Timestamp::now()).await
    }

    /// Same as [`Dispatcher::optimize`], with the default time window
    /// anchored at `now`.
    #[instrument(skip_all)]
    pub async fn optimize_at(
        &self,
        request: JsonOptimizeRequest,
        kind: VisitKind,
        now: Timestamp,
    ) -> Result<OptimizeResponse, DispatchError> {
        let request = request.build_request(&self.config, now)?;

        info!(
            bookings = request.bookings().len(),
            vehicles = request.vehicles().len(),
            "Optimizing dispatch"
        );

        let response = self
            .solver
            .solve(&request.optimize_tours_request(&self.config))
            .await?;

        let solution = Solution::from_response(response, request.global_start_time())?;

        let summary = build_summary(&solution, self.config.vehicle_capacity);
        let detailed_visits = build_detailed_visits(&solution, request.bookings(), kind)?;
        let api_response = build_legacy_response(&solution, request.bookings())?;

        info!(
            routes = solution.routes.len(),
            skipped = solution.skipped_shipments.len(),
            "Dispatch optimized"
        );

        Ok(OptimizeResponse {
            status: STATUS_SUCCESS.to_owned(),
            metrics: solution.metrics,
            skipped_shipments: solution.skipped_shipments,
            summary,
            routes: solution.routes,
            detailed_visits,
            api_response,
        })
    }
}
