use std::future::Future;

use crate::{error::SolverError, model::OptimizeToursRequest, response::OptimizeToursResponse};

/// Black-box vehicle routing: a model goes in, routes come out.
pub trait RouteSolver: Send + Sync {
    fn solve(
        &self,
        request: &OptimizeToursRequest,
    ) -> impl Future<Output = Result<OptimizeToursResponse, SolverError>> + Send;
}
