use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::solution::solved_route::SolvedVisit;

/// Which visits of a route the detailed view lists.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VisitKind {
    Pickup,
    #[default]
    Dropoff,
}

impl VisitKind {
    pub fn matches(&self, visit: &SolvedVisit) -> bool {
        match self {
            VisitKind::Pickup => visit.is_pickup,
            VisitKind::Dropoff => !visit.is_pickup,
        }
    }
}
