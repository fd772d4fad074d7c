use fxhash::FxHashMap;

use crate::{
    error::MatchError,
    problem::meters::Meters,
    solution::{
        matcher::parse_booking_id,
        solved_route::{SolvedTransition, SolvedVisit},
    },
};

/// Distance travelled along a route up to each stop, keyed by booking id.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CumulativeDistances {
    distances: FxHashMap<i64, Meters>,
}

impl CumulativeDistances {
    pub fn get(&self, booking_id: i64) -> Option<Meters> {
        self.distances.get(&booking_id).copied()
    }

    /// Stops reached without a transition count as zero.
    pub fn get_or_zero(&self, booking_id: i64) -> Meters {
        self.get(booking_id).unwrap_or(Meters::ZERO)
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Walks `visits` in order, adding the distance of the transition that
/// arrives at each of them.
pub fn cumulative_distances<'a>(
    visits: impl IntoIterator<Item = &'a SolvedVisit>,
    transitions: &[SolvedTransition],
) -> Result<CumulativeDistances, MatchError> {
    let mut distances = FxHashMap::default();
    let mut total = Meters::ZERO;

    for visit in visits {
        let Some(arriving) = transitions
            .iter()
            .find(|transition| transition.end_time() == visit.start_time)
        else {
            continue;
        };

        total += arriving.travel_distance;
        distances.insert(parse_booking_id(&visit.shipment_label)?, total);
    }

    Ok(CumulativeDistances { distances })
}
