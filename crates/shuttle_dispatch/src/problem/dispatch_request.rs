use std::collections::BTreeMap;

use jiff::{SignedDuration, Timestamp};
use shuttle_route_optimization::model::{
    DurationLimit, Load, LoadLimit, OptimizeToursRequest, PASSENGERS_LOAD, Shipment,
    ShipmentModel, Vehicle, VisitRequest,
};

use crate::{
    config::DispatchConfig,
    problem::{booking::Booking, fleet_vehicle::FleetVehicle},
};

/// The solver rejects timestamps carrying sub-second precision.
pub fn whole_seconds(timestamp: Timestamp) -> Timestamp {
    Timestamp::from_second(timestamp.as_second()).unwrap_or(timestamp)
}

/// A validated dispatch problem, ready to be handed to the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    bookings: Vec<Booking>,
    vehicles: Vec<FleetVehicle>,
    stop_minutes: u32,
    max_route_minutes: u32,
    global_start_time: Timestamp,
    global_end_time: Timestamp,
}

impl DispatchRequest {
    pub fn new(
        bookings: Vec<Booking>,
        vehicles: Vec<FleetVehicle>,
        stop_minutes: u32,
        max_route_minutes: u32,
        global_start_time: Timestamp,
        global_end_time: Timestamp,
    ) -> Self {
        Self {
            bookings,
            vehicles,
            stop_minutes,
            max_route_minutes,
            global_start_time,
            global_end_time,
        }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn vehicles(&self) -> &[FleetVehicle] {
        &self.vehicles
    }

    pub fn stop_minutes(&self) -> u32 {
        self.stop_minutes
    }

    pub fn max_route_minutes(&self) -> u32 {
        self.max_route_minutes
    }

    pub fn global_start_time(&self) -> Timestamp {
        self.global_start_time
    }

    pub fn global_end_time(&self) -> Timestamp {
        self.global_end_time
    }

    pub fn stop_duration(&self) -> SignedDuration {
        SignedDuration::from_mins(self.stop_minutes as i64)
    }

    pub fn max_route_duration(&self) -> SignedDuration {
        SignedDuration::from_mins(self.max_route_minutes as i64)
    }

    fn shipment(&self, booking: &Booking) -> Shipment {
        Shipment {
            label: booking.label().to_owned(),
            pickups: vec![VisitRequest {
                arrival_location: (*booking.origin()).into(),
                duration: None,
                label: None,
            }],
            deliveries: vec![VisitRequest {
                arrival_location: (*booking.destination()).into(),
                duration: Some(self.stop_duration()),
                label: None,
            }],
            load_demands: BTreeMap::from([(
                PASSENGERS_LOAD.to_owned(),
                Load {
                    amount: booking.pax_count() as i64,
                },
            )]),
        }
    }

    fn vehicle(&self, vehicle: &FleetVehicle, config: &DispatchConfig) -> Vehicle {
        Vehicle {
            label: vehicle.label().to_owned(),
            start_location: (*vehicle.start_location()).into(),
            cost_per_hour: config.cost_per_hour,
            cost_per_kilometer: config.cost_per_kilometer,
            route_duration_limit: Some(DurationLimit {
                max_duration: self.max_route_duration(),
            }),
            load_limits: BTreeMap::from([(
                PASSENGERS_LOAD.to_owned(),
                LoadLimit {
                    max_load: vehicle.capacity() as i64,
                },
            )]),
        }
    }

    /// Builds the solver model: one shipment per booking, one model vehicle
    /// per fleet vehicle.
    pub fn optimize_tours_request(&self, config: &DispatchConfig) -> OptimizeToursRequest {
        OptimizeToursRequest {
            model: ShipmentModel {
                shipments: self
                    .bookings
                    .iter()
                    .map(|booking| self.shipment(booking))
                    .collect(),
                vehicles: self
                    .vehicles
                    .iter()
                    .map(|vehicle| self.vehicle(vehicle, config))
                    .collect(),
                global_start_time: whole_seconds(self.global_start_time),
                global_end_time: whole_seconds(self.global_end_time),
            },
            populate_polylines: config.populate_polylines,
            consider_road_traffic: config.consider_road_traffic,
        }
    }
}
