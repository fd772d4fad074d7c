//! Response side of the `optimizeTours` wire format.
//!
//! Default values are omitted by the service (proto3 JSON), so almost every
//! field falls back to its default when absent.

use std::collections::BTreeMap;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    google_duration::GoogleDuration,
    model::{Load, PASSENGERS_LOAD},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    #[serde(default)]
    pub shipment_index: usize,
    #[serde(default)]
    pub is_pickup: bool,
    pub start_time: Option<Timestamp>,
    #[serde(default)]
    pub load_demands: BTreeMap<String, Load>,
    #[serde(default)]
    pub shipment_label: String,
}

impl Visit {
    /// Signed passenger delta, negative on deliveries.
    pub fn passengers(&self) -> i64 {
        self.load_demands
            .get(PASSENGERS_LOAD)
            .map(|load| load.amount)
            .unwrap_or(0)
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    #[serde_as(as = "Option<GoogleDuration>")]
    pub travel_duration: Option<SignedDuration>,
    #[serde(default)]
    pub travel_distance_meters: f64,
    #[serde_as(as = "Option<GoogleDuration>")]
    pub wait_duration: Option<SignedDuration>,
    #[serde_as(as = "Option<GoogleDuration>")]
    pub total_duration: Option<SignedDuration>,
    pub start_time: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EncodedPolyline {
    #[serde(default)]
    pub points: String,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMetrics {
    #[serde(default)]
    pub performed_shipment_count: u32,
    #[serde_as(as = "Option<GoogleDuration>")]
    pub travel_duration: Option<SignedDuration>,
    #[serde_as(as = "Option<GoogleDuration>")]
    pub wait_duration: Option<SignedDuration>,
    #[serde_as(as = "Option<GoogleDuration>")]
    pub visit_duration: Option<SignedDuration>,
    #[serde_as(as = "Option<GoogleDuration>")]
    pub total_duration: Option<SignedDuration>,
    #[serde(default)]
    pub travel_distance_meters: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRoute {
    #[serde(default)]
    pub vehicle_index: usize,
    #[serde(default)]
    pub vehicle_label: String,
    pub vehicle_start_time: Option<Timestamp>,
    pub vehicle_end_time: Option<Timestamp>,
    #[serde(default)]
    pub visits: Vec<Visit>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
    pub route_polyline: Option<EncodedPolyline>,
    pub metrics: Option<AggregatedMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SkippedShipment {
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeToursMetrics {
    pub aggregated_route_metrics: Option<AggregatedMetrics>,
    #[serde(default)]
    pub used_vehicle_count: u32,
    #[serde(default)]
    pub skipped_mandatory_shipment_count: u32,
    #[serde(default)]
    pub total_cost: f64,
    pub earliest_vehicle_start_time: Option<Timestamp>,
    pub latest_vehicle_end_time: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeToursResponse {
    #[serde(default)]
    pub routes: Vec<ShipmentRoute>,
    #[serde(default)]
    pub skipped_shipments: Vec<SkippedShipment>,
    pub metrics: Option<OptimizeToursMetrics>,
}
