//! Request side of the `optimizeTours` wire format.

use std::collections::BTreeMap;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::google_duration::GoogleDuration;

/// Load dimension used for passengers in load demands and load limits.
pub const PASSENGERS_LOAD: &str = "passengers";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Load {
    /// int64 values travel as strings in protobuf JSON.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    #[serde(default)]
    pub amount: i64,
}

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadLimit {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub max_load: i64,
}

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationLimit {
    #[serde_as(as = "GoogleDuration")]
    pub max_duration: SignedDuration,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRequest {
    pub arrival_location: LatLng,

    #[serde_as(as = "Option<GoogleDuration>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<SignedDuration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub label: String,
    pub pickups: Vec<VisitRequest>,
    pub deliveries: Vec<VisitRequest>,
    #[serde(default)]
    pub load_demands: BTreeMap<String, Load>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub label: String,
    pub start_location: LatLng,
    pub cost_per_hour: f64,
    pub cost_per_kilometer: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_duration_limit: Option<DurationLimit>,
    #[serde(default)]
    pub load_limits: BTreeMap<String, LoadLimit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentModel {
    pub shipments: Vec<Shipment>,
    pub vehicles: Vec<Vehicle>,
    pub global_start_time: Timestamp,
    pub global_end_time: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeToursRequest {
    pub model: ShipmentModel,
    #[serde(default)]
    pub populate_polylines: bool,
    #[serde(default)]
    pub consider_road_traffic: bool,
}
