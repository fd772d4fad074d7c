use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shuttle_route_optimization::model::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Coordinates")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<Coordinates> for LatLng {
    fn from(value: Coordinates) -> Self {
        LatLng {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl From<&Coordinates> for geo::Point {
    fn from(value: &Coordinates) -> Self {
        geo::Point::new(value.longitude, value.latitude)
    }
}
