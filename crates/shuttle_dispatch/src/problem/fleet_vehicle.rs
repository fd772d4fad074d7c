use serde::Serialize;

use crate::problem::coordinates::Coordinates;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FleetVehicle {
    label: String,
    start_location: Coordinates,
    capacity: u32,
}

impl FleetVehicle {
    pub fn new(label: impl Into<String>, start_location: Coordinates, capacity: u32) -> Self {
        Self {
            label: label.into(),
            start_location,
            capacity,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start_location(&self) -> &Coordinates {
        &self.start_location
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}
