use serde::Serialize;

use crate::problem::coordinates::Coordinates;

/// One passenger transport request: picked up at `origin`, dropped off at
/// `destination`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Booking {
    label: String,
    pax_count: u32,
    origin: Coordinates,
    destination: Coordinates,
}

impl Booking {
    pub fn new(
        label: impl Into<String>,
        pax_count: u32,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Self {
        Self {
            label: label.into(),
            pax_count,
            origin,
            destination,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pax_count(&self) -> u32 {
        self.pax_count
    }

    pub fn origin(&self) -> &Coordinates {
        &self.origin
    }

    pub fn destination(&self) -> &Coordinates {
        &self.destination
    }
}
