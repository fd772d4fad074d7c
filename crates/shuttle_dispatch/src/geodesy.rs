use geo::{Distance, Haversine};

use crate::problem::{coordinates::Coordinates, meters::Meters};

/// Great-circle distance between two coordinates.
pub fn haversine_distance(from: &Coordinates, to: &Coordinates) -> Meters {
    let from: geo::Point = from.into();
    let to: geo::Point = to.into();

    Meters::new(Haversine.distance(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let point = Coordinates::new(50.8466, 4.3528);

        assert!(haversine_distance(&point, &point).is_zero());
    }

    #[test]
    fn test_brussels_to_antwerp() {
        let brussels = Coordinates::new(50.8466, 4.3528);
        let antwerp = Coordinates::new(51.2194, 4.4025);

        let distance = haversine_distance(&brussels, &antwerp).value();

        assert!((distance - 41_600.0).abs() < 500.0, "got {distance}");
    }

    #[test]
    fn test_is_symmetric() {
        let a = Coordinates::new(40.7128, -74.0060);
        let b = Coordinates::new(34.0522, -118.2437);

        let ab = haversine_distance(&a, &b).value();
        let ba = haversine_distance(&b, &a).value();

        assert!((ab - ba).abs() < 1e-6);
    }
}
