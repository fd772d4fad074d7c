use comfy_table::Table;
use shuttle_dispatch::views::{detailed_visits::DetailedRoute, summary::Summary};

pub fn summary_table(summary: &Summary) -> Table {
    let mut table = Table::new();

    table.set_header(vec![
        "Vehicle",
        "Stops",
        "Pickups",
        "Passengers",
        "Peak load",
        "Capacity",
        "Travel (min)",
        "Total (min)",
        "Distance (km)",
    ]);

    for route in &summary.routes {
        table.add_row(vec![
            route.vehicle_label.clone(),
            route.total_stops.to_string(),
            route.total_pickups.to_string(),
            route.total_passengers.to_string(),
            route.peak_passengers.to_string(),
            route.vehicle_capacity.to_string(),
            format!("{:.2}", route.travel_time_minutes),
            format!("{:.2}", route.total_time_minutes),
            format!("{:.2}", route.total_distance_meters / 1000.0),
        ]);
    }

    table
}

pub fn visits_table(routes: &[DetailedRoute]) -> Table {
    let mut table = Table::new();

    table.set_header(vec![
        "Route",
        "#",
        "Booking",
        "Passengers",
        "Time (min)",
        "Cumulative (km)",
        "Direct (km)",
    ]);

    for route in routes {
        for visit in &route.visits {
            table.add_row(vec![
                route.route_number.to_string(),
                visit.position.to_string(),
                visit.booking_id.to_string(),
                visit.passengers.to_string(),
                visit.travel_time_minutes.to_string(),
                format!("{:.2}", visit.cumulative_distance.value() / 1000.0),
                format!("{:.2}", visit.direct_distance.value() / 1000.0),
            ]);
        }
    }

    table
}
