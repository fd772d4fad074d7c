use shuttle_dispatch::views::visit_kind::VisitKind;

pub fn parse_visit_kind(input: &str) -> Result<VisitKind, String> {
    match input.trim().to_lowercase().as_str() {
        "pickup" | "pickups" => Ok(VisitKind::Pickup),
        "dropoff" | "dropoffs" | "drop-off" | "drop-offs" => Ok(VisitKind::Dropoff),
        _ => Err(format!("Invalid visit kind `{input}`, expected pickup or dropoff")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_visit_kind() {
        assert_eq!(parse_visit_kind("pickup"), Ok(VisitKind::Pickup));
        assert_eq!(parse_visit_kind("Drop-offs"), Ok(VisitKind::Dropoff));
        assert!(parse_visit_kind("both").is_err());
    }
}
