use jiff::SignedDuration;
use thiserror::Error;

const MAX_ROUTE_MINUTES_ENV_VAR: &str = "SHUTTLE_MAX_ROUTE_MINUTES";
const STOP_MINUTES_ENV_VAR: &str = "SHUTTLE_STOP_MINUTES";
const VEHICLE_CAPACITY_ENV_VAR: &str = "SHUTTLE_VEHICLE_CAPACITY";
const COST_PER_HOUR_ENV_VAR: &str = "SHUTTLE_COST_PER_HOUR";
const COST_PER_KILOMETER_ENV_VAR: &str = "SHUTTLE_COST_PER_KILOMETER";
const PLANNING_HORIZON_HOURS_ENV_VAR: &str = "SHUTTLE_PLANNING_HORIZON_HOURS";
const POPULATE_POLYLINES_ENV_VAR: &str = "SHUTTLE_POPULATE_POLYLINES";
const CONSIDER_ROAD_TRAFFIC_ENV_VAR: &str = "SHUTTLE_CONSIDER_ROAD_TRAFFIC";

#[derive(Debug, Error, PartialEq)]
#[error("invalid value `{value}` for {name}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
}

/// Immutable dispatch settings, handed to the dispatcher at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    pub max_route_minutes: u32,
    pub stop_minutes: u32,
    pub vehicle_capacity: u32,
    pub cost_per_hour: f64,
    pub cost_per_kilometer: f64,
    /// Length of the default global time window starting now.
    pub planning_horizon: SignedDuration,
    pub populate_polylines: bool,
    pub consider_road_traffic: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_route_minutes: 90,
            stop_minutes: 3,
            vehicle_capacity: 7,
            cost_per_hour: 40.0,
            cost_per_kilometer: 10.0,
            planning_horizon: SignedDuration::from_hours(24),
            populate_polylines: true,
            consider_road_traffic: true,
        }
    }
}

impl DispatchConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = parse_var(&lookup, MAX_ROUTE_MINUTES_ENV_VAR)? {
            config.max_route_minutes = value;
        }
        if let Some(value) = parse_var(&lookup, STOP_MINUTES_ENV_VAR)? {
            config.stop_minutes = value;
        }
        if let Some(value) = parse_var(&lookup, VEHICLE_CAPACITY_ENV_VAR)? {
            config.vehicle_capacity = value;
        }
        if let Some(value) = parse_var(&lookup, COST_PER_HOUR_ENV_VAR)? {
            config.cost_per_hour = value;
        }
        if let Some(value) = parse_var(&lookup, COST_PER_KILOMETER_ENV_VAR)? {
            config.cost_per_kilometer = value;
        }
        if let Some(hours) = parse_var::<i64>(&lookup, PLANNING_HORIZON_HOURS_ENV_VAR)? {
            config.planning_horizon = SignedDuration::from_hours(hours);
        }
        if let Some(value) = parse_var(&lookup, POPULATE_POLYLINES_ENV_VAR)? {
            config.populate_polylines = value;
        }
        if let Some(value) = parse_var(&lookup, CONSIDER_ROAD_TRAFFIC_ENV_VAR)? {
            config.consider_road_traffic = value;
        }

        Ok(config)
    }

    pub fn stop_duration(&self) -> SignedDuration {
        SignedDuration::from_mins(self.stop_minutes as i64)
    }

    pub fn max_route_duration(&self) -> SignedDuration {
        SignedDuration::from_mins(self.max_route_minutes as i64)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&'static str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { name, value }),
        None => Ok(None),
    }
}
