//! Protobuf JSON durations, e.g. `"180s"` or `"12.5s"`.

use jiff::SignedDuration;
use serde::{Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

pub struct GoogleDuration;

pub fn format_duration(duration: SignedDuration) -> String {
    if duration.subsec_nanos() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}s", duration.as_secs_f64())
    }
}

pub fn parse_duration(value: &str) -> Result<SignedDuration, String> {
    let seconds = value
        .trim()
        .strip_suffix('s')
        .ok_or_else(|| format!("invalid duration `{value}`: missing `s` suffix"))?;

    let seconds: f64 = seconds
        .parse()
        .map_err(|_| format!("invalid duration `{value}`"))?;

    SignedDuration::try_from_secs_f64(seconds).map_err(|error| error.to_string())
}

impl SerializeAs<SignedDuration> for GoogleDuration {
    fn serialize_as<S>(source: &SignedDuration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_duration(*source))
    }
}

impl<'de> DeserializeAs<'de, SignedDuration> for GoogleDuration {
    fn deserialize_as<D>(deserializer: D) -> Result<SignedDuration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse_duration(&value).map_err(serde::de::Error::custom)
    }
}
