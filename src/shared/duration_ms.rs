//! Serde helper that stores `std::time::Duration` as whole milliseconds.
//!
//! Use with `#[serde(with = "crate::shared::duration_ms")]`.

use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    serializer.serialize_u64(millis)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = u64::deserialize(deserializer)?;
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Sla {
        #[serde(with = "super")]
        response_time: Duration,
    }

    #[test]
    fn test_serializes_as_milliseconds() {
        let sla = Sla {
            response_time: Duration::from_millis(350),
        };
        assert_eq!(
            serde_json::to_string(&sla).unwrap(),
            r#"{"response_time":350}"#
        );
    }

    #[test]
    fn test_deserializes_from_milliseconds() {
        let sla: Sla = serde_json::from_str(r#"{"response_time":1500}"#).unwrap();
        assert_eq!(sla.response_time, Duration::from_secs_f64(1.5));
    }
}
