/// Serialization helpers for Duration (as whole microseconds)
///
/// Sub-millisecond bucket durations must survive a round trip.
pub mod duration_micros {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let micros = u64::try_from(duration.as_micros()).map_err(serde::ser::Error::custom)?;
        if micros == 0 && !duration.is_zero() {
            return Err(serde::ser::Error::custom(format!(
                "duration {:?} is shorter than one microsecond",
                duration
            )));
        }
        serializer.serialize_u64(micros)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u64::deserialize(deserializer)?;
        Ok(Duration::from_micros(micros))
    }
}
