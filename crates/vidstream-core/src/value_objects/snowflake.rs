//! Snowflake ID - 64-bit unique identifier for every stored entity
//!
//! Layout, high to low: 42 bits of milliseconds since the service
//! epoch, 10 bits of worker id, 12 bits of per-millisecond sequence.
//!
//! Ids travel over the wire as base-10 strings, which doubles as the
//! canonical identifier encoding: a client-supplied id is valid iff it
//! parses back into an i64.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const TIMESTAMP_SHIFT: u32 = 22;
const WORKER_SHIFT: u32 = 12;
const SEQUENCE_BITS: u32 = 12;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const WORKER_MASK: i64 = (1 << 10) - 1;

/// Highest worker id the 10-bit field can carry
pub const MAX_WORKER_ID: u16 = 1023;

/// 64-bit Snowflake ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Service epoch: 2024-01-01 00:00:00 UTC, in milliseconds
    pub const EPOCH: i64 = 1_704_067_200_000;

    /// Wrap a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Unwrap to the raw i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which the id was minted
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> TIMESTAMP_SHIFT) + Self::EPOCH
    }

    /// Worker id embedded in the id
    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> WORKER_SHIFT) & WORKER_MASK) as u16
    }

    /// Per-millisecond sequence number embedded in the id
    #[inline]
    pub fn sequence(&self) -> u16 {
        (self.0 & SEQUENCE_MASK) as u16
    }

    /// Validate and parse a client-supplied id string
    ///
    /// Fails only on malformed input; presence checks are the caller's
    /// job.
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid id format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// JSON carries ids as strings so JavaScript clients never hit the
// 2^53 integer precision cliff.
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<'a> {
            Int(i64),
            Text(#[serde(borrow)] Cow<'a, str>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(value) => Ok(Snowflake(value)),
            Repr::Text(text) => text
                .parse::<i64>()
                .map(Snowflake)
                .map_err(|_| de::Error::custom("expected a numeric id string")),
        }
    }
}

/// Lock-free Snowflake generator
///
/// The last issued (timestamp, sequence) pair is packed into a single
/// atomic, so claiming the next id is one compare-exchange. When a
/// millisecond's 4096 sequence slots run out, the generator borrows
/// from the next millisecond instead of spinning.
pub struct SnowflakeGenerator {
    worker_id: u16,
    /// `(unix_millis << SEQUENCE_BITS) | sequence` of the last id
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// Create a generator for the given worker
    ///
    /// # Panics
    /// Panics if `worker_id` exceeds [`MAX_WORKER_ID`]
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id <= MAX_WORKER_ID, "worker id out of range");
        Self {
            worker_id,
            state: AtomicI64::new(0),
        }
    }

    /// Mint the next unique id
    pub fn generate(&self) -> Snowflake {
        loop {
            let prev = self.state.load(Ordering::Acquire);
            let prev_millis = prev >> SEQUENCE_BITS;

            // A clock that steps backwards must not reissue earlier
            // timestamps, so the logical clock never moves back.
            let now = unix_millis().max(prev_millis);

            let (millis, sequence) = if now == prev_millis {
                let next = (prev & SEQUENCE_MASK) + 1;
                if next > SEQUENCE_MASK {
                    (now + 1, 0)
                } else {
                    (now, next)
                }
            } else {
                (now, 0)
            };

            let packed = (millis << SEQUENCE_BITS) | sequence;
            if self
                .state
                .compare_exchange(prev, packed, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                let id = ((millis - Snowflake::EPOCH) << TIMESTAMP_SHIFT)
                    | (i64::from(self.worker_id) << WORKER_SHIFT)
                    | sequence;
                return Snowflake::new(id);
            }
        }
    }

    /// The worker id this generator stamps into ids
    #[must_use]
    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

#[inline]
fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_wrap_and_unwrap() {
        let id = Snowflake::new(424242);
        assert_eq!(id.into_inner(), 424242);
        assert_eq!(i64::from(id), 424242);
        assert_eq!(Snowflake::from(424242i64), id);
    }

    #[test]
    fn test_parse_accepts_digits_only() {
        assert_eq!(Snowflake::parse("424242").unwrap().into_inner(), 424242);
        assert!(Snowflake::parse("not-a-snowflake").is_err());
        assert!(Snowflake::parse("").is_err());
        assert!(Snowflake::parse("42x42").is_err());
    }

    #[test]
    fn test_display_is_decimal() {
        assert_eq!(Snowflake::new(424242).to_string(), "424242");
    }

    #[test]
    fn test_json_round_trips_as_string() {
        let id = Snowflake::new(881234567890123456);
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"881234567890123456\""
        );

        let back: Snowflake = serde_json::from_str("\"881234567890123456\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_json_accepts_bare_integer() {
        let id: Snowflake = serde_json::from_str("12345").unwrap();
        assert_eq!(id.into_inner(), 12345);
    }

    #[test]
    fn test_json_rejects_non_numeric_string() {
        assert!(serde_json::from_str::<Snowflake>("\"abc\"").is_err());
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        assert!(Snowflake::new(100) < Snowflake::new(200));
    }

    #[test]
    fn test_generated_ids_unique_and_monotonic() {
        let generator = SnowflakeGenerator::new(3);
        let mut seen = HashSet::new();
        let mut last = Snowflake::new(i64::MIN);

        for _ in 0..2000 {
            let id = generator.generate();
            assert!(seen.insert(id), "duplicate id");
            assert!(id > last, "ids went backwards");
            last = id;
        }
    }

    #[test]
    fn test_generated_ids_carry_fields() {
        let generator = SnowflakeGenerator::new(9);
        let before = unix_millis();
        let id = generator.generate();
        let after = unix_millis();

        assert_eq!(id.worker_id(), 9);
        assert!(id.timestamp() >= before && id.timestamp() <= after);
        assert!(i64::from(id.sequence()) <= SEQUENCE_MASK);
    }

    #[test]
    fn test_concurrent_generation_stays_unique() {
        let generator = Arc::new(SnowflakeGenerator::new(1));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = Arc::clone(&generator);
                thread::spawn(move || (0..1000).map(|_| generator.generate()).collect::<Vec<_>>())
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            all.extend(handle.join().unwrap());
        }
        assert_eq!(all.len(), 4000);
    }

    #[test]
    #[should_panic(expected = "worker id out of range")]
    fn test_worker_id_upper_bound() {
        SnowflakeGenerator::new(MAX_WORKER_ID + 1);
    }
}
