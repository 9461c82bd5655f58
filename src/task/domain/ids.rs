//! Store-native task identifiers and their string form.
//!
//! A [`TaskId`] is a 12-byte document identifier laid out as a 4-byte
//! big-endian seconds timestamp, a 5-byte per-process random value, and a
//! 3-byte big-endian counter. At the API boundary it is always a 24-character
//! hexadecimal string; [`TaskId::to_native`] is the single entry point for
//! text coming in and [`TaskId::to_external`] the single exit point.

use super::InvalidIdentifier;
use chrono::{DateTime, Utc};
use mockable::Clock;
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Number of bytes in a native task identifier.
pub const TASK_ID_LEN: usize = 12;

/// Number of characters in the external (hexadecimal) identifier form.
pub const TASK_ID_HEX_LEN: usize = TASK_ID_LEN * 2;

const COUNTER_MASK: u32 = 0x00FF_FFFF;
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Unique identifier for a persisted task document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId([u8; TASK_ID_LEN]);

impl TaskId {
    /// Creates an identifier from its raw byte representation.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; TASK_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Creates an identifier from a byte slice read back from storage.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifier`] when the slice is not exactly
    /// [`TASK_ID_LEN`] bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, InvalidIdentifier> {
        <[u8; TASK_ID_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| InvalidIdentifier::new(encode_hex(bytes)))
    }

    /// Returns the raw identifier bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; TASK_ID_LEN] {
        &self.0
    }

    /// Parses the external string form into a native identifier.
    ///
    /// Exactly [`TASK_ID_HEX_LEN`] ASCII hexadecimal digits are accepted, in
    /// either case.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifier`] for any other input.
    pub fn to_native(text: &str) -> Result<Self, InvalidIdentifier> {
        let raw = text.as_bytes();
        if raw.len() != TASK_ID_HEX_LEN {
            return Err(InvalidIdentifier::new(text));
        }

        let mut bytes = [0_u8; TASK_ID_LEN];
        for (byte, pair) in bytes.iter_mut().zip(raw.chunks_exact(2)) {
            let (Some(high), Some(low)) = (
                pair.first().copied().and_then(hex_value),
                pair.get(1).copied().and_then(hex_value),
            ) else {
                return Err(InvalidIdentifier::new(text));
            };
            *byte = (high << 4) | low;
        }
        Ok(Self(bytes))
    }

    /// Returns the external string form: lowercase hexadecimal.
    #[must_use]
    pub fn to_external(&self) -> String {
        encode_hex(&self.0)
    }

    /// Returns the creation second embedded in the identifier.
    #[must_use]
    #[expect(
        clippy::big_endian_bytes,
        reason = "the identifier layout stores its timestamp big-endian"
    )]
    pub fn timestamp(&self) -> DateTime<Utc> {
        let [a, b, c, d, ..] = self.0;
        let seconds = u32::from_be_bytes([a, b, c, d]);
        DateTime::from_timestamp(i64::from(seconds), 0).unwrap_or_default()
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        for nibble in [byte >> 4, byte & 0x0F] {
            if let Some(digit) = HEX_DIGITS.get(usize::from(nibble)) {
                encoded.push(char::from(*digit));
            }
        }
    }
    encoded
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_external())
    }
}

impl FromStr for TaskId {
    type Err = InvalidIdentifier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::to_native(value)
    }
}

impl TryFrom<&str> for TaskId {
    type Error = InvalidIdentifier;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::to_native(value)
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_external())
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = Cow::<'de, str>::deserialize(deserializer)?;
        Self::to_native(&text).map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for TaskId {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("TaskId")
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "pattern": "^[0-9a-fA-F]{24}$",
            "description": "Store-assigned task identifier in hexadecimal form"
        })
    }
}

/// Generates fresh [`TaskId`] values on behalf of a store adapter.
///
/// Identifiers from one generator are unique as long as fewer than 2^24 are
/// produced within a single second.
#[derive(Clone)]
pub struct ObjectIdGenerator {
    clock: Arc<dyn Clock + Send + Sync>,
    process_value: [u8; 5],
    counter: Arc<AtomicU32>,
}

impl ObjectIdGenerator {
    /// Creates a generator with a random process value and counter seed.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            clock,
            process_value: rand::random(),
            counter: Arc::new(AtomicU32::new(rand::random::<u32>() & COUNTER_MASK)),
        }
    }

    /// Returns the next identifier.
    #[must_use]
    #[expect(
        clippy::big_endian_bytes,
        reason = "the identifier layout stores timestamp and counter big-endian"
    )]
    pub fn generate(&self) -> TaskId {
        let seconds = u32::try_from(self.clock.utc().timestamp().max(0)).unwrap_or(u32::MAX);
        let count = self.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let [t0, t1, t2, t3] = seconds.to_be_bytes();
        let [p0, p1, p2, p3, p4] = self.process_value;
        let [_, c0, c1, c2] = count.to_be_bytes();
        TaskId([t0, t1, t2, t3, p0, p1, p2, p3, p4, c0, c1, c2])
    }
}

impl fmt::Debug for ObjectIdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectIdGenerator")
            .field("process_value", &encode_hex(&self.process_value))
            .finish_non_exhaustive()
    }
}
