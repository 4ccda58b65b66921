use core::{fmt, num::ParseIntError, str::FromStr};

use crate::DecodedSnowflake;

/// A 64-bit Snowflake ID using the Pika layout
///
/// - 42 bits signed delta (ms since the generator's epoch)
/// - 10 bits node ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63             22 21            12 11             0
///              +----------------+----------------+---------------+
///  Field:      |   delta (42)   |  node ID (10)  | sequence (12) |
///              +----------------+----------------+---------------+
///              |<----- MSB ---------- 64 bits --------- LSB ---->|
/// ```
///
/// The delta field is a two's-complement value. A clock reading before the
/// epoch packs as a negative delta, which sets the top bit; the raw `u64`
/// then reads as a very large number but [`PikaSnowflake::delta_ms`]
/// recovers the signed offset with an arithmetic shift. The representable
/// range is `[-2^41, 2^41)` milliseconds (about ±69.7 years) around the
/// epoch. Deltas outside it are truncated by the field mask.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PikaSnowflake {
    id: u64,
}

impl PikaSnowflake {
    /// Bitmask for the 42-bit delta field. Occupies bits 22 through 63.
    pub const DELTA_MASK: u64 = (1 << 42) - 1;

    /// Bitmask for the 10-bit node ID field. Occupies bits 12 through 21.
    pub const NODE_ID_MASK: u64 = (1 << 10) - 1;

    /// Bitmask for the 12-bit sequence field. Occupies bits 0 through 11.
    pub const SEQUENCE_MASK: u64 = (1 << 12) - 1;

    /// Number of bits to shift the delta to its correct position (bit 22).
    pub const DELTA_SHIFT: u64 = 22;

    /// Number of bits to shift the node ID to its correct position (bit 12).
    pub const NODE_ID_SHIFT: u64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Packs the three fields into an ID, masking each to its width.
    pub const fn from_components(delta_ms: i64, node_id: u16, sequence: u16) -> Self {
        let delta = ((delta_ms as u64) & Self::DELTA_MASK) << Self::DELTA_SHIFT;
        let node_id = ((node_id as u64) & Self::NODE_ID_MASK) << Self::NODE_ID_SHIFT;
        let sequence = ((sequence as u64) & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: delta | node_id | sequence,
        }
    }

    /// Wraps a raw integer without any validation.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw packed integer.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Extracts the signed millisecond offset from the epoch.
    pub const fn delta_ms(&self) -> i64 {
        (self.id as i64) >> Self::DELTA_SHIFT
    }

    /// Extracts the node ID.
    pub const fn node_id(&self) -> u16 {
        ((self.id >> Self::NODE_ID_SHIFT) & Self::NODE_ID_MASK) as u16
    }

    /// Extracts the sequence number.
    pub const fn sequence(&self) -> u16 {
        ((self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK) as u16
    }

    /// Returns the maximum node ID (1023).
    pub const fn max_node_id() -> u16 {
        Self::NODE_ID_MASK as u16
    }

    /// Returns the maximum sequence value (4095).
    pub const fn max_sequence() -> u16 {
        Self::SEQUENCE_MASK as u16
    }

    /// Returns the absolute timestamp in milliseconds since the Unix epoch,
    /// given the epoch this ID was generated against.
    ///
    /// Saturates at zero for deltas reaching before 1970.
    pub const fn timestamp_ms(&self, epoch_ms: u64) -> u64 {
        epoch_ms.saturating_add_signed(self.delta_ms())
    }

    /// Splits this ID into its fields relative to `epoch_ms`.
    ///
    /// This is a structural decode only: any `u64` decomposes, whether or
    /// not it was produced by a generator with this epoch.
    pub const fn decompose(&self, epoch_ms: u64) -> DecodedSnowflake {
        DecodedSnowflake {
            id: *self,
            timestamp_ms: self.timestamp_ms(epoch_ms),
            node_id: self.node_id(),
            sequence: self.sequence(),
            epoch_ms,
        }
    }
}

impl fmt::Display for PikaSnowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for PikaSnowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PikaSnowflake")
            .field("id", &self.id)
            .field("delta_ms", &self.delta_ms())
            .field("node_id", &self.node_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl FromStr for PikaSnowflake {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self::from_raw)
    }
}

impl From<PikaSnowflake> for u64 {
    fn from(id: PikaSnowflake) -> Self {
        id.to_raw()
    }
}

impl From<u64> for PikaSnowflake {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pika_id_fields_round_trip() {
        let id = PikaSnowflake::from_components(1_000, 622, 7);
        assert_eq!(id.delta_ms(), 1_000);
        assert_eq!(id.node_id(), 622);
        assert_eq!(id.sequence(), 7);
        assert_eq!(id.to_raw(), (1_000 << 22) | (622 << 12) | 7);
    }

    #[test]
    fn pika_id_every_sequence_round_trips() {
        for node_id in [0, 1, 511, PikaSnowflake::max_node_id()] {
            for sequence in 0..=PikaSnowflake::max_sequence() {
                let id = PikaSnowflake::from_components(123_456_789, node_id, sequence);
                assert_eq!(id.node_id(), node_id);
                assert_eq!(id.sequence(), sequence);
                assert_eq!(id.delta_ms(), 123_456_789);
            }
        }
    }

    #[test]
    fn pika_id_max() {
        let max_delta = (1_i64 << 41) - 1;
        let id = PikaSnowflake::from_components(
            max_delta,
            PikaSnowflake::max_node_id(),
            PikaSnowflake::max_sequence(),
        );
        assert_eq!(id.delta_ms(), max_delta);
        assert_eq!(id.node_id(), 1023);
        assert_eq!(id.sequence(), 4095);
        assert_eq!(id.to_raw(), i64::MAX as u64);
    }

    #[test]
    fn pika_id_zero() {
        let id = PikaSnowflake::from_components(0, 0, 0);
        assert_eq!(id.to_raw(), 0);
        assert_eq!(id.delta_ms(), 0);
        assert_eq!(id.node_id(), 0);
        assert_eq!(id.sequence(), 0);
    }

    #[test]
    fn negative_delta_recovered_by_arithmetic_shift() {
        let id = PikaSnowflake::from_components(-5, 3, 9);
        assert!(id.to_raw() > i64::MAX as u64);
        assert_eq!(id.delta_ms(), -5);
        assert_eq!(id.node_id(), 3);
        assert_eq!(id.sequence(), 9);

        let min_delta = -(1_i64 << 41);
        let id = PikaSnowflake::from_components(min_delta, 0, 0);
        assert_eq!(id.delta_ms(), min_delta);
    }

    #[test]
    fn delta_beyond_field_is_truncated() {
        let id = PikaSnowflake::from_components(1 << 42, 1, 1);
        assert_eq!(id.delta_ms(), 0);
        assert_eq!(id.node_id(), 1);
        assert_eq!(id.sequence(), 1);
    }

    #[test]
    fn decompose_applies_epoch() {
        let epoch = 1_640_995_200_000;
        let id = PikaSnowflake::from_components(42, 5, 6);
        let decoded = id.decompose(epoch);
        assert_eq!(decoded.id, id);
        assert_eq!(decoded.timestamp_ms, epoch + 42);
        assert_eq!(decoded.node_id, 5);
        assert_eq!(decoded.sequence, 6);
        assert_eq!(decoded.epoch_ms, epoch);

        let before = PikaSnowflake::from_components(-42, 5, 6).decompose(epoch);
        assert_eq!(before.timestamp_ms, epoch - 42);
    }

    #[test]
    fn timestamp_saturates_before_unix_epoch() {
        let id = PikaSnowflake::from_components(-100, 0, 0);
        assert_eq!(id.timestamp_ms(10), 0);
    }

    #[test]
    fn display_and_parse() {
        let id = PikaSnowflake::from_components(987_654, 1, 2);
        let text = id.to_string();
        assert_eq!(text, id.to_raw().to_string());
        assert_eq!(text.parse::<PikaSnowflake>().unwrap(), id);
        assert!("12a".parse::<PikaSnowflake>().is_err());
        assert!("-1".parse::<PikaSnowflake>().is_err());
    }

    #[test]
    fn ordering_follows_time_then_sequence() {
        let a = PikaSnowflake::from_components(10, 0, 4095);
        let b = PikaSnowflake::from_components(11, 0, 0);
        let c = PikaSnowflake::from_components(11, 0, 1);
        assert!(a < b && b < c);
    }

    #[test]
    fn serde_as_integer() {
        let id = PikaSnowflake::from_components(77, 8, 9);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, id.to_raw().to_string());
        let back: PikaSnowflake = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
