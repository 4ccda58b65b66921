use crate::PikaSnowflake;

/// The fields of a [`PikaSnowflake`], resolved against an epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DecodedSnowflake {
    /// The packed ID.
    pub id: PikaSnowflake,
    /// Milliseconds since the Unix epoch (`delta + epoch_ms`).
    pub timestamp_ms: u64,
    /// The generating node.
    pub node_id: u16,
    /// The per-millisecond sequence.
    pub sequence: u16,
    /// The epoch the timestamp was resolved against.
    pub epoch_ms: u64,
}
