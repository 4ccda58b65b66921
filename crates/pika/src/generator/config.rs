use core::time::Duration;

use crate::{DEFAULT_EPOCH, Error, PikaSnowflake, Result};

/// Immutable generator settings: the epoch IDs are measured from and the
/// node ID stamped into every ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeneratorConfig {
    epoch_ms: u64,
    node_id: u16,
}

impl Default for GeneratorConfig {
    /// The 2022-01-01 epoch with node ID 0.
    fn default() -> Self {
        Self {
            epoch_ms: DEFAULT_EPOCH.as_millis() as u64,
            node_id: 0,
        }
    }
}

impl GeneratorConfig {
    /// Creates a config from an epoch in milliseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `node_id` does not fit in 10 bits
    /// (above 1023). Out-of-range node IDs are rejected rather than masked,
    /// since masking would silently collide with another node.
    pub fn new(epoch_ms: u64, node_id: u16) -> Result<Self> {
        if node_id > PikaSnowflake::max_node_id() {
            return Err(Error::InvalidConfig {
                reason: format!(
                    "node id {node_id} is out of range 0..={}",
                    PikaSnowflake::max_node_id()
                ),
            });
        }
        Ok(Self { epoch_ms, node_id })
    }

    /// Creates a config from an epoch expressed as a [`Duration`] since the
    /// Unix epoch, e.g. [`DEFAULT_EPOCH`].
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::new`].
    pub fn with_epoch(epoch: Duration, node_id: u16) -> Result<Self> {
        Self::new(epoch.as_millis() as u64, node_id)
    }

    pub const fn epoch_ms(&self) -> u64 {
        self.epoch_ms
    }

    pub const fn node_id(&self) -> u16 {
        self.node_id
    }

    /// Signed offset of `now_ms` from the epoch. Negative before the epoch.
    pub const fn delta_ms(&self, now_ms: u64) -> i64 {
        (now_ms as i64).wrapping_sub(self.epoch_ms as i64)
    }

    pub(crate) const fn pack(&self, now_ms: u64, sequence: u16) -> PikaSnowflake {
        PikaSnowflake::from_components(self.delta_ms(now_ms), self.node_id, sequence)
    }
}
