use crate::{GeneratorConfig, PikaSnowflake, Poll};

/// The mutable counter owned by a single generator.
///
/// `sequence` cycles through `0..=4095`. `last_exhaustion_ms` is the wall
/// clock millisecond at which the sequence last reached 4095; generation for
/// that same millisecond is throttled until the wall clock moves past it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GeneratorState {
    sequence: u16,
    last_exhaustion_ms: u64,
}

impl GeneratorState {
    /// Creates a state with explicit values, e.g. to resume a counter or to
    /// force exhaustion in tests. `sequence` is masked to 12 bits.
    pub const fn new(sequence: u16, last_exhaustion_ms: u64) -> Self {
        Self {
            sequence: sequence & PikaSnowflake::max_sequence(),
            last_exhaustion_ms,
        }
    }

    pub const fn sequence(&self) -> u16 {
        self.sequence
    }

    pub const fn last_exhaustion_ms(&self) -> u64 {
        self.last_exhaustion_ms
    }

    const fn is_exhausted_at(&self, now_ms: u64) -> bool {
        self.sequence == PikaSnowflake::max_sequence() && now_ms == self.last_exhaustion_ms
    }

    /// Runs one generation step for `now_ms`.
    ///
    /// When the sequence was exhausted in `now_ms` and the wall clock still
    /// reads `now_ms` or earlier, nothing changes and the caller must wait.
    /// Otherwise the sequence advances (wrapping after 4095) and the new ID
    /// is packed. Reaching 4095 records the wall clock, not `now_ms`, as the
    /// exhaustion time.
    ///
    /// `wall_ms` is only read when needed. Clock-driven callers pass their
    /// `now_ms` reading back so a single sample decides both.
    pub(crate) fn poll(
        &mut self,
        config: &GeneratorConfig,
        now_ms: u64,
        wall_ms: impl Fn() -> u64,
    ) -> Poll {
        if self.is_exhausted_at(now_ms) {
            let yield_until = now_ms.saturating_add(1);
            if wall_ms() < yield_until {
                return Poll::Pending { yield_until };
            }
        }

        self.sequence = if self.sequence >= PikaSnowflake::max_sequence() {
            0
        } else {
            self.sequence + 1
        };

        if self.sequence == PikaSnowflake::max_sequence() {
            self.last_exhaustion_ms = wall_ms();
        }

        Poll::Ready {
            id: config.pack(now_ms, self.sequence),
        }
    }
}
