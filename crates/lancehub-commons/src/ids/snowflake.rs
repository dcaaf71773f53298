// Snowflake id generator

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Snowflake id generator for time-ordered unique identifiers.
///
/// Format (64 bits):
/// - 41 bits: milliseconds since the custom epoch
/// - 10 bits: worker id
/// - 12 bits: per-millisecond sequence
pub struct SnowflakeGenerator {
    /// Worker id (0-1023)
    worker_id: u16,

    /// State protected by mutex
    state: Mutex<GeneratorState>,
}

struct GeneratorState {
    last_timestamp: u64,
    sequence: u16,
}

impl SnowflakeGenerator {
    /// Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH: u64 = 1704067200000;

    const MAX_WORKER_ID: u16 = 1023;
    const MAX_SEQUENCE: u16 = 4095;

    /// Create a new generator for the given worker id.
    pub fn new(worker_id: u16) -> Self {
        assert!(
            worker_id <= Self::MAX_WORKER_ID,
            "worker_id must be <= {}",
            Self::MAX_WORKER_ID
        );
        Self {
            worker_id,
            state: Mutex::new(GeneratorState {
                last_timestamp: 0,
                sequence: 0,
            }),
        }
    }

    /// Generate the next id.
    ///
    /// Ids are strictly increasing for a given worker. If the clock
    /// moves backwards, generation continues from the last observed
    /// timestamp rather than handing out duplicates.
    pub fn next_id(&self) -> i64 {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let mut timestamp = Self::current_millis().max(state.last_timestamp);

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & Self::MAX_SEQUENCE;
            if state.sequence == 0 {
                // Sequence exhausted for this millisecond; advance the
                // logical clock rather than handing out a duplicate.
                timestamp = state.last_timestamp + 1;
            }
        } else {
            state.sequence = 0;
        }

        state.last_timestamp = timestamp;

        let ts_part = (timestamp - Self::EPOCH) & ((1 << 41) - 1);
        ((ts_part as i64) << 22) | ((self.worker_id as i64) << 12) | (state.sequence as i64)
    }

    fn current_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_and_increasing() {
        let gen = SnowflakeGenerator::new(1);
        let mut seen = HashSet::new();
        let mut last = 0;
        for _ in 0..10_000 {
            let id = gen.next_id();
            assert!(id > last, "ids must be strictly increasing");
            assert!(seen.insert(id), "duplicate id generated");
            last = id;
        }
    }

    #[test]
    fn sequence_wrap_keeps_ids_increasing() {
        let gen = SnowflakeGenerator::new(2);
        let mut last = gen.next_id();
        // More ids than one millisecond's sequence space holds, so the
        // generator must roll onto the next logical timestamp.
        for _ in 0..(SnowflakeGenerator::MAX_SEQUENCE as usize * 4) {
            let id = gen.next_id();
            assert!(id > last, "ids must keep increasing across a sequence wrap");
            last = id;
        }
    }

    #[test]
    #[should_panic(expected = "worker_id must be")]
    fn rejects_out_of_range_worker() {
        let _ = SnowflakeGenerator::new(1024);
    }
}
