//! Error taxonomy (spec doc §7). The teacher crate (`anp-perf_events`)
//! models its syscall-boundary errors as a closed `failure::Fail` enum with
//! a `#[fail(display = ...)]` string per variant and `From` impls at each
//! call site (`src/error.rs`). `failure` needs `std`, which the probe
//! target doesn't have, so this keeps the same shape — closed enum, one
//! variant per failure kind, a human-readable `Display` — without pulling
//! in an allocator.
//!
//! None of these ever reach the ring buffer: every probe handles its own
//! errors locally and degrades (zeroes a field, drops the record, filters
//! silently) rather than propagating. The enum exists so the degradation
//! decision is made in one matched place instead of being reinvented at
//! each call site.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProbeError {
    /// A hardware counter read failed; treated as a 0 delta, never
    /// suppresses the record itself.
    ReadFailure,
    /// The ring buffer had no room for the record; it is dropped.
    ReservationFailure,
    /// First observation on a CPU or tid; treated as a 0 delta/duration.
    MissingBaseline,
    /// `now <= previous_ts`; treated as a 0 duration, never negative.
    ClockAnomaly,
    /// Soft-IRQ vector outside {NET_TX, NET_RX, BLOCK}; filtered silently.
    UnknownIrq,
}

impl ProbeError {
    pub const fn as_str(self) -> &'static str {
        match self {
            ProbeError::ReadFailure => "hardware counter read failed",
            ProbeError::ReservationFailure => "ring buffer reservation failed",
            ProbeError::MissingBaseline => "no prior baseline for this cpu/tid",
            ProbeError::ClockAnomaly => "timestamp did not advance",
            ProbeError::UnknownIrq => "soft-irq vector is not tracked",
        }
    }
}

impl core::fmt::Display for ProbeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "user")]
impl std::error::Error for ProbeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_ne;

    #[test]
    fn every_kind_has_a_distinct_message() {
        let kinds = [
            ProbeError::ReadFailure,
            ProbeError::ReservationFailure,
            ProbeError::MissingBaseline,
            ProbeError::ClockAnomaly,
            ProbeError::UnknownIrq,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for (j, b) in kinds.iter().enumerate() {
                if i != j {
                    assert_ne!(a.as_str(), b.as_str());
                }
            }
        }
    }
}
