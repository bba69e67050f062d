//! Compile-time-configurable constants (spec doc §6), surfaced to the
//! probe crate as a one-entry `Array<Config>` map the loader patches before
//! attach — the BTF-tagged-read-only-section equivalent of the teacher's
//! `perf_event_attr` assembled by `EventConfig`/`SamplingConfig` before
//! `perf_event_open`.

pub const DEFAULT_HW_ENABLED: u32 = 1;
pub const DEFAULT_NUM_CPUS: u32 = 128;
pub const DEFAULT_MAP_SIZE: u32 = 32_768;

/// Ring buffer size and its adaptive wake-up threshold (spec doc §3/§4.3).
/// Not loader-configurable; fixed by design.
pub const RING_BUFFER_BYTES: u32 = 256 * 1024;
pub const WAKE_UP_EVENT_THRESHOLD: u64 = 1000;

#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// When 0, skip hardware counter reads and emit zero deltas.
    pub hw: u32,
    /// Sizing hint for the per-CPU baseline arrays.
    pub num_cpus: u32,
    /// Thread-timestamp table capacity.
    pub map_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hw: DEFAULT_HW_ENABLED,
            num_cpus: DEFAULT_NUM_CPUS,
            map_size: DEFAULT_MAP_SIZE,
        }
    }
}

impl Config {
    pub const fn const_default() -> Self {
        Self {
            hw: DEFAULT_HW_ENABLED,
            num_cpus: DEFAULT_NUM_CPUS,
            map_size: DEFAULT_MAP_SIZE,
        }
    }

    pub fn hw_enabled(&self) -> bool {
        self.hw != 0
    }
}

#[cfg(feature = "ebpf")]
unsafe impl aya_ebpf::Pod for Config {}

#[cfg(feature = "user")]
unsafe impl aya::Pod for Config {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_matches_documented_defaults() {
        let c = Config::default();
        assert_eq!(c.hw, 1);
        assert_eq!(c.num_cpus, 128);
        assert_eq!(c.map_size, 32_768);
        assert!(c.hw_enabled());
    }

    #[test]
    fn hw_zero_disables_counters() {
        let c = Config { hw: 0, ..Config::default() };
        assert!(!c.hw_enabled());
    }
}
