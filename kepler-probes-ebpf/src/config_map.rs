//! The BTF-tagged read-only configuration section (spec doc §6): a
//! one-entry `Array<Config>` the loader writes before attach. This is the
//! probe crate's equivalent of the teacher's `perf_event_attr` assembled
//! by a builder before `perf_event_open` — values fixed for the lifetime
//! of the attached program, never mutated from inside a probe.

use aya_ebpf::{macros::map, maps::Array};
use kepler_probes_common::config::Config;

const CONFIG_KEY: u32 = 0;

#[map(name = "CONFIG")]
static mut CONFIG: Array<Config> = Array::with_max_entries(1, 0);

/// Falls back to [`Config::const_default`] if the loader never populated
/// the map — a probe should never fail to run for want of configuration.
///
/// `bpf_map_lookup_elem` on a `BPF_MAP_TYPE_ARRAY` always succeeds for an
/// in-bounds index, returning a zero-initialized element rather than
/// `None`; `CONFIG.get(0)` therefore reads `Config{hw:0,num_cpus:0,
/// map_size:0}`, not "unset", until a loader writes real values. Treat
/// `num_cpus == 0` as that not-yet-populated state instead of relying on
/// `Option::None`, which this map type never produces.
pub fn current_config() -> Config {
    match unsafe { CONFIG.get(CONFIG_KEY).copied() } {
        Some(cfg) if cfg.num_cpus != 0 => cfg,
        _ => Config::const_default(),
    }
}
