//! Thread Timestamp Layer (design doc §5.2 / spec doc §4.2).
//!
//! `on_cpu_since[tid]` lives in an `LRU_HASH` map capacity `MAP_SIZE`
//! (32,768), matching original_source's `pid_time_map`. LRU eviction means
//! a long-sleeping tid that falls out of the table simply produces a zero
//! interval on its next switch (spec doc §4.2's documented degrade path) —
//! there is nothing else to do about it here.

use aya_ebpf::{macros::map, maps::LruHashMap};
use kepler_probes_common::{config::DEFAULT_MAP_SIZE, logic::on_cpu_duration_us};

#[map(name = "ON_CPU_SINCE")]
static mut ON_CPU_SINCE: LruHashMap<u32, u64> = LruHashMap::with_max_entries(DEFAULT_MAP_SIZE, 0);

pub struct ThreadTimestamps;

impl ThreadTimestamps {
    /// Inserts or overwrites `on_cpu_since[tid] = ts`, unconditionally.
    pub fn mark_on_cpu(tid: u32, ts: u64) {
        unsafe {
            let _ = ON_CPU_SINCE.insert(&tid, &ts, 0);
        }
    }

    /// Consumes `on_cpu_since[tid]` if present and `now` has advanced past
    /// it, returning the elapsed microseconds; deletes the entry so a
    /// second `take` before the next `mark` reports zero rather than
    /// double-counting (P3).
    pub fn take_on_cpu_us(tid: u32, now: u64) -> u64 {
        unsafe {
            let since = ON_CPU_SINCE.get(&tid).copied();
            match on_cpu_duration_us(since, now) {
                Some(us) => {
                    let _ = ON_CPU_SINCE.remove(&tid);
                    us
                }
                None => 0,
            }
        }
    }
}
