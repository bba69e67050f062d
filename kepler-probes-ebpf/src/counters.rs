//! Counter Snapshot Layer (design doc §5.1 / spec doc §4.1).
//!
//! Three hardware counters (cycles, retired instructions, LL cache misses)
//! each get a `PERF_EVENT_ARRAY` of raw perf-event file descriptors (one per
//! CPU, opened and populated by the external loader per spec doc §6) and a
//! plain `ARRAY` of u64 baselines, indexed by `cpu_id`. This mirrors
//! original_source's `cpu_cycles_event_reader`/`cpu_cycles` map pair
//! (`bpf/kepler.bpf.c`) exactly, down to the map types
//! (`BPF_MAP_TYPE_PERF_EVENT_ARRAY` + `BPF_MAP_TYPE_ARRAY`) — a baseline
//! array, not a per-CPU array, because the value at index `cpu_id` is only
//! ever touched by the CPU it indexes (spec doc §5 "Per-CPU baseline
//! slots").

use core::ffi::c_void;
use core::mem::size_of;

use aya_ebpf::{
    helpers::bpf_perf_event_read_value,
    macros::map,
    maps::{Array, PerfEventArray},
};
use kepler_probes_common::{config::DEFAULT_NUM_CPUS, logic::counter_delta};

/// Mirrors the kernel's `struct bpf_perf_event_value` (see
/// `bpf_perf_event_read_value(2)` / original_source's `kepler.bpf.h`).
#[repr(C)]
struct PerfEventValue {
    counter: u64,
    enabled: u64,
    running: u64,
}

#[map(name = "CPU_CYCLES_EVENT_READER")]
static mut CPU_CYCLES_EVENT_READER: PerfEventArray<u32> = PerfEventArray::new(0);
#[map(name = "CPU_CYCLES")]
static mut CPU_CYCLES: Array<u64> = Array::with_max_entries(DEFAULT_NUM_CPUS, 0);

#[map(name = "CPU_INSTRUCTIONS_EVENT_READER")]
static mut CPU_INSTRUCTIONS_EVENT_READER: PerfEventArray<u32> = PerfEventArray::new(0);
#[map(name = "CPU_INSTRUCTIONS")]
static mut CPU_INSTRUCTIONS: Array<u64> = Array::with_max_entries(DEFAULT_NUM_CPUS, 0);

#[map(name = "CACHE_MISS_EVENT_READER")]
static mut CACHE_MISS_EVENT_READER: PerfEventArray<u32> = PerfEventArray::new(0);
#[map(name = "CACHE_MISS")]
static mut CACHE_MISS: Array<u64> = Array::with_max_entries(DEFAULT_NUM_CPUS, 0);

/// Reads the raw counter for `cpu_id` out of `reader`, diffs it against
/// `baseline[cpu_id]`, then unconditionally rewrites the baseline with the
/// raw value — the "else 0" branch only ever guards the *returned* delta,
/// never the baseline store (spec doc §4.1 / P2). A failed read (the
/// helper returns non-zero) is a [`ProbeError::ReadFailure`][pe] and also
/// yields a 0 delta without writing a baseline, matching original_source's
/// `get_on_cpu_cycles`: `if (error) return 0;` before ever touching the
/// map.
///
/// [pe]: kepler_probes_common::error::ProbeError::ReadFailure
unsafe fn read_delta(reader: &PerfEventArray<u32>, baseline: &Array<u64>, cpu_id: u32) -> u64 {
    let mut value = PerfEventValue { counter: 0, enabled: 0, running: 0 };

    let ret = bpf_perf_event_read_value(
        reader as *const _ as *mut c_void,
        cpu_id as u64,
        &mut value as *mut _ as *mut c_void,
        size_of::<PerfEventValue>() as u32,
    );

    if ret != 0 {
        return 0;
    }

    let val = value.counter;
    let prev = baseline.get(cpu_id).copied();
    let delta = counter_delta(prev, val);
    if let Some(p) = baseline.get_ptr_mut(cpu_id) {
        core::ptr::write_volatile(p, val);
    }
    delta
}

pub struct CounterSnapshot;

impl CounterSnapshot {
    pub fn cpu_cycles_delta(cpu_id: u32) -> u64 {
        unsafe { read_delta(&CPU_CYCLES_EVENT_READER, &CPU_CYCLES, cpu_id) }
    }

    pub fn cpu_instr_delta(cpu_id: u32) -> u64 {
        unsafe { read_delta(&CPU_INSTRUCTIONS_EVENT_READER, &CPU_INSTRUCTIONS, cpu_id) }
    }

    pub fn cache_miss_delta(cpu_id: u32) -> u64 {
        unsafe { read_delta(&CACHE_MISS_EVENT_READER, &CACHE_MISS, cpu_id) }
    }
}
