//! The four probe entry points (design doc §5.4 / spec doc §4.4). Each is a
//! thin `try_*` function returning `Result<(), ProbeError>` wrapped by an
//! outer `#[btf_tracepoint]`/`#[tracepoint]`/`#[fexit]` function that
//! collapses to the `0`/`1` return the kernel verifier expects, matching the
//! teacher's `Result -> libc errno` collapse in `sample/ring_buffer.rs`.
//!
//! `task_struct` is opaque from here — we only ever read the two fields
//! original_source's own minimal `struct task_struct { int pid; unsigned
//! int tgid; } __attribute__((preserve_access_index));` reads, via
//! `bpf_probe_read_kernel` rather than a direct pointer dereference, since
//! the full kernel struct layout is not ABI-stable across kernel builds.

use aya_ebpf::{
    helpers::{bpf_get_current_cgroup_id, bpf_get_current_pid_tgid, bpf_ktime_get_ns},
    macros::{btf_tracepoint, fexit, tracepoint},
    programs::{BtfTracePointContext, FExitContext, TracePointContext},
};
use aya_log_ebpf::{debug, trace};
use kepler_probes_common::{error::ProbeError, event::Event};

use crate::{config_map, counters::CounterSnapshot, emit::EventEmitter, timestamps::ThreadTimestamps};

#[repr(C)]
struct TaskStruct {
    pid: i32,
    tgid: i32,
}

/// Reads `(pid, tgid)` off a raw `task_struct` pointer handed to us by a
/// BTF raw tracepoint. Never trusted further than these two fields.
unsafe fn read_pid_tgid(task: *const TaskStruct) -> (u32, u32) {
    let pid = aya_ebpf::helpers::bpf_probe_read_kernel(&(*task).pid as *const i32)
        .unwrap_or(0) as u32;
    let tgid = aya_ebpf::helpers::bpf_probe_read_kernel(&(*task).tgid as *const i32)
        .unwrap_or(0) as u32;
    (pid, tgid)
}

fn smp_processor_id() -> u32 {
    unsafe { aya_ebpf::helpers::bpf_get_smp_processor_id() }
}

/// 4.4.1. Steps follow the spec doc's numbered list exactly; baselines are
/// always advanced (step 2) even when the emitted record ends up with its
/// counter fields suppressed to zero for a zero on-CPU interval.
fn try_sched_switch(ctx: BtfTracePointContext) -> Result<(), ProbeError> {
    let now = unsafe { bpf_ktime_get_ns() };
    let cpu_id = smp_processor_id();
    let config = config_map::current_config();
    trace!(&ctx, "sched_switch cpu={}", cpu_id);

    let departing: *const TaskStruct = unsafe { ctx.arg(1) };
    let arriving: *const TaskStruct = unsafe { ctx.arg(2) };
    let (departing_pid, departing_tid) = unsafe { read_pid_tgid(departing) };
    let (arriving_pid, arriving_tid) = unsafe { read_pid_tgid(arriving) };

    let (cycles, instr, cache_miss) = if config.hw_enabled() {
        (
            CounterSnapshot::cpu_cycles_delta(cpu_id),
            CounterSnapshot::cpu_instr_delta(cpu_id),
            CounterSnapshot::cache_miss_delta(cpu_id),
        )
    } else {
        (0, 0, 0)
    };

    let on_cpu_us = ThreadTimestamps::take_on_cpu_us(departing_tid, now);
    ThreadTimestamps::mark_on_cpu(arriving_tid, now);

    let cgroup_id = unsafe { bpf_get_current_cgroup_id() };

    let (cycles, instr, cache_miss) = if on_cpu_us == 0 {
        debug!(
            &ctx,
            "sched_switch off_tid={} suppressing counter deltas, zero on-cpu interval", departing_tid
        );
        (0, 0, 0)
    } else {
        (cycles, instr, cache_miss)
    };

    let event = Event::sched_switch(
        now,
        cpu_id,
        arriving_pid,
        arriving_tid,
        departing_pid,
        departing_tid,
        cgroup_id,
        cycles,
        instr,
        cache_miss,
    );
    EventEmitter::emit(event);
    Ok(())
}

#[btf_tracepoint(function = "sched_switch")]
pub fn sched_switch(ctx: BtfTracePointContext) -> u32 {
    match try_sched_switch(ctx) {
        Ok(()) => 0,
        Err(_e) => 1,
    }
}

/// 4.4.2. Only NET_TX/NET_RX/BLOCK are reported; everything else is
/// silently dropped at the probe (spec doc §8 P5).
fn try_softirq_entry(ctx: TracePointContext) -> Result<(), ProbeError> {
    let vec: u32 = unsafe { ctx.read_at(0).map_err(|_| ProbeError::ReadFailure)? };

    if !kepler_probes_common::event::is_tracked_irq_vector(vec) {
        trace!(&ctx, "softirq_entry vec={} not tracked, dropping", vec);
        return Ok(());
    }

    let now = unsafe { bpf_ktime_get_ns() };
    let cpu_id = smp_processor_id();
    let pid_tgid = bpf_get_current_pid_tgid();
    let tgid = (pid_tgid >> 32) as u32;
    let tid = pid_tgid as u32;

    EventEmitter::emit(Event::irq(now, cpu_id, tgid, tid, vec));
    Ok(())
}

#[tracepoint(category = "irq", name = "softirq_entry")]
pub fn softirq_entry(ctx: TracePointContext) -> u32 {
    match try_softirq_entry(ctx) {
        Ok(()) => 0,
        Err(_e) => 1,
    }
}

/// 4.4.3, read path: function-exit of `mark_page_accessed`.
fn try_mark_page_accessed(_ctx: FExitContext) -> Result<(), ProbeError> {
    emit_page_cache_hit();
    Ok(())
}

#[fexit(function = "mark_page_accessed")]
pub fn mark_page_accessed(ctx: FExitContext) -> i32 {
    match try_mark_page_accessed(ctx) {
        Ok(()) => 0,
        Err(_e) => 1,
    }
}

/// 4.4.3, write path: tracepoint `writeback/writeback_dirty_folio`. The
/// context carries no field this handler needs.
fn try_writeback_dirty_folio(_ctx: TracePointContext) -> Result<(), ProbeError> {
    emit_page_cache_hit();
    Ok(())
}

#[tracepoint(category = "writeback", name = "writeback_dirty_folio")]
pub fn writeback_dirty_folio(ctx: TracePointContext) -> u32 {
    match try_writeback_dirty_folio(ctx) {
        Ok(()) => 0,
        Err(_e) => 1,
    }
}

fn emit_page_cache_hit() {
    let now = unsafe { bpf_ktime_get_ns() };
    let cpu_id = smp_processor_id();
    let pid_tgid = bpf_get_current_pid_tgid();
    let tgid = (pid_tgid >> 32) as u32;
    let tid = pid_tgid as u32;
    EventEmitter::emit(Event::page_cache_hit(now, cpu_id, tgid, tid));
}

/// 4.4.4. No counter or cgroup work — user space only needs to know which
/// pid to drop its aggregation state for.
fn try_sched_process_free(ctx: BtfTracePointContext) -> Result<(), ProbeError> {
    let now = unsafe { bpf_ktime_get_ns() };
    let cpu_id = smp_processor_id();
    let task: *const TaskStruct = unsafe { ctx.arg(0) };
    let (_pid, tgid) = unsafe { read_pid_tgid(task) };

    EventEmitter::emit(Event::free(now, cpu_id, tgid));
    Ok(())
}

#[btf_tracepoint(function = "sched_process_free")]
pub fn sched_process_free(ctx: BtfTracePointContext) -> u32 {
    match try_sched_process_free(ctx) {
        Ok(()) => 0,
        Err(_e) => 1,
    }
}
