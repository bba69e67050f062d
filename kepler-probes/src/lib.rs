//! Host-side contract for the `kepler-probes` eBPF telemetry collector.
//!
//! This crate carries no loader: attaching the programs in
//! `kepler-probes-ebpf`, opening the per-CPU perf-event file descriptors
//! the counter maps expect, and draining the ring buffer are all left to
//! whatever aya-based loader embeds this collector (attaching, framework
//! choice, and output sinks are explicitly out of scope here). What it
//! does provide is the typed contract a loader needs to talk to those
//! programs correctly: the wire-format [`Event`][kepler_probes_common::event::Event]
//! and [`Config`][kepler_probes_common::config::Config] from
//! `kepler-probes-common`, re-exported with the `user` (`aya::Pod`)
//! feature enabled, plus the attachment-point names below.

pub use kepler_probes_common::{config, error, event, logic};

/// Names of the kernel tracepoints/functions `kepler-probes-ebpf`'s
/// programs attach to, and the probe each corresponds to. A loader
/// matches these against the program names exported by the compiled
/// eBPF object; this crate does not load or attach anything itself.
pub struct AttachPoints;

impl AttachPoints {
    /// `#[btf_tracepoint(function = "sched_switch")]` — prev-task and
    /// next-task pointers arrive at raw-tracepoint argument positions 1
    /// and 2.
    pub const SCHED_SWITCH: &'static str = "sched_switch";

    /// `#[tracepoint(category = "irq", name = "softirq_entry")]` —
    /// vector number at context position 0.
    pub const SOFTIRQ_ENTRY: &'static str = "irq/softirq_entry";

    /// `#[fexit(function = "mark_page_accessed")]` — read-path page-cache
    /// hit, no arguments consumed.
    pub const MARK_PAGE_ACCESSED: &'static str = "mark_page_accessed";

    /// `#[tracepoint(category = "writeback", name = "writeback_dirty_folio")]`
    /// — write-path page-cache hit, no arguments consumed.
    pub const WRITEBACK_DIRTY_FOLIO: &'static str = "writeback/writeback_dirty_folio";

    /// `#[btf_tracepoint(function = "sched_process_free")]` — exiting
    /// task pointer at raw-tracepoint argument position 0.
    pub const SCHED_PROCESS_FREE: &'static str = "sched_process_free";
}

/// Names of the maps a loader must populate or drain. Types match
/// `kepler-probes-common`; sizes match [`config`].
pub struct MapNames;

impl MapNames {
    pub const EVENTS: &'static str = "EVENTS";
    pub const CONFIG: &'static str = "CONFIG";
    pub const CPU_CYCLES_EVENT_READER: &'static str = "CPU_CYCLES_EVENT_READER";
    pub const CPU_INSTRUCTIONS_EVENT_READER: &'static str = "CPU_INSTRUCTIONS_EVENT_READER";
    pub const CACHE_MISS_EVENT_READER: &'static str = "CACHE_MISS_EVENT_READER";
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn attach_points_match_probe_module_tracepoint_names() {
        assert_eq!(AttachPoints::SCHED_SWITCH, "sched_switch");
        assert_eq!(AttachPoints::SOFTIRQ_ENTRY, "irq/softirq_entry");
        assert_eq!(AttachPoints::SCHED_PROCESS_FREE, "sched_process_free");
    }
}
