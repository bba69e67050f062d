//! Wire format shared between the probe programs and whatever consumes the
//! ring buffer (spec doc §3). Every field is little-endian and naturally
//! aligned; the record is a fixed 72 bytes so a consumer can decode by
//! offset without a length prefix.

/// Discriminant for [`Event::event_type`]. Closed set, no default variant —
/// a record that doesn't match one of these four is a decode bug, not a
/// case to handle gracefully.
#[repr(u64)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventType {
    SchedSwitch = 1,
    Irq = 2,
    PageCacheHit = 3,
    Free = 4,
}

/// Soft-IRQ vectors this collector reports. Any other vector is filtered
/// silently at the probe (spec doc §4.4.2 / §8 P5).
pub const NET_TX: u32 = 2;
pub const NET_RX: u32 = 3;
pub const BLOCK: u32 = 4;
pub const TRACKED_IRQ_VECTORS: [u32; 3] = [NET_TX, NET_RX, BLOCK];

pub fn is_tracked_irq_vector(vec: u32) -> bool {
    TRACKED_IRQ_VECTORS.contains(&vec)
}

/// Fixed 72-byte event record. `#[repr(C)]` with this exact field order
/// produces no inter-field padding on any platform aya targets (every u64
/// lands on an 8-byte boundary, the u32 pairs pack back to back) — the 72
/// byte size is asserted by `event_is_72_bytes` below rather than forced
/// with explicit padding fields, so a field reorder that breaks the
/// invariant fails a test instead of silently changing the wire format.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Event {
    pub event_type: u64,
    pub ts: u64,
    pub pid: u32,
    pub tid: u32,
    pub offcpu_pid: u32,
    pub offcpu_tid: u32,
    pub offcpu_cgroup_id: u64,
    pub cpu_cycles: u64,
    pub cpu_instr: u64,
    pub cache_miss: u64,
    pub cpu_id: u32,
    pub irq_number: u32,
}

impl Event {
    pub const fn zeroed() -> Self {
        Self {
            event_type: 0,
            ts: 0,
            pid: 0,
            tid: 0,
            offcpu_pid: 0,
            offcpu_tid: 0,
            offcpu_cgroup_id: 0,
            cpu_cycles: 0,
            cpu_instr: 0,
            cache_miss: 0,
            cpu_id: 0,
            irq_number: 0,
        }
    }

    pub fn sched_switch(
        ts: u64,
        cpu_id: u32,
        arriving_pid: u32,
        arriving_tid: u32,
        departing_pid: u32,
        departing_tid: u32,
        offcpu_cgroup_id: u64,
        cpu_cycles: u64,
        cpu_instr: u64,
        cache_miss: u64,
    ) -> Self {
        Self {
            event_type: EventType::SchedSwitch as u64,
            ts,
            pid: arriving_pid,
            tid: arriving_tid,
            offcpu_pid: departing_pid,
            offcpu_tid: departing_tid,
            offcpu_cgroup_id,
            cpu_cycles,
            cpu_instr,
            cache_miss,
            cpu_id,
            irq_number: 0,
        }
    }

    pub fn irq(ts: u64, cpu_id: u32, pid: u32, tid: u32, irq_number: u32) -> Self {
        Self {
            event_type: EventType::Irq as u64,
            ts,
            pid,
            tid,
            cpu_id,
            irq_number,
            ..Self::zeroed()
        }
    }

    pub fn page_cache_hit(ts: u64, cpu_id: u32, pid: u32, tid: u32) -> Self {
        Self {
            event_type: EventType::PageCacheHit as u64,
            ts,
            pid,
            tid,
            cpu_id,
            ..Self::zeroed()
        }
    }

    pub fn free(ts: u64, cpu_id: u32, pid: u32) -> Self {
        Self {
            event_type: EventType::Free as u64,
            ts,
            pid,
            cpu_id,
            ..Self::zeroed()
        }
    }
}

#[cfg(feature = "ebpf")]
unsafe impl aya_ebpf::Pod for Event {}

#[cfg(feature = "user")]
unsafe impl aya::Pod for Event {}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::size_of;
    use pretty_assertions::assert_eq;

    #[test]
    fn event_is_72_bytes() {
        assert_eq!(size_of::<Event>(), 72);
    }

    #[test]
    fn sched_switch_labels_arriving_and_departing_correctly() {
        let e = Event::sched_switch(1_000_000, 0, 2, 2, 1, 1, 77, 400, 700, 10);
        assert_eq!(e.event_type, EventType::SchedSwitch as u64);
        assert_eq!(e.pid, 2);
        assert_eq!(e.tid, 2);
        assert_eq!(e.offcpu_pid, 1);
        assert_eq!(e.offcpu_tid, 1);
        assert_eq!(e.offcpu_cgroup_id, 77);
        assert_eq!(e.cpu_cycles, 400);
        assert_eq!(e.cpu_instr, 700);
        assert_eq!(e.cache_miss, 10);
    }

    #[test]
    fn irq_filter_accepts_only_net_tx_net_rx_block() {
        assert!(is_tracked_irq_vector(NET_TX));
        assert!(is_tracked_irq_vector(NET_RX));
        assert!(is_tracked_irq_vector(BLOCK));
        assert!(!is_tracked_irq_vector(7));
    }
}
