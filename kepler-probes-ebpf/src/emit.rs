//! Event Emitter (design doc §5.3 / spec doc §4.3 / §4.5).
//!
//! A single 256 KiB `RINGBUF` map shared by every probe. `reserve`
//! failing means the buffer is full — spec doc §7's ReservationFailure —
//! and the event is simply dropped, no error record, no retry. On success
//! the wake-up flag is computed from how much unconsumed data is already
//! sitting in the ring (queried via the kernel's `BPF_RB_AVAIL_DATA`, the
//! same introspection original_source's `kepler.bpf.h` lists among its
//! `bpf_ringbuf_query` flag constants) against the 1000-record threshold.

use core::ffi::c_void;
use core::mem::size_of;

use aya_ebpf::{helpers::bpf_ringbuf_query, macros::map, maps::RingBuf};
use kepler_probes_common::{
    config::RING_BUFFER_BYTES,
    event::Event,
    logic::{wake_flag, WakeFlag},
};

const BPF_RB_AVAIL_DATA: u64 = 0;
const BPF_RB_NO_WAKEUP: u64 = 1 << 0;
const BPF_RB_FORCE_WAKEUP: u64 = 1 << 1;

#[map(name = "EVENTS")]
static mut EVENTS: RingBuf = RingBuf::with_byte_size(RING_BUFFER_BYTES, 0);

pub struct EventEmitter;

impl EventEmitter {
    /// Reserves, fills, and submits one record. Never blocks; never
    /// panics on back-pressure (P6) — a full ring just loses this event.
    pub fn emit(event: Event) {
        unsafe {
            let entry = match EVENTS.reserve::<Event>(0) {
                Some(entry) => entry,
                None => return,
            };

            let mut entry = entry;
            entry.write(event);

            let pending = bpf_ringbuf_query(&EVENTS as *const _ as *mut c_void, BPF_RB_AVAIL_DATA);
            let flag = match wake_flag(pending, size_of::<Event>() as u64) {
                WakeFlag::ForceWakeup => BPF_RB_FORCE_WAKEUP,
                WakeFlag::NoWakeup => BPF_RB_NO_WAKEUP,
            };

            entry.submit(flag);
        }
    }
}
