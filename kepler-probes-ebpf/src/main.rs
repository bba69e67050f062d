//! Kernel-side half of the telemetry collector (spec doc §4 / design doc
//! §5): four probe programs attached to scheduler, soft-IRQ, page-cache,
//! and task-free kernel events, sharing the counter, timestamp, config,
//! and ring-buffer layers declared in the sibling modules.

#![no_std]
#![no_main]

mod config_map;
mod counters;
mod emit;
mod probes;
mod timestamps;

#[cfg(not(test))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    unsafe { core::hint::unreachable_unchecked() }
}

#[link_section = "license"]
#[no_mangle]
static LICENSE: [u8; 13] = *b"Dual MIT/GPL\0";
