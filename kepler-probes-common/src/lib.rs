//! Types and pure arithmetic shared between the probe programs
//! (`kepler-probes-ebpf`) and whatever loads/decodes them. `no_std` by
//! default so it can be linked into the `bpfel-unknown-none` target
//! without an allocator; enable `user` from a host-target crate that wants
//! `aya::Pod` impls for userspace map access, or `ebpf` (pulled in
//! automatically by `kepler-probes-ebpf`) for `aya_ebpf::Pod`.
#![cfg_attr(not(any(test, feature = "user")), no_std)]

pub mod config;
pub mod error;
pub mod event;
pub mod logic;

pub use config::Config;
pub use error::ProbeError;
pub use event::{Event, EventType};
pub use logic::WakeFlag;
