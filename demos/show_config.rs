//! Prints the default `Config` and attachment-point names a loader would
//! use to wire up `kepler-probes-ebpf`. Not a loader itself — see the
//! crate-level docs in `kepler-probes` for what is and isn't implemented
//! here.

use kepler_probes::{config::Config, AttachPoints};

fn main() {
    env_logger::init();

    let config = Config::default();
    log::info!(
        "default config: hw={} num_cpus={} map_size={}",
        config.hw,
        config.num_cpus,
        config.map_size
    );

    println!("attach points:");
    println!("  {}", AttachPoints::SCHED_SWITCH);
    println!("  {}", AttachPoints::SOFTIRQ_ENTRY);
    println!("  {}", AttachPoints::MARK_PAGE_ACCESSED);
    println!("  {}", AttachPoints::WRITEBACK_DIRTY_FOLIO);
    println!("  {}", AttachPoints::SCHED_PROCESS_FREE);
}
