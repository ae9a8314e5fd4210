//! Turns raw runtime counters into operator-facing figures. No I/O.

use crate::gateway::RawStats;
use crate::model::ResourceSample;

const UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Derive percentages and byte totals from one raw sample.
pub fn derive(raw: &RawStats) -> ResourceSample {
    let memory_used = raw.memory_usage.saturating_sub(raw.memory_cache);
    let memory_percent = if raw.memory_limit > 0 {
        memory_used as f64 / raw.memory_limit as f64 * 100.0
    } else {
        0.0
    };

    let (network_rx, network_tx) = raw.networks.iter().fold((0u64, 0u64), |(rx, tx), iface| {
        (rx.saturating_add(iface.rx_bytes), tx.saturating_add(iface.tx_bytes))
    });

    // Last entry per op wins; entries are not totalled across devices.
    let mut block_read = 0;
    let mut block_write = 0;
    for entry in &raw.blkio_service_bytes {
        match entry.op.as_str() {
            "Read" => block_read = entry.value,
            "Write" => block_write = entry.value,
            _ => {}
        }
    }

    ResourceSample {
        cpu_percent: cpu_percent(raw),
        memory_used_bytes: memory_used,
        memory_limit_bytes: raw.memory_limit,
        memory_percent,
        network_rx_bytes: network_rx,
        network_tx_bytes: network_tx,
        block_read_bytes: block_read,
        block_write_bytes: block_write,
        process_count: raw.pids,
    }
}

/// CPU usage over the sampling window, scaled by the number of logical CPUs
/// in the per-CPU breakdown. Zero unless both deltas are positive and the
/// breakdown is non-empty.
pub fn cpu_percent(raw: &RawStats) -> f64 {
    let usage_delta = raw.cpu.total_usage as i128 - raw.precpu.total_usage as i128;
    let system_delta = raw.cpu.system_usage as i128 - raw.precpu.system_usage as i128;
    let cpus = raw.cpu.per_cpu_usage.len();

    if usage_delta > 0 && system_delta > 0 && cpus > 0 {
        (usage_delta as f64 / system_delta as f64) * cpus as f64 * 100.0
    } else {
        0.0
    }
}

/// Human-readable byte count in base-1024 units with one decimal place,
/// e.g. `1536` -> `"1.5 KiB"`. Values past `i64::MAX` are clamped.
pub fn format_bytes(bytes: u64) -> String {
    let bytes = bytes.min(i64::MAX as u64);
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut div = 1024u64;
    let mut exp = 0;
    let mut n = bytes / 1024;
    while n >= 1024 && exp + 1 < UNITS.len() {
        div *= 1024;
        exp += 1;
        n /= 1024;
    }
    format!("{:.1} {}", bytes as f64 / div as f64, UNITS[exp])
}
