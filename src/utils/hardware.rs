use std::fmt;

use sysinfo::System;

/// Snapshot of the host the flood runs from. Throughput figures only mean
/// something next to the machine that produced them.
#[derive(Debug, Clone, Copy)]
pub struct HostInfo {
    pub cpu_cores: usize,
    pub total_memory: u64,
    pub available_memory: u64,
}

impl HostInfo {
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        Self {
            cpu_cores: sys.cpus().len(),
            total_memory: sys.total_memory(),
            available_memory: sys.available_memory(),
        }
    }
}

impl fmt::Display for HostInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MIB: u64 = 1024 * 1024;
        write!(
            f,
            "{} cores, {} MiB total, {} MiB available",
            self.cpu_cores,
            self.total_memory / MIB,
            self.available_memory / MIB
        )
    }
}
