// src/monitor/metrics.rs

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct Metrics {
    pub command_count: AtomicU64,
    pub command_stats: DashMap<String, u64>,
}

impl Metrics {
    pub fn new() -> Self {
        Metrics::default()
    }

    pub fn record_command(&self, command: &str) {
        self.command_count.fetch_add(1, Ordering::Relaxed);
        self.command_stats
            .entry(command.to_string())
            .and_modify(|c| *c += 1)
            .or_insert(1);
    }

    /// `keys` 由调用方从 Store 取得
    pub fn to_prometheus(&self, keys: usize) -> String {
        let mut output = String::new();

        output.push_str("# HELP ledis_keys Number of keys in the store\n");
        output.push_str("# TYPE ledis_keys gauge\n");
        output.push_str(&format!("ledis_keys {}\n", keys));

        output.push_str("# HELP ledis_command_count Total commands processed\n");
        output.push_str("# TYPE ledis_command_count counter\n");
        output.push_str(&format!(
            "ledis_command_count {}\n",
            self.command_count.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP ledis_command_stats Command statistics\n");
        output.push_str("# TYPE ledis_command_stats counter\n");
        let mut stats: Vec<(String, u64)> = self
            .command_stats
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        stats.sort();
        for (command, n) in stats {
            output.push_str(&format!(
                "ledis_command_stats{{command=\"{}\"}} {}\n",
                command, n
            ));
        }

        output
    }
}
