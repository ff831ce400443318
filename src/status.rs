//! Human-readable node status

use std::time::Duration;

use crate::collectors::bandwidth::{BandwidthTotals, format_bytes, format_uptime};

const RULE: &str = "========================================";

/// Read-only view of the node for status display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub totals: BandwidthTotals,
    pub uptime: Duration,
}

pub fn render_status(snapshot: &StatusSnapshot) -> String {
    [
        String::new(),
        RULE.to_string(),
        "       IGNITE NETWORK NODE STATUS".to_string(),
        RULE.to_string(),
        format!(
            "Total Uploaded:   {}",
            format_bytes(snapshot.totals.total_bytes_up)
        ),
        format!(
            "Total Downloaded: {}",
            format_bytes(snapshot.totals.total_bytes_down)
        ),
        format!("Uptime:           {}", format_uptime(snapshot.uptime)),
        RULE.to_string(),
    ]
    .join("\n")
}

pub fn print_status(snapshot: &StatusSnapshot) {
    println!("{}\n", render_status(snapshot));
}
