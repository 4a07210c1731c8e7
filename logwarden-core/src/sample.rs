//! Simulated event log source
//!
//! Produces a small Windows Event Log export in the tab-separated layout the
//! parser understands. Used by automatic scans when no log file is supplied.

use chrono::{DateTime, Utc};

use crate::format::CANONICAL_HEADER;

/// Events as `(level, source, event id, description)`
const SIMULATED_EVENTS: &[(&str, &str, &str, &str)] = &[
    (
        "Information",
        "System",
        "7036",
        "The Windows Update service entered the running state.",
    ),
    (
        "Information",
        "Service Control Manager",
        "7040",
        "The start type of the Windows Update service was changed.",
    ),
    (
        "Warning",
        "Microsoft-Windows-DistributedCOM",
        "10016",
        "The application-specific permission settings do not grant Local Activation permission.",
    ),
    (
        "Information",
        "Microsoft-Windows-Security-Auditing",
        "4624",
        "An account was successfully logged on.",
    ),
    (
        "Information",
        "Microsoft-Windows-Kernel-General",
        "16",
        "The access history in hive was cleared.",
    ),
];

/// Builds a simulated event log with every event stamped at `now`
pub fn simulated_event_log(now: DateTime<Utc>) -> String {
    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();

    let mut lines = Vec::with_capacity(SIMULATED_EVENTS.len() + 1);
    lines.push(CANONICAL_HEADER.to_string());
    for (level, source, event_id, description) in SIMULATED_EVENTS {
        lines.push(format!(
            "{level}\t{timestamp}\t{source}\t{event_id}\tNone\t{description}"
        ));
    }

    lines.join("\n")
}
