pub const LOG_FILE_PATH: &str = "/tmp/agent-notifier.log";

/// Well-known push endpoint on the page origin
pub const PUSH_PATH: &str = "/ws/agent/notifications";

pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Identical messages inside this window are not shown again
pub const SUPPRESSION_WINDOW_MS: u64 = 5_000;

/// Dedupe entries older than this are evicted
pub const RETENTION_WINDOW_MS: u64 = 10_000;

pub const RECONNECT_DELAY_MS: u64 = 5_000;

/// Length of the exit transition before an alert is detached
pub const EXIT_TRANSITION_MS: u64 = 300;

pub const ALERT_TYPES: &[&str] = &[
    "reminder",
    "notification",
    "smart_reminder",
    "report_generated",
];
