use super::constants::*;

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn log_file_path() -> String {
    LOG_FILE_PATH.to_string()
}

pub(crate) fn origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

pub(crate) fn push_path() -> String {
    PUSH_PATH.to_string()
}

pub(crate) fn suppression_window_ms() -> u64 {
    SUPPRESSION_WINDOW_MS
}

pub(crate) fn retention_window_ms() -> u64 {
    RETENTION_WINDOW_MS
}

pub(crate) fn reconnect_delay_ms() -> u64 {
    RECONNECT_DELAY_MS
}

pub(crate) fn exit_transition_ms() -> u64 {
    EXIT_TRANSITION_MS
}

pub(crate) fn alert_types() -> Vec<String> {
    ALERT_TYPES.iter().map(|t| t.to_string()).collect()
}

pub(crate) fn default_true() -> bool {
    true
}
