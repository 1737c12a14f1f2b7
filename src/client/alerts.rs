#[cfg(test)]
#[path = "alerts_test.rs"]
mod tests;

use std::collections::HashMap;

use crate::models::Alert;

/// Alerts currently on screen, one per key.
#[derive(Debug, Default)]
pub struct ActiveAlertSet {
    alerts: HashMap<String, Alert>,
}

impl ActiveAlertSet {
    /// Inserts the alert under its key, returning the alert it replaces.
    pub fn insert(&mut self, alert: Alert) -> Option<Alert> {
        self.alerts.insert(alert.key().to_string(), alert)
    }

    pub fn take(&mut self, key: &str) -> Option<Alert> {
        self.alerts.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Alert> {
        self.alerts.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.alerts.contains_key(key)
    }

    /// Removes every alert, oldest first.
    pub fn drain(&mut self) -> Vec<Alert> {
        let mut alerts = self.alerts.drain().map(|(_, a)| a).collect::<Vec<_>>();
        alerts.sort_by_key(|a| a.shown_at());
        alerts
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys = self.alerts.keys().map(|k| k.as_str()).collect::<Vec<_>>();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
