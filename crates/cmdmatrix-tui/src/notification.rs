use std::collections::VecDeque;

use cmdmatrix::Severity;

use crate::clock::Countdown;

/// Oldest notifications are dropped beyond this many.
const MAX_NOTIFICATIONS: usize = 5;

/// A transient message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub remaining: Countdown,
}

/// Expiring queue of notifications.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    items: VecDeque<Notification>,
}

impl Notifications {
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, ticks: u16) {
        if ticks == 0 {
            return;
        }
        if self.items.len() == MAX_NOTIFICATIONS {
            self.items.pop_front();
        }
        self.items.push_back(Notification {
            message: message.into(),
            severity,
            remaining: Countdown::new(ticks),
        });
    }

    /// Count every notification down by one tick and drop the expired ones.
    pub fn decay(&mut self) {
        self.items.retain_mut(|n| !n.remaining.tick());
    }

    /// The most recent notification.
    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_is_most_recent() {
        let mut n = Notifications::default();
        n.push("a", Severity::Info, 3);
        n.push("b", Severity::Error, 3);
        assert_eq!(n.latest().unwrap().message, "b");
        assert_eq!(n.latest().unwrap().severity, Severity::Error);
    }

    #[test]
    fn decay_removes_at_zero() {
        let mut n = Notifications::default();
        n.push("short", Severity::Info, 1);
        n.push("long", Severity::Info, 3);
        n.decay();
        assert_eq!(n.len(), 1);
        assert_eq!(n.latest().unwrap().remaining.remaining(), 2);
        n.decay();
        n.decay();
        assert!(n.is_empty());
    }

    #[test]
    fn queue_is_bounded() {
        let mut n = Notifications::default();
        for i in 0..8 {
            n.push(format!("m{i}"), Severity::Info, 10);
        }
        assert_eq!(n.len(), MAX_NOTIFICATIONS);
        assert_eq!(n.iter().next().unwrap().message, "m3");
    }

    #[test]
    fn zero_tick_notification_is_ignored() {
        let mut n = Notifications::default();
        n.push("never", Severity::Warning, 0);
        assert!(n.is_empty());
    }
}
