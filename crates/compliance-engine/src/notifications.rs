//! Notification center counters

use serde::Serialize;
use shared_types::{DeliveryStatus, Notification, NotificationChannel};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationSummary {
    pub total: usize,
    pub unread: usize,
    pub pending: usize,
    pub failed: usize,
    pub by_channel: BTreeMap<NotificationChannel, usize>,
}

pub fn summarize_notifications(notifications: &[Notification]) -> NotificationSummary {
    let mut summary = NotificationSummary {
        total: notifications.len(),
        ..Default::default()
    };

    for n in notifications {
        if !n.read {
            summary.unread += 1;
        }
        match n.status {
            DeliveryStatus::Pending => summary.pending += 1,
            DeliveryStatus::Failed => summary.failed += 1,
            DeliveryStatus::Sent => {}
        }
        *summary.by_channel.entry(n.channel).or_insert(0) += 1;
    }

    summary
}

/// Mark every notification as read, returning how many changed
pub fn mark_all_read(notifications: &mut [Notification]) -> usize {
    let mut changed = 0;
    for n in notifications.iter_mut().filter(|n| !n.read) {
        n.read = true;
        changed += 1;
    }
    changed
}
