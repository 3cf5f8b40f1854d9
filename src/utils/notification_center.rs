use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use std::fmt::Display;
use tracing::{debug, error, info, instrument, warn};

use crate::model::notification::{Notification, NotificationCategory, NotificationId};
use crate::utils::notification_store::{LoadError, NotificationStore};

/// Default collection used when nothing valid is stored.
pub fn seed_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification::unread(
            1i64,
            "New Salary Slip Available",
            "Your salary slip for December 2024 is now available",
            now - Duration::hours(2),
            NotificationCategory::Salary,
        ),
        Notification::unread(
            2i64,
            "Incentive Payment Processed",
            "Your incentive for Q4 2024 has been processed",
            now - Duration::days(1),
            NotificationCategory::Incentive,
        ),
        Notification::unread(
            3i64,
            "Leave Request Approved",
            "Your leave request for Jan 15-20 has been approved",
            now - Duration::days(3),
            NotificationCategory::Leave,
        ),
    ]
}

/// Notifications split by calendar day, each bucket in collection order.
#[derive(Debug, Default, PartialEq)]
pub struct NotificationGroups<'a> {
    pub today: Vec<&'a Notification>,
    pub older: Vec<&'a Notification>,
}

/// Owns the notification collection for one session and writes it through the
/// store after every change.
pub struct NotificationCenter<S: NotificationStore> {
    store: S,
    notifications: Vec<Notification>,
    /// false when the stored value could not be read; it is left untouched
    writable: bool,
}

impl<S: NotificationStore> NotificationCenter<S> {
    pub fn open(store: S) -> Self {
        Self::open_at(store, Utc::now())
    }

    /// Load the stored collection, falling back to the seed. Never fails.
    ///
    /// A malformed value is removed and replaced. When the storage cannot be
    /// read at all the seed is used for this session only and nothing is
    /// written, so the stored value survives for the next one.
    pub fn open_at(store: S, now: DateTime<Utc>) -> Self {
        let (notifications, persist, writable) = match store.load() {
            Ok(Some(stored)) => {
                debug!(count = stored.len(), "Loaded stored notifications");
                (stored, false, true)
            }
            Ok(None) => {
                info!("No stored notifications, using defaults");
                (seed_notifications(now), true, true)
            }
            Err(e @ LoadError::Malformed(_)) => {
                warn!(error = %e, "Discarding stored notifications");
                if let Err(e) = store.clear() {
                    error!(error = %e, "Failed to clear stored notifications");
                }
                (seed_notifications(now), true, true)
            }
            Err(e @ LoadError::Unavailable(_)) => {
                error!(error = %e, "Using defaults without saving");
                (seed_notifications(now), false, false)
            }
        };

        let center = Self {
            store,
            notifications,
            writable,
        };
        if persist {
            center.persist();
        }
        center
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns whether anything changed. Unknown or already read ids are
    /// ignored.
    #[instrument(skip(self))]
    pub fn mark_as_read(&mut self, id: &NotificationId) -> bool {
        let target = self
            .notifications
            .iter_mut()
            .find(|n| &n.id == id && !n.read);

        match target {
            Some(notification) => {
                notification.read = true;
                self.persist();
                true
            }
            None => {
                debug!("Nothing to mark");
                false
            }
        }
    }

    pub fn mark_all_as_read(&mut self) -> bool {
        if self.notifications.iter().all(|n| n.read) {
            return false;
        }

        for notification in self.notifications.iter_mut() {
            notification.read = true;
        }
        self.persist();
        info!(count = self.notifications.len(), "Marked all notifications as read");
        true
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn group(&self) -> NotificationGroups<'_> {
        self.group_at(&Local::now())
    }

    /// "Today" means the same calendar date as `now` in `now`'s time zone,
    /// not the last 24 hours.
    pub fn group_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> NotificationGroups<'_> {
        let today = now.date_naive();
        let (today_items, older): (Vec<&Notification>, Vec<&Notification>) = self
            .notifications
            .iter()
            .partition(|n| n.timestamp.with_timezone(&now.timezone()).date_naive() == today);

        NotificationGroups {
            today: today_items,
            older,
        }
    }

    fn persist(&self) {
        if !self.writable {
            debug!("Storage unreadable this session, not saving");
            return;
        }
        // a failed write leaves the in-memory state authoritative
        if let Err(e) = self.store.save(&self.notifications) {
            error!(error = %e, "Failed to save notifications");
        }
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count > 1 {
        format!("{} {}s ago", count, unit)
    } else {
        format!("{} {} ago", count, unit)
    }
}

pub fn format_relative_time(timestamp: &DateTime<Utc>) -> String {
    format_relative_time_at(timestamp, &Local::now())
}

/// Human string for the time elapsed between `timestamp` and `now`.
///
/// Older than a week falls back to a `M/D/YYYY` date in `now`'s time zone.
pub fn format_relative_time_at<Tz>(timestamp: &DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let elapsed = now.with_timezone(&Utc) - *timestamp;
    let seconds = elapsed.num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if seconds < 60 {
        "Just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else {
        timestamp
            .with_timezone(&now.timezone())
            .format("%-m/%-d/%Y")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::local_storage::{keys, LocalStorage, MemoryStorage};
    use crate::utils::notification_store::{LocalNotificationStore, MemoryNotificationStore};
    use anyhow::{anyhow, Result};
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Memory storage whose next read can be made to fail once.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_next_read: AtomicBool,
    }

    impl LocalStorage for FlakyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            if self.fail_next_read.swap(false, Ordering::SeqCst) {
                return Err(anyhow!("disk unavailable"));
            }
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<()> {
            self.inner.remove_item(key)
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 10, 15, 0, 0).unwrap()
    }

    fn center_with(notifications: Vec<Notification>) -> NotificationCenter<MemoryNotificationStore> {
        NotificationCenter::open_at(MemoryNotificationStore::with(notifications), now())
    }

    #[test]
    fn relative_time_thresholds() {
        let now = now();
        let at = |delta: Duration| format_relative_time_at(&(now - delta), &now);

        assert_eq!(at(Duration::seconds(30)), "Just now");
        assert_eq!(at(Duration::seconds(59)), "Just now");
        assert_eq!(at(Duration::seconds(90)), "1 minute ago");
        assert_eq!(at(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(at(Duration::minutes(59)), "59 minutes ago");
        assert_eq!(at(Duration::minutes(60)), "1 hour ago");
        assert_eq!(at(Duration::hours(2)), "2 hours ago");
        assert_eq!(at(Duration::hours(24)), "1 day ago");
        assert_eq!(at(Duration::days(6)), "6 days ago");
        assert_eq!(at(Duration::days(7)), "12/3/2024");
        assert_eq!(at(Duration::days(40)), "10/31/2024");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = now();
        assert_eq!(format_relative_time_at(&(now + Duration::minutes(5)), &now), "Just now");
    }

    #[test]
    fn first_open_seeds_and_persists() {
        let center = NotificationCenter::open_at(MemoryNotificationStore::new(), now());
        assert_eq!(center.notifications().len(), 3);
        assert_eq!(center.unread_count(), 3);
        assert_eq!(center.store().saves(), 1);
        assert_eq!(center.store().snapshot().unwrap(), center.notifications());
    }

    #[test]
    fn stored_collection_is_used_as_is() {
        let stored = vec![Notification::unread(
            "x",
            "t",
            "m",
            now() - Duration::days(9),
            NotificationCategory::Leave,
        )];
        let center = center_with(stored.clone());
        assert_eq!(center.notifications(), stored.as_slice());
        assert_eq!(center.store().saves(), 0);
    }

    #[test]
    fn failed_read_keeps_stored_read_state() {
        let storage = FlakyStorage::default();
        NotificationCenter::open_at(LocalNotificationStore::new(&storage), now()).mark_all_as_read();
        let stored = storage.get_item(keys::NOTIFICATIONS).unwrap();

        storage.fail_next_read.store(true, Ordering::SeqCst);
        let mut degraded = NotificationCenter::open_at(LocalNotificationStore::new(&storage), now());
        assert_eq!(degraded.unread_count(), 3);
        assert!(degraded.mark_as_read(&NotificationId::Number(1)));
        assert_eq!(storage.get_item(keys::NOTIFICATIONS).unwrap(), stored);

        let restarted = NotificationCenter::open_at(LocalNotificationStore::new(&storage), now());
        assert_eq!(restarted.unread_count(), 0);
    }

    #[test]
    fn malformed_value_is_replaced_by_seed() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::NOTIFICATIONS, "[{\"id\": true}]").unwrap();

        let center = NotificationCenter::open_at(LocalNotificationStore::new(&storage), now());
        assert_eq!(center.unread_count(), 3);

        let reopened = NotificationCenter::open_at(LocalNotificationStore::new(&storage), now());
        assert_eq!(reopened.notifications(), center.notifications());
    }

    #[test]
    fn mark_as_read_flips_one_record() {
        let mut center = NotificationCenter::open_at(MemoryNotificationStore::new(), now());
        assert!(center.mark_as_read(&NotificationId::Number(2)));
        assert_eq!(center.unread_count(), 2);
        assert!(center.notifications()[1].read);
        assert!(center.store().snapshot().unwrap()[1].read);
    }

    #[test]
    fn mark_as_read_ignores_unknown_and_read_ids() {
        let mut center = NotificationCenter::open_at(MemoryNotificationStore::new(), now());
        let saves = center.store().saves();

        assert!(!center.mark_as_read(&NotificationId::Number(99)));
        assert!(!center.mark_as_read(&NotificationId::Text("1".into())));
        assert!(center.mark_as_read(&NotificationId::Number(1)));
        assert!(!center.mark_as_read(&NotificationId::Number(1)));

        assert_eq!(center.unread_count(), 2);
        assert_eq!(center.store().saves(), saves + 1);
    }

    #[test]
    fn mark_all_as_read_clears_unread_count() {
        let mut center = NotificationCenter::open_at(MemoryNotificationStore::new(), now());
        assert!(center.mark_all_as_read());
        assert_eq!(center.unread_count(), 0);
        assert!(!center.mark_all_as_read());

        let mut empty = center_with(Vec::new());
        assert!(!empty.mark_all_as_read());
        assert_eq!(empty.unread_count(), 0);
        assert_eq!(empty.store().saves(), 0);
    }

    #[test]
    fn groups_by_calendar_date() {
        let now = now();
        let stored = vec![
            Notification::unread(1i64, "a", "m", now - Duration::hours(2), NotificationCategory::Salary),
            // 23 hours ago is yesterday even though it is within a day
            Notification::unread(2i64, "b", "m", now - Duration::hours(23), NotificationCategory::Incentive),
            Notification::unread(3i64, "c", "m", now - Duration::hours(14), NotificationCategory::Leave),
            Notification::unread(4i64, "d", "m", now - Duration::days(3), NotificationCategory::Leave),
        ];
        let center = center_with(stored);
        let groups = center.group_at(&now);

        fn ids(items: &[&Notification]) -> Vec<String> {
            items.iter().map(|n| n.id.to_string()).collect()
        }
        assert_eq!(ids(&groups.today), vec!["1", "3"]);
        assert_eq!(ids(&groups.older), vec!["2", "4"]);
        assert_eq!(groups.today.len() + groups.older.len(), center.notifications().len());
    }

    #[test]
    fn grouping_includes_read_records() {
        let mut center = NotificationCenter::open_at(MemoryNotificationStore::new(), now());
        center.mark_all_as_read();
        let groups = center.group_at(&now());
        assert_eq!(groups.today.len(), 1);
        assert_eq!(groups.older.len(), 2);
    }
}
