use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::fmt::Display;

use crate::model::notification::{Notification, NotificationCategory, NotificationId};
use crate::utils::notification_center::{format_relative_time_at, NotificationCenter};
use crate::utils::notification_store::NotificationStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationItem {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub relative_time: String,
    pub read: bool,
    pub category: NotificationCategory,
}

/// Rendered notification panel: both buckets plus the badge count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationFeed {
    pub unread_count: usize,
    pub today: Vec<NotificationItem>,
    pub older: Vec<NotificationItem>,
}

impl NotificationFeed {
    pub fn is_empty(&self) -> bool {
        self.today.is_empty() && self.older.is_empty()
    }
}

fn to_item<Tz>(notification: &Notification, now: &DateTime<Tz>) -> NotificationItem
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    NotificationItem {
        id: notification.id.clone(),
        title: notification.title.clone(),
        message: notification.message.clone(),
        relative_time: format_relative_time_at(&notification.timestamp, now),
        read: notification.read,
        category: notification.category,
    }
}

pub fn notification_feed<S: NotificationStore>(center: &NotificationCenter<S>) -> NotificationFeed {
    notification_feed_at(center, &Local::now())
}

pub fn notification_feed_at<S, Tz>(center: &NotificationCenter<S>, now: &DateTime<Tz>) -> NotificationFeed
where
    S: NotificationStore,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let groups = center.group_at(now);
    NotificationFeed {
        unread_count: center.unread_count(),
        today: groups.today.into_iter().map(|n| to_item(n, now)).collect(),
        older: groups.older.into_iter().map(|n| to_item(n, now)).collect(),
    }
}
