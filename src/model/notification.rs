use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification ids are numbers in the seed data but stored payloads may carry
/// strings, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationId {
    Number(i64),
    Text(String),
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationId::Number(n) => write!(f, "{}", n),
            NotificationId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NotificationId {
    fn from(value: i64) -> Self {
        NotificationId::Number(value)
    }
}

impl From<&str> for NotificationId {
    fn from(value: &str) -> Self {
        NotificationId::Text(value.to_string())
    }
}

/// Selects the icon shown next to a notification.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    #[default]
    Salary,
    Incentive,
    Leave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    /// older payloads were written before the category existed
    #[serde(rename = "iconType", default)]
    pub category: NotificationCategory,
}

impl Notification {
    pub fn unread(
        id: impl Into<NotificationId>,
        title: &str,
        message: &str,
        timestamp: DateTime<Utc>,
        category: NotificationCategory,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.to_string(),
            message: message.to_string(),
            timestamp,
            read: false,
            category,
        }
    }
}
