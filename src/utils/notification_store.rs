use anyhow::{anyhow, Context, Result};
use derive_more::Display;
use serde_json::Value;
use std::sync::RwLock;

use crate::model::notification::Notification;
use crate::utils::local_storage::{keys, LocalStorage};

/// Why a stored collection could not be loaded.
#[derive(Debug, Display)]
pub enum LoadError {
    /// The storage itself could not be read. The stored value may be fine.
    #[display(fmt = "Notification storage unavailable: {:#}", _0)]
    Unavailable(anyhow::Error),
    /// The stored value was read but cannot be used.
    #[display(fmt = "Stored notifications are malformed: {:#}", _0)]
    Malformed(anyhow::Error),
}

impl std::error::Error for LoadError {}

/// Persistence port for the notification collection.
pub trait NotificationStore {
    /// `Ok(None)` when nothing was stored yet.
    fn load(&self) -> Result<Option<Vec<Notification>>, LoadError>;

    fn save(&self, notifications: &[Notification]) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Keeps the collection as a JSON array under [`keys::NOTIFICATIONS`].
#[derive(Debug, Clone)]
pub struct LocalNotificationStore<S> {
    storage: S,
}

impl<S: LocalStorage> LocalNotificationStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

/// Payloads written by the first release stored a rendered icon object per
/// record. They carry no category and cannot be upgraded.
fn is_legacy_payload(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get("icon"))
        .map(Value::is_object)
        .unwrap_or(false)
}

fn parse_payload(raw: &str) -> Result<Vec<Notification>> {
    let value: Value =
        serde_json::from_str(raw).context("Stored notifications are not valid JSON")?;
    if is_legacy_payload(&value) {
        return Err(anyhow!("Stored notifications use the legacy icon format"));
    }

    serde_json::from_value(value)
        .context("Stored notifications do not match the notification schema")
}

impl<S: LocalStorage> NotificationStore for LocalNotificationStore<S> {
    fn load(&self) -> Result<Option<Vec<Notification>>, LoadError> {
        let raw = match self.storage.get_item(keys::NOTIFICATIONS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(e) => return Err(LoadError::Unavailable(e)),
        };
        parse_payload(&raw).map(Some).map_err(LoadError::Malformed)
    }

    fn save(&self, notifications: &[Notification]) -> Result<()> {
        let raw = serde_json::to_string(notifications).context("Failed to encode notifications")?;
        self.storage.set_item(keys::NOTIFICATIONS, &raw)
    }

    fn clear(&self) -> Result<()> {
        self.storage.remove_item(keys::NOTIFICATIONS)
    }
}

/// Store that keeps typed values in memory and counts writes.
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    stored: RwLock<Option<Vec<Notification>>>,
    saves: RwLock<usize>,
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(notifications: Vec<Notification>) -> Self {
        Self {
            stored: RwLock::new(Some(notifications)),
            saves: RwLock::new(0),
        }
    }

    /// number of successful `save` calls
    pub fn saves(&self) -> usize {
        self.saves.read().map(|n| *n).unwrap_or(0)
    }

    pub fn snapshot(&self) -> Option<Vec<Notification>> {
        self.stored.read().ok().and_then(|s| s.clone())
    }
}

impl NotificationStore for MemoryNotificationStore {
    fn load(&self) -> Result<Option<Vec<Notification>>, LoadError> {
        let stored = self
            .stored
            .read()
            .map_err(|_| LoadError::Unavailable(anyhow!("notification store poisoned")))?;
        Ok(stored.clone())
    }

    fn save(&self, notifications: &[Notification]) -> Result<()> {
        *self
            .stored
            .write()
            .map_err(|_| anyhow!("notification store poisoned"))? = Some(notifications.to_vec());
        *self
            .saves
            .write()
            .map_err(|_| anyhow!("notification store poisoned"))? += 1;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self
            .stored
            .write()
            .map_err(|_| anyhow!("notification store poisoned"))? = None;
        Ok(())
    }
}
