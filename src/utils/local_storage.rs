use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Keys shared by everything that writes to client storage.
pub mod keys {
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";
    pub const DISPLAY_NAME: &str = "displayName";
    pub const NOTIFICATIONS: &str = "notifications";
}

/// String key/value storage local to one client, the same contract as a
/// browser's `localStorage`.
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<S: LocalStorage + ?Sized> LocalStorage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

impl<S: LocalStorage + ?Sized> LocalStorage for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// One file per key under a directory.
///
/// ```text
/// .portal/
/// ├── isAuthenticated
/// ├── displayName
/// └── notifications
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    pub fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)
                .with_context(|| format!("Failed to create storage directory {:?}", base_dir))?;
            log::info!("Created storage directory: {:?}", base_dir);
        }
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(anyhow!("Invalid storage key: {:?}", key));
        }
        Ok(self.base_dir.join(key))
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", path)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;

        // write to a temp file, then rename over the old value
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e).with_context(|| format!("Failed to replace {:?}", path));
        }

        log::debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("Removed {}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {:?}", path)),
        }
    }
}

/// In-memory storage, used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .items
            .read()
            .map_err(|_| anyhow!("memory storage poisoned"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .write()
            .map_err(|_| anyhow!("memory storage poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items
            .write()
            .map_err(|_| anyhow!("memory storage poisoned"))?
            .remove(key);
        Ok(())
    }
}
