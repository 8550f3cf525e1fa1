use storage::{PreferenceStore, Result, StorageError};
use tracing::warn;
use web_sys::{Storage, Window};

/// `localStorage`, when the browser grants it. Without it every read is a
/// miss and every write fails, so the theme lives only in memory.
pub struct LocalStoragePreferences {
    storage: Option<Storage>,
}

impl LocalStoragePreferences {
    pub fn from_window(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(error) => {
                warn!(?error, "localStorage unavailable");
                None
            }
        };
        Self { storage }
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        storage
            .get_item(key)
            .map_err(|error| StorageError::Unavailable(format!("{error:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Err(StorageError::Unavailable("no localStorage".into()));
        };
        storage
            .set_item(key, value)
            .map_err(|error| StorageError::Unavailable(format!("{error:?}")))
    }
}
