use crate::models::Settings;
use crate::vault::VaultDoc;
use serde::{Deserialize, Serialize};

pub(crate) const SETTINGS_KEY: &str = "repo_notes_settings";
pub(crate) const VAULT_KEY: &str = "repo_notes_vault";

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(key, &json);
        }
    }
}

/// Settings load: stored blob merged over defaults (serde defaults cover
/// keys added after the blob was written). Saved on every change.
pub(crate) fn load_settings() -> Settings {
    load_json_from_storage::<Settings>(SETTINGS_KEY).unwrap_or_default()
}

pub(crate) fn save_settings(settings: &Settings) {
    save_json_to_storage(SETTINGS_KEY, settings);
}

/// First run seeds the vault with the default repo template so the default
/// `template_path` resolves immediately.
pub(crate) fn load_vault() -> VaultDoc {
    load_json_from_storage::<VaultDoc>(VAULT_KEY).unwrap_or_else(VaultDoc::seeded)
}

pub(crate) fn save_vault(vault: &VaultDoc) {
    save_json_to_storage(VAULT_KEY, vault);
}

#[cfg(test)]
pub(crate) fn clear_storage() {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.remove_item(SETTINGS_KEY);
        let _ = storage.remove_item(VAULT_KEY);
    }
}
