//! LocalStorage helpers (WASM), no-ops on native

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Raw string stored under `key`
#[cfg(target_arch = "wasm32")]
pub fn load_string(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_string(_key: &str) -> Option<String> {
    None
}

/// Deserialize the JSON stored under `key`, logging unreadable entries
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = load_string(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", key, e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = local_storage() else {
        log::warn!("LocalStorage unavailable, {} not saved", key);
        return;
    };
    match serde_json::to_string(value) {
        Ok(json) => {
            if let Err(e) = storage.set_item(key, &json) {
                log::warn!("Failed to save {}: {:?}", key, e);
            }
        }
        Err(e) => log::warn!("Failed to serialize {}: {}", key, e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, _value: &T) {
    // No-op for native
}
