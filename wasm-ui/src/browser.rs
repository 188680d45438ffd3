//! Browser adapters for the url-peek seams.

use std::time::Duration;

use gloo::timers::future::TimeoutFuture;
use js_sys::{Function, Promise, Reflect};
use url_peek::{ClipboardError, ClipboardSource, Delay, SettingsStore, StorageError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// `navigator.clipboard.readText()`.
///
/// Looked up reflectively: the async clipboard API is missing on insecure
/// origins and in some browsers.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebClipboard;

impl ClipboardSource for WebClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
        let navigator = window.navigator();

        let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map_err(|_| ClipboardError::Unavailable)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(ClipboardError::Unavailable);
        }

        let read_text: Function = Reflect::get(&clipboard, &JsValue::from_str("readText"))
            .ok()
            .and_then(|f| f.dyn_into().ok())
            .ok_or(ClipboardError::Unavailable)?;
        let promise: Promise = read_text
            .call0(&clipboard)
            .map_err(denied)?
            .dyn_into()
            .map_err(|_| ClipboardError::Unavailable)?;

        let value = JsFuture::from(promise).await.map_err(denied)?;
        value.as_string().ok_or(ClipboardError::NotText)
    }
}

fn denied(err: JsValue) -> ClipboardError {
    ClipboardError::Denied(describe(&err))
}

fn describe(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

/// Timer backed by `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooDelay;

impl Delay for GlooDelay {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

/// Settings in `window.localStorage`, stored as plain strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or(StorageError::Unavailable)?
        .local_storage()
        .map_err(|_| StorageError::Unavailable)?
        .ok_or(StorageError::Unavailable)
}

fn backend(err: JsValue) -> StorageError {
    StorageError::Backend(describe(&err))
}

impl SettingsStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?.get_item(key).map_err(backend)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?.set_item(key, value).map_err(backend)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        local_storage()?.remove_item(key).map_err(backend)
    }
}

/// The user agent's preferred languages, most preferred first.
pub fn preferred_languages() -> Vec<String> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    let navigator = window.navigator();
    let mut languages: Vec<String> = navigator
        .languages()
        .iter()
        .filter_map(|v| v.as_string())
        .collect();
    if let Some(language) = navigator.language() {
        languages.push(language);
    }
    languages
}

/// Whether the page is served at the site root.
pub fn is_root_path() -> bool {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .is_none_or(|path| path == "/")
}
