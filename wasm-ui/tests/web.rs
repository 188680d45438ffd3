//! Browser adapter tests. Run with `wasm-pack test --headless --firefox wasm-ui`.

#![cfg(target_arch = "wasm32")]

use std::time::Duration;

use url_peek::{Delay, LocaleCatalog, LocaleResolver, PreviewConfig, SettingsStore};
use wasm_bindgen_test::*;
use wasm_ui::browser::{GlooDelay, LocalStorageStore, preferred_languages};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_local_storage_round_trip() {
    let mut store = LocalStorageStore;
    store.set("url-peek-test", "fr-FR").unwrap();
    assert_eq!(store.get("url-peek-test").unwrap().as_deref(), Some("fr-FR"));
    store.remove("url-peek-test").unwrap();
    assert_eq!(store.get("url-peek-test").unwrap(), None);
}

#[wasm_bindgen_test]
fn test_unknown_stored_locale_is_cleared() {
    let mut store = LocalStorageStore;
    store.set("locale", "zz-ZZ").unwrap();

    let mut resolver =
        LocaleResolver::new(LocaleCatalog::builtin(), LocalStorageStore, &PreviewConfig::default());
    let resolved = resolver.startup(&[]);

    assert_eq!(resolved.id, "en-US");
    assert!(resolved.is_fallback());
    assert_eq!(resolved.requested, "zz-ZZ");
    assert_eq!(store.get("locale").unwrap(), None);
}

#[wasm_bindgen_test]
fn test_browser_reports_a_language() {
    assert!(!preferred_languages().is_empty());
}

#[wasm_bindgen_test]
async fn test_gloo_delay_completes() {
    GlooDelay.sleep(Duration::from_millis(10)).await;
}
