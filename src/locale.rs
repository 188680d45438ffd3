//! Locale bundles and locale resolution.
//!
//! Resolution rules:
//! - startup locale: persisted setting, else the first preferred language,
//!   else the catalog default
//! - a locale without a usable bundle resolves to the default bundle and
//!   the persisted setting is cleared
//! - the default bundle is parsed when the catalog is built, so resolving
//!   it cannot fail

use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::PreviewConfig;
use crate::error::LocaleError;
use crate::settings::SettingsStore;

/// Locale used when nothing else has a bundle.
pub const DEFAULT_LOCALE: &str = "en-US";

const BUILTIN_BUNDLES: &[(&str, &str)] = &[
    ("en-US", include_str!("../locales/en-US.json")),
    ("fr-FR", include_str!("../locales/fr-FR.json")),
    ("es-ES", include_str!("../locales/es-ES.json")),
    ("de-DE", include_str!("../locales/de-DE.json")),
];

/// Message id to localized text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBundle {
    messages: BTreeMap<String, String>,
}

impl MessageBundle {
    pub fn from_json(id: &str, source: &str) -> Result<Self, LocaleError> {
        let messages = serde_json::from_str(source).map_err(|source| LocaleError::Corrupt {
            id: id.to_string(),
            source,
        })?;
        Ok(Self { messages })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Localized text for `key`, or the key itself when missing.
    pub fn message<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// The set of locales the application can show.
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    default_id: String,
    default_bundle: Rc<MessageBundle>,
    sources: BTreeMap<String, String>,
}

impl LocaleCatalog {
    /// Build a catalog from `(id, json)` pairs. Fails if the default bundle
    /// is missing or malformed.
    pub fn new<I, K, V>(default_id: &str, sources: I) -> Result<Self, LocaleError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let sources: BTreeMap<String, String> = sources
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let default_source = sources
            .get(default_id)
            .ok_or_else(|| LocaleError::Unknown(default_id.to_string()))?;
        let default_bundle = Rc::new(MessageBundle::from_json(default_id, default_source)?);

        Ok(Self {
            default_id: default_id.to_string(),
            default_bundle,
            sources,
        })
    }

    /// Catalog of the bundles shipped with the crate.
    pub fn builtin() -> Self {
        Self::from_config(&PreviewConfig::default())
            .expect("built-in default bundle is valid JSON")
    }

    /// Built-in bundles with `config.default_locale` as the default. Fails
    /// if that locale is not shipped.
    pub fn from_config(config: &PreviewConfig) -> Result<Self, LocaleError> {
        Self::new(&config.default_locale, BUILTIN_BUNDLES.iter().copied())
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    pub fn default_bundle(&self) -> Rc<MessageBundle> {
        Rc::clone(&self.default_bundle)
    }

    /// Locale ids in the catalog, sorted.
    pub fn available(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn load(&self, id: &str) -> Result<Rc<MessageBundle>, LocaleError> {
        if id == self.default_id {
            return Ok(self.default_bundle());
        }
        let source = self
            .sources
            .get(id)
            .ok_or_else(|| LocaleError::Unknown(id.to_string()))?;
        Ok(Rc::new(MessageBundle::from_json(id, source)?))
    }
}

/// A locale id together with the bundle it resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocale {
    pub id: String,
    pub bundle: Rc<MessageBundle>,
    /// The id that was asked for; differs from `id` after a fallback.
    pub requested: String,
}

impl ResolvedLocale {
    pub fn message<'a>(&'a self, key: &'a str) -> &'a str {
        self.bundle.message(key)
    }

    pub fn is_fallback(&self) -> bool {
        self.id != self.requested
    }
}

/// Picks locales and keeps the persisted preference in sync.
#[derive(Debug)]
pub struct LocaleResolver<S> {
    catalog: LocaleCatalog,
    store: S,
    key: String,
}

impl<S: SettingsStore> LocaleResolver<S> {
    pub fn new(catalog: LocaleCatalog, store: S, config: &PreviewConfig) -> Self {
        Self {
            catalog,
            store,
            key: config.locale_key.clone(),
        }
    }

    pub fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persisted locale id. Storage errors read as "nothing stored".
    pub fn stored(&self) -> Option<String> {
        match self.store.get(&self.key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(error = %e, "cannot read locale setting");
                None
            }
        }
    }

    /// Locale to start with, given the user agent's preferred languages.
    pub fn initial(&self, preferred: &[String]) -> String {
        self.stored()
            .or_else(|| preferred.iter().find(|l| !l.is_empty()).cloned())
            .unwrap_or_else(|| self.catalog.default_id().to_string())
    }

    /// Resolve the startup locale.
    pub fn startup(&mut self, preferred: &[String]) -> ResolvedLocale {
        let id = self.initial(preferred);
        self.resolve(&id)
    }

    /// Load the bundle for `requested`, falling back to the default bundle
    /// and clearing the persisted setting when it cannot be loaded.
    pub fn resolve(&mut self, requested: &str) -> ResolvedLocale {
        match self.catalog.load(requested) {
            Ok(bundle) => {
                debug!(locale = requested, "locale resolved");
                ResolvedLocale {
                    id: requested.to_string(),
                    bundle,
                    requested: requested.to_string(),
                }
            }
            Err(e) => {
                warn!(error = %e, fallback = self.catalog.default_id(), "falling back to default locale");
                if let Err(e) = self.store.remove(&self.key) {
                    warn!(error = %e, "cannot clear locale setting");
                }
                ResolvedLocale {
                    id: self.catalog.default_id().to_string(),
                    bundle: self.catalog.default_bundle(),
                    requested: requested.to_string(),
                }
            }
        }
    }

    /// Persist `id` as the preferred locale and resolve it.
    pub fn select(&mut self, id: &str) -> ResolvedLocale {
        if let Err(e) = self.store.set(&self.key, id) {
            warn!(error = %e, locale = id, "cannot persist locale setting");
        }
        self.resolve(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;

    fn resolver(store: MemoryStore) -> LocaleResolver<MemoryStore> {
        LocaleResolver::new(LocaleCatalog::builtin(), store, &PreviewConfig::default())
    }

    fn broken_catalog() -> LocaleCatalog {
        LocaleCatalog::new(
            "en-US",
            [
                ("en-US", r#"{"greeting": "Hello"}"#),
                ("xx-XX", "{ this is not json"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_builtin_bundles_parse() {
        let catalog = LocaleCatalog::builtin();
        let ids: Vec<&str> = catalog.available().collect();
        assert_eq!(ids, vec!["de-DE", "en-US", "es-ES", "fr-FR"]);
        let english = catalog.load("en-US").unwrap();
        for id in ids {
            let bundle = catalog.load(id).unwrap();
            assert_eq!(bundle.len(), english.len(), "{id} is missing messages");
        }
    }

    #[test]
    fn test_message_falls_back_to_key() {
        let bundle = LocaleCatalog::builtin().default_bundle();
        assert_eq!(bundle.message("urlPreview.host"), "Host");
        assert_eq!(bundle.message("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_catalog_requires_default() {
        let err = LocaleCatalog::new("en-US", [("fr-FR", "{}")]).unwrap_err();
        assert!(matches!(err, LocaleError::Unknown(id) if id == "en-US"));

        let err = LocaleCatalog::new("en-US", [("en-US", "[1, 2]")]).unwrap_err();
        assert!(matches!(err, LocaleError::Corrupt { .. }));
    }

    #[test]
    fn test_initial_prefers_stored() {
        let r = resolver(MemoryStore::new().with_value("locale", "fr-FR"));
        assert_eq!(r.initial(&["de-DE".to_string()]), "fr-FR");
    }

    #[test]
    fn test_initial_uses_preferred_then_default() {
        let r = resolver(MemoryStore::new());
        assert_eq!(r.initial(&["es-ES".to_string(), "fr-FR".to_string()]), "es-ES");
        assert_eq!(r.initial(&[]), "en-US");
    }

    #[test]
    fn test_resolve_known_locale() {
        let mut r = resolver(MemoryStore::new().with_value("locale", "de-DE"));
        let resolved = r.resolve("de-DE");
        assert_eq!(resolved.id, "de-DE");
        assert!(!resolved.is_fallback());
        assert_eq!(resolved.message("urlPreview.path"), "Pfad");
        assert_eq!(r.stored().as_deref(), Some("de-DE"));
    }

    #[test]
    fn test_unknown_locale_falls_back_and_clears() {
        let mut r = resolver(MemoryStore::new().with_value("locale", "tlh-KL"));
        let resolved = r.startup(&[]);
        assert_eq!(resolved.id, "en-US");
        assert!(resolved.is_fallback());
        assert_eq!(resolved.requested, "tlh-KL");
        assert_eq!(resolved.message("urlPreview.host"), "Host");
        assert_eq!(r.stored(), None);
    }

    #[test]
    fn test_configured_default_locale() {
        let config = PreviewConfig::default().with_default_locale("fr-FR");
        let catalog = LocaleCatalog::from_config(&config).unwrap();
        assert_eq!(catalog.default_id(), "fr-FR");

        let store = MemoryStore::new().with_value("locale", "tlh-KL");
        let mut r = LocaleResolver::new(catalog, store, &config);
        let resolved = r.startup(&[]);
        assert_eq!(resolved.id, "fr-FR");
        assert_eq!(resolved.message("urlPreview.host"), "Hôte");
        assert_eq!(r.initial(&[]), "fr-FR");
        assert_eq!(r.stored(), None);
    }

    #[test]
    fn test_configured_default_must_be_shipped() {
        let config = PreviewConfig::default().with_default_locale("tlh-KL");
        let err = LocaleCatalog::from_config(&config).unwrap_err();
        assert!(matches!(err, LocaleError::Unknown(id) if id == "tlh-KL"));
    }

    #[test]
    fn test_corrupt_bundle_falls_back_and_clears() {
        let store = MemoryStore::new().with_value("locale", "xx-XX");
        let mut r = LocaleResolver::new(broken_catalog(), store, &PreviewConfig::default());
        let resolved = r.startup(&[]);
        assert_eq!(resolved.id, "en-US");
        assert_eq!(resolved.message("greeting"), "Hello");
        assert_eq!(r.store().get("locale").unwrap(), None);
    }

    #[test]
    fn test_default_always_resolves() {
        let mut r = resolver(MemoryStore::new());
        let resolved = r.resolve("en-US");
        assert_eq!(resolved.id, "en-US");
        assert!(!resolved.bundle.is_empty());
    }

    #[test]
    fn test_select_persists() {
        let mut r = resolver(MemoryStore::new());
        let resolved = r.select("es-ES");
        assert_eq!(resolved.id, "es-ES");
        assert_eq!(r.stored().as_deref(), Some("es-ES"));

        let resolved = r.select("nope");
        assert_eq!(resolved.id, "en-US");
        assert_eq!(r.stored(), None);
    }
}
