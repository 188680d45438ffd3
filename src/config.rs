//! Tunables shared by the web UI and the CLI.

use std::time::Duration;

use crate::locale::DEFAULT_LOCALE;
use crate::structured_url::StructuredUrl;

/// Settings key holding the chosen locale.
pub const LOCALE_SETTING_KEY: &str = "locale";

/// Time between a clipboard read settling and the paste button re-enabling.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    /// Locale used when the requested one has no bundle.
    pub default_locale: String,
    pub locale_key: String,
    pub fallback_url: StructuredUrl,
    pub settle_delay: Duration,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            locale_key: LOCALE_SETTING_KEY.to_string(),
            fallback_url: StructuredUrl::fallback(),
            settle_delay: SETTLE_DELAY,
        }
    }
}

impl PreviewConfig {
    pub fn with_default_locale(mut self, id: impl Into<String>) -> Self {
        self.default_locale = id.into();
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Replace the fallback URL; fails if `text` is not a URL.
    pub fn with_fallback_url(mut self, text: &str) -> Result<Self, url::ParseError> {
        self.fallback_url = StructuredUrl::parse(text)?;
        Ok(self)
    }
}
