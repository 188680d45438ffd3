//! # url-peek
//!
//! Paste a URL from the clipboard and see what it is made of.
//!
//! The crate holds everything behind the web page that is not a browser
//! binding: the paste controller, `decodeURI`-style decoding, the
//! structured URL value, locale bundles, and the persisted locale setting.
//!
//! ## Overview
//!
//! - **Paste flow**: read clipboard text, decode, parse, and fall back to a
//!   fixed URL when anything goes wrong
//! - **One paste at a time**: triggers while a paste is in flight are ignored
//! - **Locales**: message bundles with a default that always resolves
//!
//! ## Example
//!
//! ```
//! use url_peek::{PasteController, PasteOutcome};
//!
//! let mut controller = PasteController::default();
//! let ticket = controller.begin().unwrap();
//! let settled = controller.settle(ticket, Ok("https://example.com/a?x=1".to_string()));
//! controller.release(settled.release);
//!
//! assert_eq!(settled.outcome, PasteOutcome::Accepted);
//! assert_eq!(controller.url().host(), "example.com");
//! assert_eq!(controller.url().query(), Some("x=1"));
//! ```

pub mod clipboard;
pub mod config;
pub mod decode;
pub mod error;
pub mod locale;
pub mod paste;
pub mod settings;
pub mod structured_url;

pub use clipboard::{ClipboardSource, Delay, StaticClipboard};
pub use config::{LOCALE_SETTING_KEY, PreviewConfig, SETTLE_DELAY};
pub use decode::decode_uri;
pub use error::{ClipboardError, DecodeError, LocaleError, ParseError, PasteError, StorageError};
pub use locale::{DEFAULT_LOCALE, LocaleCatalog, LocaleResolver, MessageBundle, ResolvedLocale};
pub use paste::{
    Affordance, PasteController, PasteOutcome, PasteTicket, PasteView, PendingRelease, Settled,
    decode_and_parse, run_paste,
};
pub use settings::{FileStore, MemoryStore, SettingsStore};
pub use structured_url::{Component, FALLBACK_URL, StructuredUrl, UrlParts};
