//! Error types for URL acquisition, locale resolution, and settings storage.

use thiserror::Error;

/// A `decodeURI`-style decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// `%` not followed by two hex digits.
    #[error("malformed escape sequence at byte {offset}")]
    MalformedEscape { offset: usize },

    /// Escapes that do not form a valid UTF-8 sequence.
    #[error("invalid UTF-8 escape sequence at byte {offset}")]
    InvalidUtf8 { offset: usize },
}

/// Failure of the decode-then-parse pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("cannot decode text: {0}")]
    Decode(#[from] DecodeError),

    #[error("not a well-formed URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Failure reading text from a clipboard source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is not available")]
    Unavailable,

    #[error("clipboard read was rejected: {0}")]
    Denied(String),

    #[error("clipboard does not contain text")]
    NotText,

    #[error("clipboard I/O error: {0}")]
    Io(String),
}

/// Why a paste ended with the fallback URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasteError {
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Failure of a persisted key/value setting.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("settings storage is not available")]
    Unavailable,

    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is malformed: {0}")]
    Format(#[from] serde_json::Error),

    #[error("settings backend error: {0}")]
    Backend(String),
}

/// Failure loading a locale bundle.
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("no message bundle for locale '{0}'")]
    Unknown(String),

    #[error("message bundle for locale '{id}' is corrupt: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}
