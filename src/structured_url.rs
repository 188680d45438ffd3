//! Structured URL value shown by the preview.
//!
//! A `StructuredUrl` can only be built from a successful parse, so a value
//! of this type is never partial. It is replaced wholesale, never edited.

use std::fmt;

use serde::Serialize;
use url::Url;

/// Shown whenever pasted text cannot be turned into a URL.
pub const FALLBACK_URL: &str = "https://site.com:443/user?id=123#settings";

/// A parsed URL broken into the components the preview displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredUrl {
    url: Url,
}

/// One displayable component of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Scheme,
    Host,
    Port,
    Path,
    Query,
    Fragment,
}

impl Component {
    /// All components, in display order.
    pub const ALL: [Component; 6] = [
        Component::Scheme,
        Component::Host,
        Component::Port,
        Component::Path,
        Component::Query,
        Component::Fragment,
    ];

    /// Message id of the component's label.
    pub fn message_key(self) -> &'static str {
        match self {
            Component::Scheme => "urlPreview.scheme",
            Component::Host => "urlPreview.host",
            Component::Port => "urlPreview.port",
            Component::Path => "urlPreview.path",
            Component::Query => "urlPreview.query",
            Component::Fragment => "urlPreview.fragment",
        }
    }
}

/// Serializable snapshot of a URL's components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlParts {
    pub href: String,
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
    pub params: Vec<(String, String)>,
}

impl StructuredUrl {
    /// Parse a well-formed absolute URL.
    pub fn parse(text: &str) -> Result<Self, url::ParseError> {
        Url::parse(text).map(|url| Self { url })
    }

    /// The fixed URL shown at startup and after a failed paste.
    pub fn fallback() -> Self {
        Self::parse(FALLBACK_URL).expect("FALLBACK_URL is a well-formed URL")
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Host name or address; empty for URLs without a host (`mailto:`).
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    /// Explicit port, or the scheme's default port when it has one.
    pub fn port(&self) -> Option<u16> {
        self.url.port_or_known_default()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Query string without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    /// Fragment without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.url.fragment()
    }

    /// Serialized form of the whole URL.
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Decoded query parameters in the order they appear.
    pub fn query_params(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Display text for one component; empty when the URL lacks it.
    pub fn component(&self, component: Component) -> String {
        match component {
            Component::Scheme => self.scheme().to_string(),
            Component::Host => self.host().to_string(),
            Component::Port => self.port().map(|p| p.to_string()).unwrap_or_default(),
            Component::Path => self.path().to_string(),
            Component::Query => self.query().unwrap_or("").to_string(),
            Component::Fragment => self.fragment().unwrap_or("").to_string(),
        }
    }

    pub fn parts(&self) -> UrlParts {
        UrlParts {
            href: self.href().to_string(),
            scheme: self.scheme().to_string(),
            host: self.host().to_string(),
            port: self.port(),
            path: self.path().to_string(),
            query: self.query().map(str::to_string),
            fragment: self.fragment().map(str::to_string),
            params: self.query_params(),
        }
    }
}

impl Default for StructuredUrl {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for StructuredUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.href())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_components() {
        let url = StructuredUrl::fallback();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host(), "site.com");
        assert_eq!(url.port(), Some(443));
        assert_eq!(url.path(), "/user");
        assert_eq!(url.query(), Some("id=123"));
        assert_eq!(url.fragment(), Some("settings"));
    }

    #[test]
    fn test_default_is_fallback() {
        assert_eq!(StructuredUrl::default(), StructuredUrl::fallback());
    }

    #[test]
    fn test_explicit_port() {
        let url = StructuredUrl::parse("http://localhost:8080/").unwrap();
        assert_eq!(url.port(), Some(8080));
        assert_eq!(url.component(Component::Port), "8080");
    }

    #[test]
    fn test_missing_components_render_empty() {
        let url = StructuredUrl::parse("mailto:someone@example.com").unwrap();
        assert_eq!(url.scheme(), "mailto");
        assert_eq!(url.host(), "");
        assert_eq!(url.port(), None);
        assert_eq!(url.component(Component::Port), "");
        assert_eq!(url.component(Component::Query), "");
        assert_eq!(url.component(Component::Fragment), "");
    }

    #[test]
    fn test_query_params() {
        let url = StructuredUrl::parse("https://example.com/?a=1&b=two%20words&a=3").unwrap();
        assert_eq!(
            url.query_params(),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "two words".to_string()),
                ("a".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_parts_serialize() {
        let json = serde_json::to_value(StructuredUrl::fallback().parts()).unwrap();
        assert_eq!(json["host"], "site.com");
        assert_eq!(json["port"], 443);
        assert_eq!(json["query"], "id=123");
        assert_eq!(json["params"][0][0], "id");
    }

    #[test]
    fn test_rejects_relative() {
        assert_eq!(
            StructuredUrl::parse("not a url"),
            Err(url::ParseError::RelativeUrlWithoutBase)
        );
    }
}
