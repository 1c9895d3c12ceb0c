//! Return URL value handed to drivers.
//!
//! Absolute URLs are parsed with the `url` crate so drivers can inspect the
//! scheme, host and query. Scheme-less references (e.g. `my-url.com`) are
//! kept as opaque references: hosts deliver them as-is and a driver may still
//! want to claim them by text. The delivered text, minus surrounding
//! whitespace, is preserved and is what equality and `Display` use.

use std::fmt;
use std::str::FromStr;

use url::Url;

/// Error returned when a string cannot be used as a return URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReturnUrlError {
    #[error("return URL is empty")]
    Empty,
    #[error("invalid return URL {input:?}: {source}")]
    Invalid {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

/// A URL delivered back into the application after an external flow.
#[derive(Debug, Clone)]
pub struct ReturnUrl {
    raw: String,
    parsed: Option<Url>,
}

impl ReturnUrl {
    /// Parse a return URL.
    ///
    /// Absolute URLs must parse cleanly (`http://host:99999` is rejected);
    /// relative references without a base are accepted as opaque references.
    /// Leading and trailing spaces and C0 controls are stripped first, as the
    /// `url` parser does, so the stored text matches the parsed URL.
    /// Empty or whitespace-only input is rejected.
    pub fn parse(input: &str) -> Result<Self, ReturnUrlError> {
        let input = input.trim_matches(|c: char| c <= ' ');
        if input.is_empty() {
            return Err(ReturnUrlError::Empty);
        }
        match Url::parse(input) {
            Ok(parsed) => Ok(Self {
                raw: input.to_string(),
                parsed: Some(parsed),
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Self {
                raw: input.to_string(),
                parsed: None,
            }),
            Err(source) => Err(ReturnUrlError::Invalid {
                input: input.to_string(),
                source,
            }),
        }
    }

    /// The URL as it was delivered, without surrounding whitespace.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed form, if the URL is absolute.
    pub fn as_url(&self) -> Option<&Url> {
        self.parsed.as_ref()
    }

    pub fn is_absolute(&self) -> bool {
        self.parsed.is_some()
    }

    /// Lowercased scheme (`url` normalises it), or `None` for opaque references.
    pub fn scheme(&self) -> Option<&str> {
        self.parsed.as_ref().map(Url::scheme)
    }

    /// Host, if present and non-empty.
    pub fn host(&self) -> Option<&str> {
        self.parsed
            .as_ref()
            .and_then(Url::host_str)
            .filter(|h| !h.is_empty())
    }

    /// Path component; opaque references return their whole text.
    pub fn path(&self) -> &str {
        match &self.parsed {
            Some(u) => u.path(),
            None => &self.raw,
        }
    }

    /// First value of the query parameter `key`, percent-decoded.
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.parsed.as_ref().and_then(|u| {
            u.query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
        })
    }
}

impl PartialEq for ReturnUrl {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ReturnUrl {}

impl fmt::Display for ReturnUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ReturnUrl {
    type Err = ReturnUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Url> for ReturnUrl {
    fn from(parsed: Url) -> Self {
        Self {
            raw: parsed.as_str().to_string(),
            parsed: Some(parsed),
        }
    }
}
