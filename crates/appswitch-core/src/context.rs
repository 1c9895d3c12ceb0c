//! Open-URL context: the URL plus the options the host delivered it with.
//!
//! Compiled only with the `url-context` feature. Hosts without a context
//! abstraction pass the bare URL to `AppContextSwitcher::handle_open`.

use serde::{Deserialize, Serialize};

use crate::return_url::ReturnUrl;

/// Options accompanying an opened URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenUrlOptions {
    /// Bundle / package identifier of the app that opened the URL, if known.
    #[serde(default)]
    pub source_application: Option<String>,
    /// Whether the host may open the resource in place instead of copying it.
    #[serde(default)]
    pub open_in_place: bool,
}

/// Something that carries a URL delivered to the application.
pub trait OpenUrlContext {
    fn url(&self) -> &ReturnUrl;

    fn options(&self) -> &OpenUrlOptions;
}

/// Plain context value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlContext {
    url: ReturnUrl,
    options: OpenUrlOptions,
}

impl UrlContext {
    pub fn new(url: ReturnUrl) -> Self {
        Self {
            url,
            options: OpenUrlOptions::default(),
        }
    }

    pub fn with_options(url: ReturnUrl, options: OpenUrlOptions) -> Self {
        Self { url, options }
    }

    pub fn with_source_application(mut self, source: impl Into<String>) -> Self {
        self.options.source_application = Some(source.into());
        self
    }
}

impl OpenUrlContext for UrlContext {
    fn url(&self) -> &ReturnUrl {
        &self.url
    }

    fn options(&self) -> &OpenUrlOptions {
        &self.options
    }
}

impl<C: OpenUrlContext + ?Sized> OpenUrlContext for &C {
    fn url(&self) -> &ReturnUrl {
        (**self).url()
    }

    fn options(&self) -> &OpenUrlOptions {
        (**self).options()
    }
}
