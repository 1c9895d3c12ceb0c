//! Drivers: participants that may claim return URLs.
//!
//! A driver is a capability pair: `can_handle_return_url` answers whether the
//! driver owns a URL, `handle_return_url` consumes it. The switcher only ever
//! calls `handle_return_url` on the first driver that claimed the URL.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::config::DriverConfig;
use crate::return_url::ReturnUrl;

/// Capability set implemented by anything that can own return URLs.
pub trait ReturnUrlDriver: Send + Sync {
    /// Whether this driver owns `url`. Must be cheap and side-effect free
    /// apart from bookkeeping.
    fn can_handle_return_url(&self, url: &ReturnUrl) -> bool;

    /// Consume a URL previously claimed by `can_handle_return_url`.
    fn handle_return_url(&self, url: &ReturnUrl);

    /// Identity used for duplicate detection and diagnostics.
    /// Defaults to the implementing type, so two instances of one driver type
    /// count as the same registration.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

type CanHandleFn = dyn Fn(&ReturnUrl) -> bool + Send + Sync;
type HandleFn = dyn Fn(&ReturnUrl) + Send + Sync;

/// Driver assembled from two closures.
pub struct FnDriver {
    name: String,
    can_handle: Box<CanHandleFn>,
    handle: Box<HandleFn>,
}

impl FnDriver {
    pub fn new<C, H>(name: impl Into<String>, can_handle: C, handle: H) -> Self
    where
        C: Fn(&ReturnUrl) -> bool + Send + Sync + 'static,
        H: Fn(&ReturnUrl) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            can_handle: Box::new(can_handle),
            handle: Box::new(handle),
        }
    }
}

impl ReturnUrlDriver for FnDriver {
    fn can_handle_return_url(&self, url: &ReturnUrl) -> bool {
        (self.can_handle)(url)
    }

    fn handle_return_url(&self, url: &ReturnUrl) {
        (self.handle)(url)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for FnDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnDriver").field("name", &self.name).finish()
    }
}

/// Claims URLs by scheme (case-insensitive) and, optionally, host.
///
/// Handling only records the URL and logs it; hosts wire real work through
/// their own drivers. Used for `[[drivers]]` entries in config.
#[derive(Debug)]
pub struct SchemeDriver {
    name: String,
    scheme: String,
    host: Option<String>,
    handled: AtomicUsize,
    last_handled: Mutex<Option<ReturnUrl>>,
}

impl SchemeDriver {
    pub fn new(name: impl Into<String>, scheme: &str, host: Option<&str>) -> Self {
        Self {
            name: name.into(),
            scheme: scheme.to_ascii_lowercase(),
            host: host.map(str::to_string),
            handled: AtomicUsize::new(0),
            last_handled: Mutex::new(None),
        }
    }

    pub fn from_config(cfg: &DriverConfig) -> Self {
        Self::new(cfg.name.clone(), &cfg.scheme, cfg.host.as_deref())
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Number of URLs this driver has handled.
    pub fn handled_count(&self) -> usize {
        self.handled.load(Ordering::Relaxed)
    }

    pub fn last_handled(&self) -> Option<ReturnUrl> {
        self.last_handled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ReturnUrlDriver for SchemeDriver {
    fn can_handle_return_url(&self, url: &ReturnUrl) -> bool {
        let Some(scheme) = url.scheme() else {
            return false;
        };
        if scheme != self.scheme {
            return false;
        }
        match &self.host {
            Some(expected) => url
                .host()
                .is_some_and(|h| h.eq_ignore_ascii_case(expected)),
            None => true,
        }
    }

    fn handle_return_url(&self, url: &ReturnUrl) {
        self.handled.fetch_add(1, Ordering::Relaxed);
        *self
            .last_handled
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(url.clone());
        tracing::info!(driver = %self.name, url = %url, "return URL handled");
    }

    fn name(&self) -> &str {
        &self.name
    }
}
