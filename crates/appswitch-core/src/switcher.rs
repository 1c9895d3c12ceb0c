//! Return URL dispatch registry.
//!
//! `AppContextSwitcher` owns an ordered list of drivers. An incoming URL is
//! offered to each driver in registration order; the first one that claims
//! it handles it and dispatch stops there. An unclaimed URL is a normal
//! outcome reported as `false`, never an error.
//!
//! The switcher is created explicitly by whatever coordinates URL delivery
//! (app lifecycle code, the CLI) and shared by reference or `Arc`.

use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{DuplicatePolicy, SwitcherConfig};
#[cfg(feature = "url-context")]
use crate::context::OpenUrlContext;
use crate::driver::{ReturnUrlDriver, SchemeDriver};
use crate::return_url::ReturnUrl;

#[derive(Default)]
pub struct AppContextSwitcher {
    drivers: RwLock<Vec<Arc<dyn ReturnUrlDriver>>>,
    return_url_scheme: RwLock<Option<String>>,
    duplicate_policy: DuplicatePolicy,
}

impl AppContextSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_policy(duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            duplicate_policy,
            ..Self::default()
        }
    }

    /// Build a switcher from config: duplicate policy, return URL scheme and
    /// one `SchemeDriver` per `[[drivers]]` entry, in file order.
    pub fn from_config(cfg: &SwitcherConfig) -> Self {
        let switcher = Self::with_duplicate_policy(cfg.duplicate_policy);
        switcher.set_return_url_scheme(cfg.return_url_scheme.clone());
        for driver in &cfg.drivers {
            switcher.register(Arc::new(SchemeDriver::from_config(driver)));
        }
        switcher
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Register a driver. Never fails; duplicates (same `name()`) are treated
    /// according to the switcher's `DuplicatePolicy`.
    pub fn register(&self, driver: Arc<dyn ReturnUrlDriver>) {
        let mut drivers = self
            .drivers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let existing = drivers.iter().position(|d| d.name() == driver.name());

        match (existing, self.duplicate_policy) {
            (Some(idx), DuplicatePolicy::Ignore) => {
                tracing::debug!(driver = driver.name(), position = idx, "duplicate driver ignored");
            }
            (Some(idx), DuplicatePolicy::Replace) => {
                tracing::debug!(driver = driver.name(), position = idx, "driver replaced");
                drivers[idx] = driver;
            }
            _ => {
                tracing::debug!(
                    driver = driver.name(),
                    position = drivers.len(),
                    "driver registered"
                );
                drivers.push(driver);
            }
        }
    }

    /// Offer `url` to drivers in registration order; returns the name of the
    /// driver that claimed and handled it, or `None` if nobody claimed it.
    ///
    /// Drivers are consulted on a snapshot of the registry taken under the
    /// read lock, so a driver may register further drivers while handling.
    pub fn dispatch(&self, url: &ReturnUrl) -> Option<String> {
        let drivers: Vec<Arc<dyn ReturnUrlDriver>> = self
            .drivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let Some(driver) = drivers.iter().find(|d| d.can_handle_return_url(url)) else {
            tracing::debug!(url = %url, candidates = drivers.len(), "return URL not claimed");
            return None;
        };

        tracing::debug!(url = %url, driver = driver.name(), "return URL claimed");
        driver.handle_return_url(url);
        Some(driver.name().to_string())
    }

    /// Whether some registered driver claimed and handled `url`.
    pub fn handle_open(&self, url: &ReturnUrl) -> bool {
        self.dispatch(url).is_some()
    }

    /// Extract the URL from an open-URL context and dispatch it exactly as
    /// [`handle_open`](Self::handle_open) would.
    #[cfg(feature = "url-context")]
    pub fn handle_open_url_context<C: OpenUrlContext + ?Sized>(&self, context: &C) -> bool {
        self.dispatch_context(context).is_some()
    }

    /// Context form of [`dispatch`](Self::dispatch).
    #[cfg(feature = "url-context")]
    pub fn dispatch_context<C: OpenUrlContext + ?Sized>(&self, context: &C) -> Option<String> {
        if let Some(source) = context.options().source_application.as_deref() {
            tracing::debug!(source_application = source, "open URL context received");
        }
        self.dispatch(context.url())
    }

    pub fn return_url_scheme(&self) -> Option<String> {
        self.return_url_scheme
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store the scheme the host registered for return URLs. Kept as given.
    pub fn set_return_url_scheme(&self, scheme: Option<String>) {
        *self
            .return_url_scheme
            .write()
            .unwrap_or_else(PoisonError::into_inner) = scheme;
    }

    pub fn len(&self) -> usize {
        self.drivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Driver names in registration (dispatch) order.
    pub fn driver_names(&self) -> Vec<String> {
        self.drivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|d| d.name().to_string())
            .collect()
    }
}

impl std::fmt::Debug for AppContextSwitcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContextSwitcher")
            .field("drivers", &self.driver_names())
            .field("return_url_scheme", &self.return_url_scheme())
            .field("duplicate_policy", &self.duplicate_policy)
            .finish()
    }
}
