//! Return URL dispatch: route URLs delivered back into an application to the
//! driver that started the external flow.

pub mod config;
pub mod driver;
pub mod logging;
pub mod return_url;
pub mod switcher;

#[cfg(feature = "url-context")]
pub mod context;

pub use config::{DriverConfig, DuplicatePolicy, SwitcherConfig};
#[cfg(feature = "url-context")]
pub use context::{OpenUrlContext, OpenUrlOptions, UrlContext};
pub use driver::{FnDriver, ReturnUrlDriver, SchemeDriver};
pub use return_url::{ReturnUrl, ReturnUrlError};
pub use switcher::AppContextSwitcher;
