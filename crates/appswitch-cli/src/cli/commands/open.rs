//! `appswitch open <url>` – dispatch a return URL.

use anyhow::{Context, Result};
use appswitch_core::{AppContextSwitcher, ReturnUrl};
use serde::Serialize;

/// Outcome printed with `--json`.
#[derive(Debug, Serialize)]
pub struct OpenReport {
    pub url: String,
    pub handled: bool,
    pub driver: Option<String>,
    pub source_application: Option<String>,
}

/// Dispatch `url` and print the outcome. Returns whether a driver claimed it.
pub fn run_open(
    switcher: &AppContextSwitcher,
    url: &str,
    source_app: Option<String>,
    json: bool,
) -> Result<bool> {
    let return_url = ReturnUrl::parse(url).with_context(|| format!("cannot open {url:?}"))?;
    let report = dispatch(switcher, return_url, source_app);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &report.driver {
            Some(driver) => println!("handled by {driver}: {}", report.url),
            None => println!("not handled: {}", report.url),
        }
    }
    Ok(report.handled)
}

#[cfg(feature = "url-context")]
fn dispatch(
    switcher: &AppContextSwitcher,
    url: ReturnUrl,
    source_app: Option<String>,
) -> OpenReport {
    use appswitch_core::{OpenUrlContext, UrlContext};

    let mut context = UrlContext::new(url);
    if let Some(source) = &source_app {
        context = context.with_source_application(source.clone());
    }
    let driver = switcher.dispatch_context(&context);
    OpenReport {
        url: context.url().to_string(),
        handled: driver.is_some(),
        driver,
        source_application: source_app,
    }
}

#[cfg(not(feature = "url-context"))]
fn dispatch(
    switcher: &AppContextSwitcher,
    url: ReturnUrl,
    source_app: Option<String>,
) -> OpenReport {
    if source_app.is_some() {
        tracing::warn!("--source-app ignored: built without url-context support");
    }
    let driver = switcher.dispatch(&url);
    OpenReport {
        url: url.to_string(),
        handled: driver.is_some(),
        driver,
        source_application: None,
    }
}
