//! `appswitch drivers` – list registered drivers in dispatch order.

use appswitch_core::{AppContextSwitcher, DriverConfig, DuplicatePolicy, SwitcherConfig};

/// One registered driver joined back to the config entry it was built from.
#[derive(Debug, PartialEq, Eq)]
pub struct DriverRow<'a> {
    pub name: String,
    pub entry: Option<&'a DriverConfig>,
}

/// Rows for the switcher's registry, in dispatch order.
///
/// The registry holds names only, so each name is matched to the config entry
/// the duplicate policy kept: the first one for `ignore`, the last one for
/// `replace`, and the n-th one for the n-th occurrence under `append`.
pub fn dispatch_rows<'a>(switcher: &AppContextSwitcher, cfg: &'a SwitcherConfig) -> Vec<DriverRow<'a>> {
    let names = switcher.driver_names();
    let mut rows = Vec::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        let mut candidates = cfg.drivers.iter().filter(|d| &d.name == name);
        let entry = match switcher.duplicate_policy() {
            DuplicatePolicy::Ignore => candidates.next(),
            DuplicatePolicy::Replace => candidates.last(),
            DuplicatePolicy::Append => {
                let seen = names[..i].iter().filter(|n| *n == name).count();
                candidates.nth(seen)
            }
        };
        rows.push(DriverRow {
            name: name.clone(),
            entry,
        });
    }
    rows
}

pub fn run_drivers(switcher: &AppContextSwitcher, cfg: &SwitcherConfig) {
    if let Some(scheme) = switcher.return_url_scheme() {
        println!("return URL scheme: {scheme}");
    }
    println!("duplicate policy: {}", switcher.duplicate_policy());

    let rows = dispatch_rows(switcher, cfg);
    if rows.is_empty() {
        println!("No drivers configured.");
        return;
    }
    println!("{:<4} {:<16} {:<28} HOST", "#", "NAME", "SCHEME");
    for (i, row) in rows.iter().enumerate() {
        let scheme = row.entry.map(|d| d.scheme.as_str()).unwrap_or("-");
        let host = row
            .entry
            .map(|d| d.host.as_deref().unwrap_or("*"))
            .unwrap_or("-");
        println!("{:<4} {:<16} {:<28} {}", i + 1, row.name, scheme, host);
    }
}
