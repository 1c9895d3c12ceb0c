//! Recording driver with a canned `can_handle` answer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use appswitch_core::{ReturnUrl, ReturnUrlDriver};

#[derive(Default)]
pub struct MockDriver {
    canned_can_handle: AtomicBool,
    last_can_handle_url: Mutex<Option<ReturnUrl>>,
    last_handle_return_url: Mutex<Option<ReturnUrl>>,
}

impl MockDriver {
    pub fn new(canned_can_handle: bool) -> Self {
        let driver = Self::default();
        driver.set_canned_can_handle(canned_can_handle);
        driver
    }

    pub fn set_canned_can_handle(&self, value: bool) {
        self.canned_can_handle.store(value, Ordering::SeqCst);
    }

    pub fn last_can_handle_url(&self) -> Option<ReturnUrl> {
        self.last_can_handle_url.lock().unwrap().clone()
    }

    pub fn last_handle_return_url(&self) -> Option<ReturnUrl> {
        self.last_handle_return_url.lock().unwrap().clone()
    }
}

impl ReturnUrlDriver for MockDriver {
    fn can_handle_return_url(&self, url: &ReturnUrl) -> bool {
        *self.last_can_handle_url.lock().unwrap() = Some(url.clone());
        self.canned_can_handle.load(Ordering::SeqCst)
    }

    fn handle_return_url(&self, url: &ReturnUrl) {
        *self.last_handle_return_url.lock().unwrap() = Some(url.clone());
    }
}
