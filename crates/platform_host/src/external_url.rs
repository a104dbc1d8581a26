//! External URL host-service contracts.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`ExternalUrlService`].
pub type ExternalUrlFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Confirmation state reported by the host after an external navigation attempt.
pub enum ExternalOpenStatus {
    /// The host confirmed a new browsing context was created.
    Opened,
    /// The host could not confirm the new context (for example a blocked pop-up).
    Blocked,
}

impl ExternalOpenStatus {
    /// Returns whether the launch was confirmed.
    pub const fn is_opened(self) -> bool {
        matches!(self, Self::Opened)
    }
}

/// Host service for opening external URLs outside the desktop shell.
pub trait ExternalUrlService {
    /// Opens a URL in a new browsing context using the host's navigation mechanism.
    ///
    /// # Errors
    ///
    /// Returns an error string when the host rejected the request outright.
    fn open_url<'a>(
        &'a self,
        url: &'a str,
    ) -> ExternalUrlFuture<'a, Result<ExternalOpenStatus, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// External URL service for targets that cannot open a browsing context. Every request fails.
pub struct NoopExternalUrlService;

impl ExternalUrlService for NoopExternalUrlService {
    fn open_url<'a>(
        &'a self,
        _url: &'a str,
    ) -> ExternalUrlFuture<'a, Result<ExternalOpenStatus, String>> {
        Box::pin(async { Err("external urls are not supported on this host".to_string()) })
    }
}

#[derive(Debug, Clone)]
/// In-memory external URL service that records every request and answers with a fixed status.
pub struct MemoryExternalUrlService {
    status: ExternalOpenStatus,
    opened: Rc<RefCell<Vec<String>>>,
}

impl Default for MemoryExternalUrlService {
    fn default() -> Self {
        Self::with_status(ExternalOpenStatus::Opened)
    }
}

impl MemoryExternalUrlService {
    /// Creates a service that reports `status` for every request.
    pub fn with_status(status: ExternalOpenStatus) -> Self {
        Self {
            status,
            opened: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Returns the URLs requested so far, oldest first.
    pub fn requested_urls(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl ExternalUrlService for MemoryExternalUrlService {
    fn open_url<'a>(
        &'a self,
        url: &'a str,
    ) -> ExternalUrlFuture<'a, Result<ExternalOpenStatus, String>> {
        self.opened.borrow_mut().push(url.to_string());
        let status = self.status;
        Box::pin(async move { Ok(status) })
    }
}
