//! Out-of-page notices raised by the shell, such as a blocked external launch.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Boxed future returned by [`NotificationService::notify`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Delivers a titled message outside the page.
pub trait NotificationService {
    /// Shows `title` with `body`. Delivery failures are reported, never retried.
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Swallows every notice.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify<'a>(
        &'a self,
        _title: &'a str,
        _body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory notification sink that keeps every delivered `(title, body)` pair.
pub struct MemoryNotificationService {
    delivered: Rc<RefCell<Vec<(String, String)>>>,
}

impl MemoryNotificationService {
    /// Returns every delivered notification, oldest first.
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.delivered.borrow().clone()
    }
}

impl NotificationService for MemoryNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        self.delivered
            .borrow_mut()
            .push((title.to_string(), body.to_string()));
        Box::pin(async { Ok(()) })
    }
}
