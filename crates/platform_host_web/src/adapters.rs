use std::rc::Rc;

use platform_host::{
    ExternalOpenStatus, ExternalUrlFuture, ExternalUrlService, HostCapabilities, HostServices,
    HostStrategy, NoopExternalUrlService, NoopNotificationService, NoopTimerService,
    NotificationFuture, NotificationService, TimerCallback, TimerHandle, TimerService,
};

use crate::{WebExternalUrlService, WebNotificationService, WebTimerService};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "desktop-host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "desktop-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Returns the capability posture for the selected host strategy.
pub const fn host_capabilities() -> HostCapabilities {
    match selected_host_strategy() {
        HostStrategy::Browser => HostCapabilities::browser(),
        HostStrategy::Stub => HostCapabilities::stub(),
    }
}

/// Adapter enum that erases the concrete external URL backend behind [`ExternalUrlService`].
#[derive(Debug, Clone, Copy)]
pub enum ExternalUrlServiceAdapter {
    /// Browser-backed external URL opening.
    Browser(WebExternalUrlService),
    /// No-op fallback used when the host is intentionally stubbed.
    Stub(NoopExternalUrlService),
}

impl ExternalUrlService for ExternalUrlServiceAdapter {
    fn open_url<'a>(
        &'a self,
        url: &'a str,
    ) -> ExternalUrlFuture<'a, Result<ExternalOpenStatus, String>> {
        match self {
            Self::Browser(service) => service.open_url(url),
            Self::Stub(service) => service.open_url(url),
        }
    }
}

/// Adapter enum that erases the concrete notification backend behind [`NotificationService`].
#[derive(Debug, Clone, Copy)]
pub enum NotificationServiceAdapter {
    /// Browser Web Notifications delivery.
    Browser(WebNotificationService),
    /// No-op fallback used when the host is intentionally stubbed.
    Stub(NoopNotificationService),
}

impl NotificationService for NotificationServiceAdapter {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(service) => service.notify(title, body),
            Self::Stub(service) => service.notify(title, body),
        }
    }
}

/// Adapter enum that erases the concrete timer backend behind [`TimerService`].
#[derive(Debug, Clone, Copy)]
pub enum TimerServiceAdapter {
    /// `window.setTimeout`-backed timers.
    Browser(WebTimerService),
    /// No-op fallback used when the host is intentionally stubbed.
    Stub(NoopTimerService),
}

impl TimerService for TimerServiceAdapter {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<TimerHandle, String> {
        match self {
            Self::Browser(service) => service.set_timeout(delay_ms, callback),
            Self::Stub(service) => service.set_timeout(delay_ms, callback),
        }
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        match self {
            Self::Browser(service) => service.clear_timeout(handle),
            Self::Stub(service) => service.clear_timeout(handle),
        }
    }
}

/// Builds the external-URL adapter for the compile-time selected host strategy.
pub fn external_url_service() -> ExternalUrlServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => ExternalUrlServiceAdapter::Browser(WebExternalUrlService),
        HostStrategy::Stub => ExternalUrlServiceAdapter::Stub(NoopExternalUrlService),
    }
}

/// Builds the notification adapter for the compile-time selected host strategy.
pub fn notification_service() -> NotificationServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => NotificationServiceAdapter::Browser(WebNotificationService),
        HostStrategy::Stub => NotificationServiceAdapter::Stub(NoopNotificationService),
    }
}

/// Builds the timer adapter for the compile-time selected host strategy.
pub fn timer_service() -> TimerServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => TimerServiceAdapter::Browser(WebTimerService),
        HostStrategy::Stub => TimerServiceAdapter::Stub(NoopTimerService),
    }
}

/// Assembles the full [`HostServices`] bundle for the selected host strategy.
pub fn build_host_services() -> HostServices {
    HostServices {
        external_urls: Rc::new(external_url_service()),
        notifications: Rc::new(notification_service()),
        timers: Rc::new(timer_service()),
        capabilities: host_capabilities(),
        host_strategy: selected_host_strategy(),
    }
}
