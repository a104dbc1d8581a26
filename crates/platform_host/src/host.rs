//! Shared host-bundle and capability models for browser and test runtime composition.

use std::rc::Rc;

use crate::{
    ExternalUrlService, NoopExternalUrlService, NoopNotificationService, NoopTimerService,
    NotificationService, TimerService,
};

/// Which family of adapters backs the shell: real browser APIs or inert stand-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// `window.open`, Web Notifications and `setTimeout`.
    Browser,
    /// Placeholder/no-op or in-memory adapters (native builds and tests).
    Stub,
}

impl HostStrategy {
    /// Lower-case token used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Stub => "stub",
        }
    }
}

/// Whether the shell may call into one host service right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// Capability is available and may be used immediately.
    Available,
    /// The host has no such service; calls must be skipped.
    Unavailable,
    /// Present but gated behind a user gesture or permission prompt.
    RequiresUserActivation,
}

impl CapabilityStatus {
    /// `true` only for [`CapabilityStatus::Available`].
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Host capability snapshot exposed to runtime wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Opening links in a new browsing context.
    pub external_urls: CapabilityStatus,
    /// Out-of-page notifications (blocked-launch notices).
    pub notifications: CapabilityStatus,
}

impl HostCapabilities {
    /// Browser posture. The notification adapter negotiates permission on first use.
    pub const fn browser() -> Self {
        Self {
            external_urls: CapabilityStatus::Available,
            notifications: CapabilityStatus::Available,
        }
    }

    /// Stub posture: nothing can leave the page, so launches report failure and notices are
    /// only logged.
    pub const fn stub() -> Self {
        Self {
            external_urls: CapabilityStatus::Unavailable,
            notifications: CapabilityStatus::Unavailable,
        }
    }
}

/// Every host service the desktop runtime needs, chosen by the entry layer.
///
/// Adapter selection happens before this bundle reaches `desktop_runtime`; the runtime only sees
/// the traits.
#[derive(Clone)]
pub struct HostServices {
    /// Opens transient-link URLs.
    pub external_urls: Rc<dyn ExternalUrlService>,
    /// Delivers blocked-launch notices.
    pub notifications: Rc<dyn NotificationService>,
    /// Deferred callback scheduling service.
    pub timers: Rc<dyn TimerService>,
    /// What the runtime may call without further checks.
    pub capabilities: HostCapabilities,
    /// Adapter family, reported in diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a bundle of no-op services.
    pub fn noop() -> Self {
        Self {
            external_urls: Rc::new(NoopExternalUrlService),
            notifications: Rc::new(NoopNotificationService),
            timers: Rc::new(NoopTimerService),
            capabilities: HostCapabilities::stub(),
            host_strategy: HostStrategy::Stub,
        }
    }

    /// Replaces the external URL service and marks it available.
    pub fn with_external_urls(mut self, service: Rc<dyn ExternalUrlService>) -> Self {
        self.external_urls = service;
        self.capabilities.external_urls = CapabilityStatus::Available;
        self
    }

    /// Replaces the notification service and marks it available.
    pub fn with_notifications(mut self, service: Rc<dyn NotificationService>) -> Self {
        self.notifications = service;
        self.capabilities.notifications = CapabilityStatus::Available;
        self
    }

    /// Replaces the timer service.
    pub fn with_timers(mut self, service: Rc<dyn TimerService>) -> Self {
        self.timers = service;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryExternalUrlService;

    #[test]
    fn noop_bundle_reports_nothing_available() {
        let services = HostServices::noop();
        assert_eq!(services.capabilities, HostCapabilities::stub());
        assert!(!services.capabilities.external_urls.is_available());
        assert!(!services.capabilities.notifications.is_available());
    }

    #[test]
    fn installing_a_service_marks_it_available() {
        let services =
            HostServices::noop().with_external_urls(Rc::new(MemoryExternalUrlService::default()));
        assert!(services.capabilities.external_urls.is_available());
        assert!(!services.capabilities.notifications.is_available());
    }
}
