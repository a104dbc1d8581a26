//! Typed host-domain contracts used across the desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the external URL,
//! notification and timer service traits together with no-op and in-memory adapters, while
//! concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod external_url;
pub mod host;
pub mod notifications;
pub mod timers;

pub use external_url::{
    ExternalOpenStatus, ExternalUrlFuture, ExternalUrlService, MemoryExternalUrlService,
    NoopExternalUrlService,
};
pub use host::{CapabilityStatus, HostCapabilities, HostServices, HostStrategy};
pub use notifications::{
    MemoryNotificationService, NoopNotificationService, NotificationFuture, NotificationService,
};
pub use timers::{ManualTimerService, NoopTimerService, TimerCallback, TimerHandle, TimerService};
