//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer for external URL opening,
//! notifications, timers, and viewport measurement. Every adapter compiles on native targets with
//! an inert fallback so the runtime and its tests build everywhere.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod external_url;
pub mod notifications;
pub mod timers;
pub mod viewport;

pub use adapters::{
    build_host_services, external_url_service, host_capabilities, host_strategy_name,
    notification_service, selected_host_strategy, timer_service, ExternalUrlServiceAdapter,
    NotificationServiceAdapter, TimerServiceAdapter,
};
pub use external_url::WebExternalUrlService;
pub use notifications::WebNotificationService;
pub use timers::WebTimerService;
pub use viewport::{measure_viewport, watch_viewport, ViewportListener};
