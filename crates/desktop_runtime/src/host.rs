//! Host-side executor for reducer effects.
//!
//! Keeps the reducer free of browser APIs: URL opening, notifications and timers all go through
//! the injected [`HostServices`] so the runtime can be driven by in-memory services in tests.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use leptos::{logging, spawn_local};
use platform_host::{
    ExternalUrlService, HostCapabilities, HostServices, HostStrategy, NotificationService,
    TimerHandle, TimerService,
};
use platform_host_web::ViewportListener;

use crate::{
    model::{LifecycleEvent, WindowId},
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

type LifecycleObserver = Rc<dyn Fn(WindowId, LifecycleEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TimerKey {
    SelfClose { window_id: WindowId, generation: u64 },
    NoticeDismiss(u64),
}

#[derive(Clone)]
/// Host service bundle plus the bookkeeping needed to run [`RuntimeEffect`] values.
pub struct DesktopHostContext {
    external_urls: Rc<dyn ExternalUrlService>,
    notifications: Rc<dyn NotificationService>,
    timers: Rc<dyn TimerService>,
    capabilities: HostCapabilities,
    host_strategy: HostStrategy,
    pending_timers: Rc<RefCell<HashMap<TimerKey, TimerHandle>>>,
    lifecycle_observers: Rc<RefCell<Vec<LifecycleObserver>>>,
    viewport_listener: Rc<RefCell<Option<ViewportListener>>>,
}

impl DesktopHostContext {
    pub fn new(services: HostServices) -> Self {
        Self {
            external_urls: services.external_urls,
            notifications: services.notifications,
            timers: services.timers,
            capabilities: services.capabilities,
            host_strategy: services.host_strategy,
            pending_timers: Rc::new(RefCell::new(HashMap::new())),
            lifecycle_observers: Rc::new(RefCell::new(Vec::new())),
            viewport_listener: Rc::new(RefCell::new(None)),
        }
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.host_strategy.as_str()
    }

    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    /// Registers a collaborator (sound, animation, notification chime) for lifecycle events.
    pub fn on_lifecycle(&self, observer: impl Fn(WindowId, LifecycleEvent) + 'static) {
        self.lifecycle_observers.borrow_mut().push(Rc::new(observer));
    }

    /// Number of runtime timers that have been scheduled and have neither fired nor been cancelled.
    pub fn pending_timer_count(&self) -> usize {
        self.pending_timers.borrow().len()
    }

    /// Keeps a viewport subscription alive until [`DesktopHostContext::release`].
    pub fn retain_viewport_listener(&self, listener: ViewportListener) {
        *self.viewport_listener.borrow_mut() = Some(listener);
    }

    /// Drops the viewport subscription and clears every pending timer.
    pub fn release(&self) {
        self.viewport_listener.borrow_mut().take();
        let pending: Vec<TimerHandle> = self
            .pending_timers
            .borrow_mut()
            .drain()
            .map(|(_, handle)| handle)
            .collect();
        for handle in pending {
            self.timers.clear_timeout(handle);
        }
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::Lifecycle { window_id, event } => {
                let observers = self.lifecycle_observers.borrow().clone();
                for observer in observers {
                    observer(window_id, event);
                }
            }
            RuntimeEffect::OpenExternalUrl {
                window_id,
                url,
                generation,
            } => self.open_external_url(runtime, window_id, url, generation),
            RuntimeEffect::ScheduleSelfClose {
                window_id,
                generation,
                delay_ms,
            } => self.schedule(
                TimerKey::SelfClose {
                    window_id,
                    generation,
                },
                delay_ms,
                runtime,
                DesktopAction::SelfCloseElapsed {
                    window_id,
                    generation,
                },
            ),
            RuntimeEffect::CancelSelfClose {
                window_id,
                generation,
            } => self.cancel(TimerKey::SelfClose {
                window_id,
                generation,
            }),
            RuntimeEffect::Notify { title, body } => self.notify(title, body),
            RuntimeEffect::ScheduleNoticeDismiss {
                notice_id,
                delay_ms,
            } => self.schedule(
                TimerKey::NoticeDismiss(notice_id),
                delay_ms,
                runtime,
                DesktopAction::DismissNotice { notice_id },
            ),
        }
    }

    fn open_external_url(
        &self,
        runtime: DesktopRuntimeContext,
        window_id: WindowId,
        url: String,
        generation: u64,
    ) {
        if !self.capabilities.external_urls.is_available() {
            runtime.dispatch_action(DesktopAction::ExternalLaunchFinished {
                window_id,
                generation,
                result: Err(format!(
                    "{} host cannot open external urls",
                    self.host_strategy_name()
                )),
            });
            return;
        }

        let service = self.external_urls.clone();
        spawn_local(async move {
            let result = service.open_url(&url).await;
            if let Err(err) = &result {
                logging::warn!("open external url failed for `{url}`: {err}");
            }
            runtime.dispatch_action(DesktopAction::ExternalLaunchFinished {
                window_id,
                generation,
                result,
            });
        });
    }

    fn notify(&self, title: String, body: String) {
        if !self.capabilities.notifications.is_available() {
            logging::log!("{title}: {body}");
            return;
        }

        let service = self.notifications.clone();
        spawn_local(async move {
            if let Err(err) = service.notify(&title, &body).await {
                logging::warn!("notification dispatch failed: {err}");
            }
        });
    }

    /// Arms a timer that dispatches `action`. A host that refuses the timer gets the action
    /// right away, so transient windows still close and notices still clear.
    fn schedule(
        &self,
        key: TimerKey,
        delay_ms: u32,
        runtime: DesktopRuntimeContext,
        action: DesktopAction,
    ) {
        self.cancel(key);
        let pending = self.pending_timers.clone();
        let deferred = action.clone();
        let scheduled = self.timers.set_timeout(
            delay_ms,
            Box::new(move || {
                pending.borrow_mut().remove(&key);
                runtime.dispatch_action(deferred);
            }),
        );
        match scheduled {
            Ok(handle) => {
                self.pending_timers.borrow_mut().insert(key, handle);
            }
            Err(err) => {
                logging::warn!(
                    "timer refused by {} host ({err}); firing now",
                    self.host_strategy_name()
                );
                runtime.dispatch_action(action);
            }
        }
    }

    fn cancel(&self, key: TimerKey) {
        let handle = self.pending_timers.borrow_mut().remove(&key);
        if let Some(handle) = handle {
            self.timers.clear_timeout(handle);
        }
    }
}
