//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue and host
//! bootstrap wiring. Rendering stays with the embedding UI crate, which reads
//! [`DesktopRuntimeContext::state`] and dispatches [`DesktopAction`] values.
#![allow(clippy::clone_on_copy)]

use leptos::*;
use platform_host::HostServices;
use serde_json::Value;

use crate::{
    config::{ConfigError, ShellConfig},
    effect_executor,
    host::DesktopHostContext,
    model::{DesktopState, WindowId, WindowLayout},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Queue of runtime effects emitted by the reducer and drained by the effect executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    pub fn toggle_window(&self, window_id: WindowId, input: Value) {
        self.dispatch_action(DesktopAction::ToggleWindow { window_id, input });
    }

    /// Tracked read of one window's layout.
    pub fn window_layout(&self, window_id: WindowId) -> WindowLayout {
        self.state.with(|state| state.window_layout(window_id))
    }

    /// Cancels pending launcher timers and drops host subscriptions.
    pub fn teardown(&self) {
        self.dispatch_action(DesktopAction::Teardown);
        self.host.with_value(DesktopHostContext::release);
    }
}

/// Creates the reducer container and effect executor under the current reactive owner.
///
/// The caller decides whether to expose the result through context; see
/// [`provide_desktop_runtime`].
///
/// # Errors
///
/// Returns [`ConfigError`] when `config` fails validation. Nothing is installed in that case.
pub fn install_desktop_runtime(
    host_services: HostServices,
    config: ShellConfig,
) -> Result<DesktopRuntimeContext, ConfigError> {
    let initial = DesktopState::new(config)?;
    let host = store_value(DesktopHostContext::new(host_services));
    let state = create_rw_signal(initial);
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let previous_desktop = desktop.clone();

        match reduce_desktop(&mut desktop, action) {
            Ok(new_effects) => {
                if desktop != previous_desktop {
                    state.set(desktop);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => {
                logging::warn!("desktop reducer error: {err}");
                // Unknown window tokens are programming errors; surface them in dev builds.
                #[cfg(debug_assertions)]
                panic!("desktop reducer rejected an action: {err}");
            }
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        effects,
        dispatch,
    };
    effect_executor::install(runtime);
    Ok(runtime)
}

/// Installs the runtime and provides [`DesktopRuntimeContext`] to descendant components.
///
/// # Errors
///
/// See [`install_desktop_runtime`].
pub fn provide_desktop_runtime(
    host_services: HostServices,
    config: ShellConfig,
) -> Result<DesktopRuntimeContext, ConfigError> {
    let runtime = install_desktop_runtime(host_services, config)?;
    provide_context(runtime.clone());
    Ok(runtime)
}

/// Browser entry point: selected host adapters plus live viewport tracking.
///
/// # Errors
///
/// See [`install_desktop_runtime`].
pub fn provide_browser_runtime(config: ShellConfig) -> Result<DesktopRuntimeContext, ConfigError> {
    let runtime = provide_desktop_runtime(platform_host_web::build_host_services(), config)?;

    let (width, height) = platform_host_web::measure_viewport();
    dispatch_viewport(runtime, width, height);
    let listener = platform_host_web::watch_viewport(move |width, height| {
        dispatch_viewport(runtime, width, height)
    });
    runtime
        .host
        .with_value(|host| host.retain_viewport_listener(listener));

    on_cleanup(move || runtime.teardown());
    Ok(runtime)
}

fn dispatch_viewport(runtime: DesktopRuntimeContext, width: u32, height: u32) {
    runtime.dispatch_action(DesktopAction::ViewportChanged {
        width: i32::try_from(width).unwrap_or(i32::MAX),
        height: i32::try_from(height).unwrap_or(i32::MAX),
    });
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside a component tree set up by [`provide_desktop_runtime`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{LifecycleEvent, WindowState};

    #[test]
    fn dispatch_updates_state_and_notifies_lifecycle_observers() {
        let reactive = create_runtime();
        let runtime = install_desktop_runtime(HostServices::noop(), ShellConfig::default())
            .expect("install runtime");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        runtime.host.with_value(|host| {
            host.on_lifecycle(move |window_id, event| sink.borrow_mut().push((window_id, event)))
        });

        runtime.toggle_window(WindowId::Notepad, Value::Null);
        runtime.toggle_window(WindowId::Calculator, Value::Null);

        assert_eq!(
            runtime
                .state
                .with_untracked(|state| state.registry().state(WindowId::Calculator)),
            WindowState::Active
        );
        assert_eq!(
            *seen.borrow(),
            vec![
                (WindowId::Notepad, LifecycleEvent::Opened),
                (WindowId::Notepad, LifecycleEvent::Closed),
                (WindowId::Calculator, LifecycleEvent::Opened),
            ]
        );
        assert!(runtime.effects.get_untracked().is_empty());
        reactive.dispose();
    }

    #[test]
    fn browser_runtime_starts_from_the_measured_viewport() {
        let reactive = create_runtime();
        let runtime = provide_browser_runtime(ShellConfig::default()).expect("install runtime");

        let viewport = runtime.state.with_untracked(DesktopState::viewport);
        assert_eq!((viewport.width, viewport.height), (1024, 768));
        assert_eq!(runtime.host.with_value(|host| host.pending_timer_count()), 0);
        reactive.dispose();
    }

    #[test]
    fn invalid_config_is_rejected_before_anything_is_installed() {
        let reactive = create_runtime();
        let config = ShellConfig {
            self_close_delay_ms: 60_000,
            ..ShellConfig::default()
        };

        let result = install_desktop_runtime(HostServices::noop(), config);

        assert!(matches!(result, Err(ConfigError::SelfCloseDelayTooLong(60_000))));
        reactive.dispose();
    }
}
