//! Window lifecycle transitions over the [`WindowRegistry`].
//!
//! Each window is Closed, Active or Minimized. At most one non-transient window is Active at a
//! time: activating a window closes every other Active non-transient window. Minimized windows
//! keep their content and stay on the taskbar. Transient links flip `open` without touching any
//! other window.

use serde_json::Value;

use crate::{
    apps::{self, window_descriptor},
    model::{LifecycleEvent, WindowId, WindowState, WindowTransition},
    registry::WindowRegistry,
};

#[derive(Debug, Clone, Default, PartialEq)]
/// Owns the registry and applies every lifecycle transition.
pub struct WindowController {
    registry: WindowRegistry,
}

impl WindowController {
    pub fn new(registry: WindowRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    /// Taskbar/icon click semantics.
    ///
    /// - Closed: activate (storing `input` for windows that accept it).
    /// - Active multiplexed window with a new non-null input: switch sub-content in place.
    /// - Active minimizable window: minimize.
    /// - Active other window: close.
    /// - Minimized: restore, switching sub-content first if a multiplexed window got a new input.
    pub fn toggle(&mut self, window_id: WindowId, input: Value) -> Vec<WindowTransition> {
        let descriptor = window_descriptor(window_id);
        if descriptor.kind.is_transient() {
            return self.flip_transient(window_id);
        }

        let entry = self.registry.entry(window_id);
        let switches_input = descriptor.kind.is_multiplexed()
            && !input.is_null()
            && input != entry.auxiliary_input;
        match entry.state() {
            WindowState::Closed => self.activate(window_id, input),
            WindowState::Minimized => {
                let mut transitions = self.restore(window_id);
                if switches_input {
                    self.registry.entry_mut(window_id).auxiliary_input = input;
                    transitions.push(WindowTransition::new(
                        window_id,
                        LifecycleEvent::InputChanged,
                    ));
                }
                transitions
            }
            WindowState::Active => {
                if switches_input {
                    self.registry.entry_mut(window_id).auxiliary_input = input;
                    vec![WindowTransition::new(window_id, LifecycleEvent::InputChanged)]
                } else if descriptor.minimizable {
                    self.minimize(window_id)
                } else {
                    self.close(window_id)
                }
            }
        }
    }

    /// Minimizes an Active minimizable window. Anything else is a no-op.
    pub fn minimize(&mut self, window_id: WindowId) -> Vec<WindowTransition> {
        if !apps::is_minimizable(window_id) || self.registry.state(window_id) != WindowState::Active
        {
            return Vec::new();
        }
        self.registry.entry_mut(window_id).minimized = true;
        vec![WindowTransition::new(window_id, LifecycleEvent::Minimized)]
    }

    /// Restores a Minimized window to Active, keeping its auxiliary input.
    ///
    /// Restoring a window that is not minimized is a no-op.
    pub fn restore(&mut self, window_id: WindowId) -> Vec<WindowTransition> {
        let entry = self.registry.entry(window_id);
        if !entry.minimized {
            return Vec::new();
        }
        if !entry.open {
            // Flags drifted out of sync; fall back to a fresh open with the stored input.
            let input = entry.auxiliary_input.clone();
            self.registry.entry_mut(window_id).minimized = false;
            return self.activate(window_id, input);
        }

        let mut transitions = self.close_other_active(window_id);
        self.registry.entry_mut(window_id).minimized = false;
        transitions.push(WindowTransition::new(window_id, LifecycleEvent::Restored));
        transitions
    }

    /// Closes a window from any state. Closing a Closed window is a no-op.
    pub fn close(&mut self, window_id: WindowId) -> Vec<WindowTransition> {
        let entry = self.registry.entry_mut(window_id);
        if !entry.open && !entry.minimized {
            return Vec::new();
        }
        entry.open = false;
        entry.minimized = false;
        vec![WindowTransition::new(window_id, LifecycleEvent::Closed)]
    }

    fn activate(&mut self, window_id: WindowId, input: Value) -> Vec<WindowTransition> {
        let mut transitions = self.close_other_active(window_id);
        let accepts_input = window_descriptor(window_id).accepts_input;
        let entry = self.registry.entry_mut(window_id);
        entry.open = true;
        entry.minimized = false;
        if accepts_input {
            entry.auxiliary_input = input;
        }
        transitions.push(WindowTransition::new(window_id, LifecycleEvent::Opened));
        transitions
    }

    fn close_other_active(&mut self, window_id: WindowId) -> Vec<WindowTransition> {
        let others = self
            .registry
            .active_windows()
            .filter(|other| *other != window_id)
            .collect::<Vec<_>>();
        others
            .into_iter()
            .flat_map(|other| self.close(other))
            .collect()
    }

    fn flip_transient(&mut self, window_id: WindowId) -> Vec<WindowTransition> {
        if self.registry.is_open(window_id) {
            self.close(window_id)
        } else {
            let entry = self.registry.entry_mut(window_id);
            entry.open = true;
            entry.minimized = false;
            vec![WindowTransition::new(window_id, LifecycleEvent::Opened)]
        }
    }
}
