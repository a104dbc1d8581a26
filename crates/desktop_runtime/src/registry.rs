//! Canonical window lifecycle flags, one entry per [`WindowId`].
//!
//! Reads are public. Writes are crate-private and only happen through
//! [`crate::window_manager::WindowController`].

use serde_json::Value;

use crate::{
    apps,
    model::{WindowEntry, WindowId, WindowState},
};

#[derive(Debug, Clone, PartialEq)]
pub struct WindowRegistry {
    entries: [WindowEntry; WindowId::COUNT],
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self {
            entries: std::array::from_fn(|_| WindowEntry::default()),
        }
    }
}

impl WindowRegistry {
    pub fn entry(&self, window_id: WindowId) -> &WindowEntry {
        &self.entries[window_id.index()]
    }

    pub fn state(&self, window_id: WindowId) -> WindowState {
        self.entry(window_id).state()
    }

    pub fn is_open(&self, window_id: WindowId) -> bool {
        self.entry(window_id).open
    }

    pub fn is_minimized(&self, window_id: WindowId) -> bool {
        self.entry(window_id).minimized
    }

    pub fn auxiliary_input(&self, window_id: WindowId) -> &Value {
        &self.entry(window_id).auxiliary_input
    }

    pub fn iter(&self) -> impl Iterator<Item = (WindowId, &WindowEntry)> + '_ {
        WindowId::ALL.into_iter().zip(self.entries.iter())
    }

    /// Windows with `open = true`, Active or Minimized.
    pub fn open_windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.iter()
            .filter(|(_, entry)| entry.open)
            .map(|(window_id, _)| window_id)
    }

    /// Non-transient windows currently Active.
    pub fn active_windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.iter()
            .filter(|(window_id, entry)| {
                entry.state() == WindowState::Active && !apps::is_transient_launcher(*window_id)
            })
            .map(|(window_id, _)| window_id)
    }

    /// The single Active non-transient window, if any.
    pub fn foreground(&self) -> Option<WindowId> {
        self.active_windows().next()
    }

    pub(crate) fn entry_mut(&mut self, window_id: WindowId) -> &mut WindowEntry {
        &mut self.entries[window_id.index()]
    }
}
