//! Window catalog: per-window kind, minimize policy and declared geometry.
//!
//! Entries come from `window_catalog.toml`, compiled in by `build.rs`. Registering a new
//! transient link or multiplexed window is a catalog entry plus a [`WindowId`] variant; the
//! controller consults [`WindowKind`] instead of comparing ids.

use crate::{geometry::GeometrySpec, model::WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Ordinary in-shell window.
    Standard,
    /// Hosts mutually exclusive sub-content selected by its input without reopening.
    Multiplexed,
    /// Not a real window: opening it launches `url` and the window closes itself shortly after.
    TransientLink { url: &'static str },
}

impl WindowKind {
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::TransientLink { .. })
    }

    pub const fn is_multiplexed(self) -> bool {
        matches!(self, Self::Multiplexed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDescriptor {
    pub window_id: WindowId,
    pub title: &'static str,
    pub kind: WindowKind,
    pub minimizable: bool,
    /// Whether opening the window stores the caller's input as its auxiliary input.
    pub accepts_input: bool,
    pub geometry: GeometrySpec,
}

include!(concat!(env!("OUT_DIR"), "/window_catalog_generated.rs"));

pub const fn window_descriptor(window_id: WindowId) -> WindowDescriptor {
    generated_descriptor(window_id)
}

pub const fn is_transient_launcher(window_id: WindowId) -> bool {
    window_descriptor(window_id).kind.is_transient()
}

pub const fn is_minimizable(window_id: WindowId) -> bool {
    window_descriptor(window_id).minimizable
}

/// Default launch URL for a transient link window.
pub const fn transient_link_url(window_id: WindowId) -> Option<&'static str> {
    match window_descriptor(window_id).kind {
        WindowKind::TransientLink { url } => Some(url),
        WindowKind::Standard | WindowKind::Multiplexed => None,
    }
}

pub fn transient_launchers() -> impl Iterator<Item = WindowId> {
    WindowId::ALL
        .into_iter()
        .filter(|id| is_transient_launcher(*id))
}

pub fn minimizable_windows() -> impl Iterator<Item = WindowId> {
    WindowId::ALL.into_iter().filter(|id| is_minimizable(*id))
}

pub fn multiplexed_windows() -> impl Iterator<Item = WindowId> {
    WindowId::ALL
        .into_iter()
        .filter(|id| window_descriptor(*id).kind.is_multiplexed())
}
