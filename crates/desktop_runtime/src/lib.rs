//! Window lifecycle and layout runtime for the browser desktop shell.
//!
//! The pure core ([`reduce_desktop`] over [`DesktopState`]) owns window flags, external-link
//! launchers, viewport classification and notices. [`runtime_context`] wires it into Leptos
//! signals and runs the resulting [`RuntimeEffect`] values against injected host services.

pub mod apps;
pub mod config;
pub mod drag_bounds;
mod effect_executor;
pub mod geometry;
pub mod host;
pub mod launcher;
pub mod model;
pub mod reducer;
pub mod registry;
pub mod runtime_context;
pub mod viewport;
pub mod window_manager;

pub use apps::{WindowDescriptor, WindowKind};
pub use config::{ConfigError, ShellConfig};
pub use drag_bounds::DragBounds;
pub use geometry::{GeometrySpec, ResolvedGeometry};
pub use host::DesktopHostContext;
pub use launcher::{ExternalLinkLauncher, LauncherCommand, LauncherPhase};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use registry::WindowRegistry;
pub use runtime_context::{
    install_desktop_runtime, provide_browser_runtime, provide_desktop_runtime,
    use_desktop_runtime, DesktopRuntimeContext,
};
pub use viewport::{Breakpoint, Orientation, Viewport};
pub use window_manager::WindowController;
