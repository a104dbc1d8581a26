use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    apps::{self, window_descriptor},
    config::{ConfigError, ShellConfig},
    drag_bounds::{self, DragBounds},
    geometry::{self, ResolvedGeometry},
    launcher::ExternalLinkLauncher,
    registry::WindowRegistry,
    viewport::{Breakpoint, Viewport},
    window_manager::WindowController,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Every virtual window the shell knows about. The set is closed and fixed at compile time.
pub enum WindowId {
    Start,
    Menu,
    Explorer,
    Browser,
    Calculator,
    Vscode,
    Recycle,
    App,
    Pictures,
    Notepad,
    Videos,
    Contactme,
    Linkedin,
    Github,
    Chatbot,
    Widgets,
    Notifications,
    QuickSettings,
}

impl WindowId {
    /// Number of window ids.
    pub const COUNT: usize = 18;

    /// All window ids in declaration order.
    pub const ALL: [WindowId; Self::COUNT] = [
        Self::Start,
        Self::Menu,
        Self::Explorer,
        Self::Browser,
        Self::Calculator,
        Self::Vscode,
        Self::Recycle,
        Self::App,
        Self::Pictures,
        Self::Notepad,
        Self::Videos,
        Self::Contactme,
        Self::Linkedin,
        Self::Github,
        Self::Chatbot,
        Self::Widgets,
        Self::Notifications,
        Self::QuickSettings,
    ];

    /// Stable token used in markup, deep links and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Menu => "menu",
            Self::Explorer => "explorer",
            Self::Browser => "browser",
            Self::Calculator => "calculator",
            Self::Vscode => "vscode",
            Self::Recycle => "recycle",
            Self::App => "app",
            Self::Pictures => "pictures",
            Self::Notepad => "notepad",
            Self::Videos => "videos",
            Self::Contactme => "contactme",
            Self::Linkedin => "linkedin",
            Self::Github => "github",
            Self::Chatbot => "chatbot",
            Self::Widgets => "widgets",
            Self::Notifications => "notifications",
            Self::QuickSettings => "quickSettings",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown window id `{0}`")]
/// Returned when a token does not name any [`WindowId`].
pub struct ParseWindowIdError(pub String);

impl FromStr for WindowId {
    type Err = ParseWindowIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == raw)
            .ok_or_else(|| ParseWindowIdError(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
/// Lifecycle flags for one window.
///
/// `minimized` implies `open`. `auxiliary_input` selects sub-content for windows that accept
/// input (`Value::Null` when none was supplied).
pub struct WindowEntry {
    pub open: bool,
    pub minimized: bool,
    pub auxiliary_input: Value,
}

impl WindowEntry {
    /// Derives the three-state lifecycle position from the raw flags.
    pub fn state(&self) -> WindowState {
        match (self.open, self.minimized) {
            (false, _) => WindowState::Closed,
            (true, false) => WindowState::Active,
            (true, true) => WindowState::Minimized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowState {
    Closed,
    Active,
    Minimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Transition notifications consumed by sound, notification and animation collaborators.
pub enum LifecycleEvent {
    Opened,
    Closed,
    Minimized,
    Restored,
    /// A multiplexed window switched sub-content without leaving the Active state.
    InputChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One lifecycle change produced by the window controller.
pub struct WindowTransition {
    pub window_id: WindowId,
    pub event: LifecycleEvent,
}

impl WindowTransition {
    pub(crate) const fn new(window_id: WindowId, event: LifecycleEvent) -> Self {
        Self { window_id, event }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// User-visible shell notice (for example a blocked pop-up fallback).
pub struct ShellNotice {
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Everything the presentation layer needs to render one window.
pub struct WindowLayout {
    pub window_id: WindowId,
    pub state: WindowState,
    /// Active and not a transient link.
    pub visible: bool,
    pub geometry: ResolvedGeometry,
    /// `None` when dragging is disabled.
    pub drag: Option<DragBounds>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub window_id: WindowId,
    pub title: &'static str,
    pub minimized: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq)]
/// Whole shell state owned by the runtime and mutated only by [`crate::reduce_desktop`].
pub struct DesktopState {
    pub(crate) windows: WindowController,
    pub(crate) launchers: BTreeMap<WindowId, ExternalLinkLauncher>,
    pub(crate) viewport: Viewport,
    pub(crate) fullscreen: BTreeSet<WindowId>,
    pub(crate) notices: Vec<ShellNotice>,
    pub(crate) next_notice_id: u64,
    pub(crate) config: ShellConfig,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::from_validated(ShellConfig::default())
    }
}

impl DesktopState {
    /// Builds the initial state for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails [`ShellConfig::validate`].
    pub fn new(config: ShellConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: ShellConfig) -> Self {
        let launchers = apps::transient_launchers()
            .filter_map(|window_id| {
                config
                    .launcher_url(window_id)
                    .map(|url| (window_id, ExternalLinkLauncher::new(window_id, url)))
            })
            .collect();
        Self {
            windows: WindowController::default(),
            launchers,
            viewport: Viewport::default(),
            fullscreen: BTreeSet::new(),
            notices: Vec::new(),
            next_notice_id: 1,
            config,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn registry(&self) -> &WindowRegistry {
        self.windows.registry()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.viewport.breakpoint()
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn notices(&self) -> &[ShellNotice] {
        &self.notices
    }

    pub fn launcher(&self, window_id: WindowId) -> Option<&ExternalLinkLauncher> {
        self.launchers.get(&window_id)
    }

    pub fn is_fullscreen(&self, window_id: WindowId) -> bool {
        self.fullscreen.contains(&window_id)
    }

    pub fn foreground_window(&self) -> Option<WindowId> {
        self.registry().foreground()
    }

    /// Open non-transient windows in catalog order.
    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        let foreground = self.foreground_window();
        self.registry()
            .iter()
            .filter(|(window_id, entry)| entry.open && !apps::is_transient_launcher(*window_id))
            .map(|(window_id, entry)| TaskbarEntry {
                window_id,
                title: window_descriptor(window_id).title,
                minimized: entry.minimized,
                focused: foreground == Some(window_id),
            })
            .collect()
    }

    pub fn window_layout(&self, window_id: WindowId) -> WindowLayout {
        let state = self.registry().state(window_id);
        let breakpoint = self.breakpoint();
        WindowLayout {
            window_id,
            state,
            visible: state == WindowState::Active && !apps::is_transient_launcher(window_id),
            geometry: geometry::resolve(
                &window_descriptor(window_id).geometry,
                self.viewport,
                breakpoint,
                self.is_fullscreen(window_id),
            ),
            drag: drag_bounds::bounds(breakpoint, self.viewport),
        }
    }
}
