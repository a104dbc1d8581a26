//! External-link launcher state machine for transient windows.
//!
//! `Idle -> Launching -> Cooldown -> Idle`. Every launch carries a generation number; timer fires
//! and launch results for any other generation are ignored, so a cancelled launch can never close
//! a later one.

use platform_host::ExternalOpenStatus;

use crate::model::WindowId;

/// Time a transient window stays open after its launch, long enough for the new tab to appear.
pub const DEFAULT_SELF_CLOSE_DELAY_MS: u32 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherPhase {
    Idle,
    /// The URL open was requested and its result has not been reported yet.
    Launching { generation: u64 },
    /// The launch settled; waiting for the self-close timer.
    Cooldown { generation: u64 },
}

impl LauncherPhase {
    pub const fn generation(self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Launching { generation } | Self::Cooldown { generation } => Some(generation),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Work requested by the launcher, executed by the reducer and host.
pub enum LauncherCommand {
    OpenUrl { url: String, generation: u64 },
    ScheduleSelfClose { generation: u64, delay_ms: u32 },
    CancelSelfClose { generation: u64 },
    /// The launch could not be confirmed; show the raw URL to the user.
    ReportBlocked { url: String, reason: Option<String> },
    /// Close the transient window now.
    SelfClose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLinkLauncher {
    window_id: WindowId,
    url: String,
    phase: LauncherPhase,
    next_generation: u64,
    /// Launch that self-closed before the host answered; its result is still reported.
    unanswered: Option<u64>,
}

impl ExternalLinkLauncher {
    pub fn new(window_id: WindowId, url: impl Into<String>) -> Self {
        Self {
            window_id,
            url: url.into(),
            phase: LauncherPhase::Idle,
            next_generation: 1,
            unanswered: None,
        }
    }

    pub fn window_id(&self) -> WindowId {
        self.window_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn phase(&self) -> LauncherPhase {
        self.phase
    }

    /// Reacts to the transient window's `open` flag changing.
    ///
    /// Opening while a launch is already in flight is ignored. Closing while in flight cancels
    /// the pending self-close.
    pub fn on_open_changed(&mut self, is_open: bool, delay_ms: u32) -> Vec<LauncherCommand> {
        match (is_open, self.phase.generation()) {
            (true, None) => {
                let generation = self.next_generation;
                self.next_generation = self.next_generation.wrapping_add(1);
                self.phase = LauncherPhase::Launching { generation };
                vec![
                    LauncherCommand::OpenUrl {
                        url: self.url.clone(),
                        generation,
                    },
                    LauncherCommand::ScheduleSelfClose {
                        generation,
                        delay_ms,
                    },
                ]
            }
            (false, Some(generation)) => {
                self.phase = LauncherPhase::Idle;
                vec![LauncherCommand::CancelSelfClose { generation }]
            }
            (true, Some(_)) | (false, None) => Vec::new(),
        }
    }

    /// Records the host's answer for a launch. Blocked or failed launches report the URL but
    /// never stop the self-close sequence.
    ///
    /// An answer for a launch that already self-closed is still reported, without touching the
    /// current phase.
    pub fn on_launch_finished(
        &mut self,
        generation: u64,
        result: &Result<ExternalOpenStatus, String>,
    ) -> Vec<LauncherCommand> {
        if self.phase == (LauncherPhase::Launching { generation }) {
            self.phase = LauncherPhase::Cooldown { generation };
        } else if self.unanswered == Some(generation) {
            self.unanswered = None;
        } else {
            return Vec::new();
        }
        match result {
            Ok(ExternalOpenStatus::Opened) => Vec::new(),
            Ok(ExternalOpenStatus::Blocked) => vec![LauncherCommand::ReportBlocked {
                url: self.url.clone(),
                reason: None,
            }],
            Err(err) => vec![LauncherCommand::ReportBlocked {
                url: self.url.clone(),
                reason: Some(err.clone()),
            }],
        }
    }

    /// Handles the self-close timer. Fires for stale generations are dropped.
    pub fn on_self_close_elapsed(&mut self, generation: u64) -> Vec<LauncherCommand> {
        if self.phase.generation() != Some(generation) {
            return Vec::new();
        }
        if self.phase == (LauncherPhase::Launching { generation }) {
            self.unanswered = Some(generation);
        }
        self.phase = LauncherPhase::Idle;
        vec![LauncherCommand::SelfClose]
    }

    /// Cancels any in-flight launch during teardown.
    pub fn teardown(&mut self) -> Vec<LauncherCommand> {
        self.unanswered = None;
        match self.phase.generation() {
            Some(generation) => {
                self.phase = LauncherPhase::Idle;
                vec![LauncherCommand::CancelSelfClose { generation }]
            }
            None => Vec::new(),
        }
    }
}
