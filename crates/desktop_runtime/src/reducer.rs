//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use platform_host::ExternalOpenStatus;
use serde_json::Value;
use thiserror::Error;

use crate::{
    launcher::LauncherCommand,
    model::{
        DesktopState, LifecycleEvent, ParseWindowIdError, ShellNotice, WindowId, WindowTransition,
    },
    viewport::Viewport,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Icon, taskbar or start-menu activation of a window.
    ToggleWindow {
        window_id: WindowId,
        /// Sub-content selector. Ignored by windows that do not accept input.
        input: Value,
    },
    /// Same as [`DesktopAction::ToggleWindow`] for ids arriving as markup tokens.
    ToggleNamedWindow { window: String, input: Value },
    MinimizeWindow { window_id: WindowId },
    RestoreWindow { window_id: WindowId },
    CloseWindow { window_id: WindowId },
    /// Force a window to fill the viewport regardless of breakpoint.
    SetFullscreen { window_id: WindowId, enabled: bool },
    /// The host viewport was resized or rotated.
    ViewportChanged { width: i32, height: i32 },
    /// The host answered a launcher's URL open request.
    ExternalLaunchFinished {
        window_id: WindowId,
        generation: u64,
        result: Result<ExternalOpenStatus, String>,
    },
    /// A launcher self-close timer fired.
    SelfCloseElapsed { window_id: WindowId, generation: u64 },
    DismissNotice { notice_id: u64 },
    /// The shell is unmounting; cancel all pending launcher work.
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the host runtime to execute.
pub enum RuntimeEffect {
    /// Notify lifecycle observers (sounds, animations, notification chimes).
    Lifecycle {
        window_id: WindowId,
        event: LifecycleEvent,
    },
    OpenExternalUrl {
        window_id: WindowId,
        url: String,
        generation: u64,
    },
    ScheduleSelfClose {
        window_id: WindowId,
        generation: u64,
        delay_ms: u32,
    },
    CancelSelfClose { window_id: WindowId, generation: u64 },
    Notify { title: String, body: String },
    ScheduleNoticeDismiss { notice_id: u64, delay_ms: u32 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that reference windows incorrectly.
pub enum ReducerError {
    #[error(transparent)]
    UnknownWindow(#[from] ParseWindowIdError),
    /// Launcher-only actions were sent for a window that is not a transient link.
    #[error("window `{0}` has no external link launcher")]
    NotTransient(WindowId),
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when the action names an unknown window token or sends launcher
/// results to a window without a launcher. The state is left untouched in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::ToggleWindow { window_id, input } => {
            let transitions = state.windows.toggle(window_id, input);
            apply_transitions(state, transitions, &mut effects);
        }
        DesktopAction::ToggleNamedWindow { window, input } => {
            let window_id = window.parse::<WindowId>()?;
            let transitions = state.windows.toggle(window_id, input);
            apply_transitions(state, transitions, &mut effects);
        }
        DesktopAction::MinimizeWindow { window_id } => {
            let transitions = state.windows.minimize(window_id);
            apply_transitions(state, transitions, &mut effects);
        }
        DesktopAction::RestoreWindow { window_id } => {
            let transitions = state.windows.restore(window_id);
            apply_transitions(state, transitions, &mut effects);
        }
        DesktopAction::CloseWindow { window_id } => {
            let transitions = state.windows.close(window_id);
            apply_transitions(state, transitions, &mut effects);
        }
        DesktopAction::SetFullscreen { window_id, enabled } => {
            if enabled && state.registry().is_open(window_id) {
                state.fullscreen.insert(window_id);
            } else {
                state.fullscreen.remove(&window_id);
            }
        }
        DesktopAction::ViewportChanged { width, height } => {
            state.viewport = Viewport::new(width.max(0), height.max(0));
        }
        DesktopAction::ExternalLaunchFinished {
            window_id,
            generation,
            result,
        } => {
            let commands = state
                .launchers
                .get_mut(&window_id)
                .ok_or(ReducerError::NotTransient(window_id))?
                .on_launch_finished(generation, &result);
            run_launcher_commands(state, window_id, commands, &mut effects);
        }
        DesktopAction::SelfCloseElapsed {
            window_id,
            generation,
        } => {
            let commands = state
                .launchers
                .get_mut(&window_id)
                .ok_or(ReducerError::NotTransient(window_id))?
                .on_self_close_elapsed(generation);
            run_launcher_commands(state, window_id, commands, &mut effects);
        }
        DesktopAction::DismissNotice { notice_id } => {
            state.notices.retain(|notice| notice.id != notice_id);
        }
        DesktopAction::Teardown => {
            let window_ids: Vec<WindowId> = state.launchers.keys().copied().collect();
            for window_id in window_ids {
                if let Some(launcher) = state.launchers.get_mut(&window_id) {
                    let commands = launcher.teardown();
                    run_launcher_commands(state, window_id, commands, &mut effects);
                }
            }
        }
    }

    Ok(effects)
}

fn apply_transitions(
    state: &mut DesktopState,
    transitions: Vec<WindowTransition>,
    effects: &mut Vec<RuntimeEffect>,
) {
    for WindowTransition { window_id, event } in transitions {
        effects.push(RuntimeEffect::Lifecycle { window_id, event });
        if event == LifecycleEvent::Closed {
            state.fullscreen.remove(&window_id);
        }

        let is_open = match event {
            LifecycleEvent::Opened => true,
            LifecycleEvent::Closed => false,
            _ => continue,
        };
        let delay_ms = state.config.self_close_delay_ms;
        if let Some(launcher) = state.launchers.get_mut(&window_id) {
            let commands = launcher.on_open_changed(is_open, delay_ms);
            run_launcher_commands(state, window_id, commands, effects);
        }
    }
}

fn run_launcher_commands(
    state: &mut DesktopState,
    window_id: WindowId,
    commands: Vec<LauncherCommand>,
    effects: &mut Vec<RuntimeEffect>,
) {
    for command in commands {
        match command {
            LauncherCommand::OpenUrl { url, generation } => {
                effects.push(RuntimeEffect::OpenExternalUrl {
                    window_id,
                    url,
                    generation,
                });
            }
            LauncherCommand::ScheduleSelfClose {
                generation,
                delay_ms,
            } => effects.push(RuntimeEffect::ScheduleSelfClose {
                window_id,
                generation,
                delay_ms,
            }),
            LauncherCommand::CancelSelfClose { generation } => {
                effects.push(RuntimeEffect::CancelSelfClose {
                    window_id,
                    generation,
                });
            }
            LauncherCommand::ReportBlocked { url, reason } => {
                let body = match reason {
                    Some(reason) => {
                        format!("Could not open a new tab ({reason}). Visit {url} directly.")
                    }
                    None => format!("Your browser blocked the new tab. Visit {url} directly."),
                };
                let title = state.config.popup_blocked_title.clone();
                push_notice(state, title, body, effects);
            }
            LauncherCommand::SelfClose => {
                let transitions = state.windows.close(window_id);
                apply_transitions(state, transitions, effects);
            }
        }
    }
}

fn push_notice(
    state: &mut DesktopState,
    title: String,
    body: String,
    effects: &mut Vec<RuntimeEffect>,
) {
    let notice_id = state.next_notice_id;
    state.next_notice_id += 1;
    state.notices.push(ShellNotice {
        id: notice_id,
        title: title.clone(),
        body: body.clone(),
    });
    effects.push(RuntimeEffect::Notify { title, body });
    if state.config.notice_dismiss_ms > 0 {
        effects.push(RuntimeEffect::ScheduleNoticeDismiss {
            notice_id,
            delay_ms: state.config.notice_dismiss_ms,
        });
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{
        config::ShellConfig,
        launcher::LauncherPhase,
        model::WindowState,
        viewport::Breakpoint,
    };

    fn toggle(state: &mut DesktopState, window_id: WindowId, input: Value) -> Vec<RuntimeEffect> {
        reduce_desktop(state, DesktopAction::ToggleWindow { window_id, input })
            .expect("toggle window")
    }

    fn lifecycle(window_id: WindowId, event: LifecycleEvent) -> RuntimeEffect {
        RuntimeEffect::Lifecycle { window_id, event }
    }

    #[test]
    fn explorer_calculator_walkthrough() {
        let mut state = DesktopState::default();

        toggle(&mut state, WindowId::Explorer, json!(true));
        assert_eq!(state.registry().state(WindowId::Explorer), WindowState::Active);
        assert_eq!(state.registry().auxiliary_input(WindowId::Explorer), &json!(true));
        assert_eq!(state.registry().open_windows().count(), 1);

        let effects = toggle(&mut state, WindowId::Calculator, Value::Null);
        assert_eq!(
            effects,
            vec![
                lifecycle(WindowId::Explorer, LifecycleEvent::Closed),
                lifecycle(WindowId::Calculator, LifecycleEvent::Opened),
            ]
        );
        assert_eq!(state.registry().state(WindowId::Explorer), WindowState::Closed);

        toggle(&mut state, WindowId::Calculator, Value::Null);
        assert_eq!(
            state.registry().state(WindowId::Calculator),
            WindowState::Minimized
        );

        let effects = reduce_desktop(
            &mut state,
            DesktopAction::RestoreWindow {
                window_id: WindowId::Calculator,
            },
        )
        .unwrap();
        assert_eq!(
            effects,
            vec![lifecycle(WindowId::Calculator, LifecycleEvent::Restored)]
        );
        assert_eq!(state.foreground_window(), Some(WindowId::Calculator));
    }

    #[test]
    fn unknown_window_tokens_are_rejected_without_mutation() {
        let mut state = DesktopState::default();
        let before = state.clone();

        let err = reduce_desktop(
            &mut state,
            DesktopAction::ToggleNamedWindow {
                window: "solitaire".to_string(),
                input: Value::Null,
            },
        )
        .unwrap_err();

        assert_eq!(
            err,
            ReducerError::UnknownWindow(ParseWindowIdError("solitaire".to_string()))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn named_toggle_matches_typed_toggle() {
        let mut state = DesktopState::default();
        reduce_desktop(
            &mut state,
            DesktopAction::ToggleNamedWindow {
                window: "quickSettings".to_string(),
                input: Value::Null,
            },
        )
        .unwrap();
        assert_eq!(state.foreground_window(), Some(WindowId::QuickSettings));
    }

    #[test]
    fn opening_a_transient_link_starts_a_launch() {
        let mut state = DesktopState::default();

        let effects = toggle(&mut state, WindowId::Linkedin, Value::Null);

        assert_eq!(
            effects,
            vec![
                lifecycle(WindowId::Linkedin, LifecycleEvent::Opened),
                RuntimeEffect::OpenExternalUrl {
                    window_id: WindowId::Linkedin,
                    url: "https://www.linkedin.com/".to_string(),
                    generation: 1,
                },
                RuntimeEffect::ScheduleSelfClose {
                    window_id: WindowId::Linkedin,
                    generation: 1,
                    delay_ms: 800,
                },
            ]
        );
        assert!(!state.window_layout(WindowId::Linkedin).visible);
    }

    #[test]
    fn self_close_timer_closes_the_transient_window_once() {
        let mut state = DesktopState::default();
        toggle(&mut state, WindowId::Github, Value::Null);

        let effects = reduce_desktop(
            &mut state,
            DesktopAction::SelfCloseElapsed {
                window_id: WindowId::Github,
                generation: 1,
            },
        )
        .unwrap();
        assert_eq!(
            effects,
            vec![lifecycle(WindowId::Github, LifecycleEvent::Closed)]
        );
        assert!(!state.registry().is_open(WindowId::Github));

        let repeat = reduce_desktop(
            &mut state,
            DesktopAction::SelfCloseElapsed {
                window_id: WindowId::Github,
                generation: 1,
            },
        )
        .unwrap();
        assert!(repeat.is_empty());
    }

    #[test]
    fn closing_before_the_delay_cancels_the_self_close() {
        let mut state = DesktopState::default();
        toggle(&mut state, WindowId::Github, Value::Null);

        let effects = toggle(&mut state, WindowId::Github, Value::Null);
        assert_eq!(
            effects,
            vec![
                lifecycle(WindowId::Github, LifecycleEvent::Closed),
                RuntimeEffect::CancelSelfClose {
                    window_id: WindowId::Github,
                    generation: 1,
                },
            ]
        );

        toggle(&mut state, WindowId::Github, Value::Null);
        let stale = reduce_desktop(
            &mut state,
            DesktopAction::SelfCloseElapsed {
                window_id: WindowId::Github,
                generation: 1,
            },
        )
        .unwrap();
        assert!(stale.is_empty());
        assert!(state.registry().is_open(WindowId::Github));
    }

    #[test]
    fn blocked_launch_posts_a_notice_with_the_url() {
        let mut state = DesktopState::default();
        toggle(&mut state, WindowId::Linkedin, Value::Null);

        let effects = reduce_desktop(
            &mut state,
            DesktopAction::ExternalLaunchFinished {
                window_id: WindowId::Linkedin,
                generation: 1,
                result: Ok(ExternalOpenStatus::Blocked),
            },
        )
        .unwrap();

        let body = "Your browser blocked the new tab. Visit https://www.linkedin.com/ directly.";
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::Notify {
                    title: "Pop-up blocked".to_string(),
                    body: body.to_string(),
                },
                RuntimeEffect::ScheduleNoticeDismiss {
                    notice_id: 1,
                    delay_ms: 6_000,
                },
            ]
        );
        assert_eq!(state.notices().len(), 1);
        assert_eq!(
            state.launcher(WindowId::Linkedin).map(|launcher| launcher.phase()),
            Some(LauncherPhase::Cooldown { generation: 1 })
        );

        reduce_desktop(&mut state, DesktopAction::DismissNotice { notice_id: 1 }).unwrap();
        assert!(state.notices().is_empty());
    }

    #[test]
    fn successful_launch_is_silent() {
        let mut state = DesktopState::default();
        toggle(&mut state, WindowId::Linkedin, Value::Null);
        let effects = reduce_desktop(
            &mut state,
            DesktopAction::ExternalLaunchFinished {
                window_id: WindowId::Linkedin,
                generation: 1,
                result: Ok(ExternalOpenStatus::Opened),
            },
        )
        .unwrap();
        assert!(effects.is_empty());
        assert!(state.notices().is_empty());
    }

    #[test]
    fn blocked_result_arriving_after_self_close_still_posts_a_notice() {
        let mut state = DesktopState::default();
        toggle(&mut state, WindowId::Github, Value::Null);
        reduce_desktop(
            &mut state,
            DesktopAction::SelfCloseElapsed {
                window_id: WindowId::Github,
                generation: 1,
            },
        )
        .unwrap();

        reduce_desktop(
            &mut state,
            DesktopAction::ExternalLaunchFinished {
                window_id: WindowId::Github,
                generation: 1,
                result: Ok(ExternalOpenStatus::Blocked),
            },
        )
        .unwrap();

        assert!(!state.registry().is_open(WindowId::Github));
        assert_eq!(state.notices().len(), 1);
        assert!(state.notices()[0].body.contains("https://github.com/"));
    }

    #[test]
    fn launcher_actions_for_regular_windows_are_errors() {
        let mut state = DesktopState::default();
        let err = reduce_desktop(
            &mut state,
            DesktopAction::SelfCloseElapsed {
                window_id: WindowId::Notepad,
                generation: 1,
            },
        )
        .unwrap_err();
        assert_eq!(err, ReducerError::NotTransient(WindowId::Notepad));
    }

    #[test]
    fn teardown_cancels_in_flight_launches_only() {
        let mut state = DesktopState::default();
        toggle(&mut state, WindowId::Github, Value::Null);

        let effects = reduce_desktop(&mut state, DesktopAction::Teardown).unwrap();

        assert_eq!(
            effects,
            vec![RuntimeEffect::CancelSelfClose {
                window_id: WindowId::Github,
                generation: 1,
            }]
        );
        assert!(reduce_desktop(&mut state, DesktopAction::Teardown)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn configured_delay_and_urls_reach_the_launch_effects() {
        let config = ShellConfig::from_json(
            r#"{ "self_close_delay_ms": 300, "launcher_urls": { "github": "https://github.com/me" } }"#,
        )
        .unwrap();
        let mut state = DesktopState::new(config).expect("valid config");

        let effects = toggle(&mut state, WindowId::Github, Value::Null);

        assert!(effects.contains(&RuntimeEffect::OpenExternalUrl {
            window_id: WindowId::Github,
            url: "https://github.com/me".to_string(),
            generation: 1,
        }));
        assert!(effects.contains(&RuntimeEffect::ScheduleSelfClose {
            window_id: WindowId::Github,
            generation: 1,
            delay_ms: 300,
        }));
    }

    #[test]
    fn viewport_changes_reclassify_layout() {
        let mut state = DesktopState::default();
        toggle(&mut state, WindowId::Explorer, Value::Null);

        reduce_desktop(
            &mut state,
            DesktopAction::ViewportChanged {
                width: 1600,
                height: 900,
            },
        )
        .unwrap();
        let layout = state.window_layout(WindowId::Explorer);
        assert_eq!(state.breakpoint(), Breakpoint::LargeDesktop);
        assert_eq!((layout.geometry.width, layout.geometry.height), (900, 600));
        assert!(layout.drag.is_some());

        reduce_desktop(
            &mut state,
            DesktopAction::ViewportChanged {
                width: 390,
                height: 844,
            },
        )
        .unwrap();
        let layout = state.window_layout(WindowId::Explorer);
        assert!(layout.geometry.full_viewport);
        assert_eq!((layout.geometry.width, layout.geometry.height), (390, 844));
        assert_eq!(layout.drag, None);
    }

    #[test]
    fn fullscreen_applies_to_open_windows_and_clears_on_close() {
        let mut state = DesktopState::default();
        reduce_desktop(
            &mut state,
            DesktopAction::SetFullscreen {
                window_id: WindowId::Notepad,
                enabled: true,
            },
        )
        .unwrap();
        assert!(!state.is_fullscreen(WindowId::Notepad));

        toggle(&mut state, WindowId::Notepad, Value::Null);
        reduce_desktop(
            &mut state,
            DesktopAction::SetFullscreen {
                window_id: WindowId::Notepad,
                enabled: true,
            },
        )
        .unwrap();
        assert!(state.window_layout(WindowId::Notepad).geometry.full_viewport);

        reduce_desktop(
            &mut state,
            DesktopAction::CloseWindow {
                window_id: WindowId::Notepad,
            },
        )
        .unwrap();
        assert!(!state.is_fullscreen(WindowId::Notepad));
    }

    #[test]
    fn taskbar_lists_open_regular_windows_with_focus() {
        let mut state = DesktopState::default();
        toggle(&mut state, WindowId::Calculator, Value::Null);
        toggle(&mut state, WindowId::Calculator, Value::Null);
        toggle(&mut state, WindowId::Notepad, Value::Null);
        toggle(&mut state, WindowId::Github, Value::Null);

        let entries = state.taskbar_entries();

        assert_eq!(
            entries
                .iter()
                .map(|entry| (entry.window_id, entry.minimized, entry.focused))
                .collect::<Vec<_>>(),
            vec![
                (WindowId::Calculator, true, false),
                (WindowId::Notepad, false, true),
            ]
        );
    }
}
