use desktop_runtime::{
    apps, reduce_desktop, DesktopAction, DesktopState, LifecycleEvent, RuntimeEffect, WindowId,
    WindowState,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};

fn dispatch(state: &mut DesktopState, action: DesktopAction) -> Vec<RuntimeEffect> {
    reduce_desktop(state, action).expect("reduce desktop action")
}

fn toggle(state: &mut DesktopState, window_id: WindowId, input: Value) -> Vec<RuntimeEffect> {
    dispatch(state, DesktopAction::ToggleWindow { window_id, input })
}

fn lifecycle_events(effects: &[RuntimeEffect]) -> Vec<(WindowId, LifecycleEvent)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            RuntimeEffect::Lifecycle { window_id, event } => Some((*window_id, *event)),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Toggle,
    Restore,
    Close,
}

fn steps() -> impl Strategy<Value = Vec<(Step, prop::sample::Index, usize)>> {
    let step = prop_oneof![
        2 => Just(Step::Toggle),
        1 => Just(Step::Restore),
        1 => Just(Step::Close),
    ];
    prop::collection::vec((step, any::<prop::sample::Index>(), 0usize..4), 1..200)
}

proptest! {
    #[test]
    fn at_most_one_regular_window_is_ever_in_the_foreground(sequence in steps()) {
        let regular: Vec<WindowId> = WindowId::ALL
            .into_iter()
            .filter(|window_id| !apps::is_transient_launcher(*window_id))
            .collect();
        let inputs = [Value::Null, json!("terminal"), json!("spotify"), json!(true)];
        let mut state = DesktopState::default();

        for (step, pick, input) in sequence {
            let window_id = regular[pick.index(regular.len())];
            match step {
                Step::Toggle => toggle(&mut state, window_id, inputs[input].clone()),
                Step::Restore => dispatch(&mut state, DesktopAction::RestoreWindow { window_id }),
                Step::Close => dispatch(&mut state, DesktopAction::CloseWindow { window_id }),
            };

            prop_assert!(state.registry().active_windows().count() <= 1);
            for (window_id, entry) in state.registry().iter() {
                prop_assert!(
                    entry.open || !entry.minimized,
                    "{} is minimized but not open",
                    window_id
                );
            }
        }
    }
}

#[test]
fn minimize_then_restore_returns_to_the_same_state() {
    let mut state = DesktopState::default();
    toggle(&mut state, WindowId::Explorer, json!("/projects"));
    let before = state.registry().clone();

    dispatch(
        &mut state,
        DesktopAction::MinimizeWindow {
            window_id: WindowId::Explorer,
        },
    );
    assert_eq!(
        state.registry().state(WindowId::Explorer),
        WindowState::Minimized
    );
    dispatch(
        &mut state,
        DesktopAction::RestoreWindow {
            window_id: WindowId::Explorer,
        },
    );

    assert_eq!(state.registry(), &before);
}

#[test]
fn restoring_a_window_that_is_not_minimized_changes_nothing() {
    let mut state = DesktopState::default();
    toggle(&mut state, WindowId::Notepad, Value::Null);
    let before = state.clone();

    let effects = dispatch(
        &mut state,
        DesktopAction::RestoreWindow {
            window_id: WindowId::Notepad,
        },
    );
    let closed = dispatch(
        &mut state,
        DesktopAction::RestoreWindow {
            window_id: WindowId::Videos,
        },
    );

    assert!(effects.is_empty());
    assert!(closed.is_empty());
    assert_eq!(state, before);
}

#[test]
fn app_window_switches_sub_content_without_closing() {
    let mut state = DesktopState::default();

    let opened = toggle(&mut state, WindowId::App, json!("terminal"));
    let switched = toggle(&mut state, WindowId::App, json!("spotify"));

    assert_eq!(
        lifecycle_events(&opened),
        vec![(WindowId::App, LifecycleEvent::Opened)]
    );
    assert_eq!(
        lifecycle_events(&switched),
        vec![(WindowId::App, LifecycleEvent::InputChanged)]
    );
    assert_eq!(state.registry().state(WindowId::App), WindowState::Active);
    assert_eq!(state.registry().auxiliary_input(WindowId::App), &json!("spotify"));
    assert_eq!(state.registry().active_windows().count(), 1);
}

#[test]
fn explorer_then_calculator_session() {
    let mut state = DesktopState::default();

    toggle(&mut state, WindowId::Explorer, json!(true));
    assert_eq!(state.registry().state(WindowId::Explorer), WindowState::Active);
    assert_eq!(state.registry().auxiliary_input(WindowId::Explorer), &json!(true));
    assert_eq!(
        state.registry().open_windows().collect::<Vec<_>>(),
        vec![WindowId::Explorer]
    );

    toggle(&mut state, WindowId::Calculator, Value::Null);
    assert_eq!(
        state.registry().state(WindowId::Calculator),
        WindowState::Active
    );
    assert_eq!(state.registry().state(WindowId::Explorer), WindowState::Closed);

    toggle(&mut state, WindowId::Calculator, Value::Null);
    assert_eq!(
        state.registry().state(WindowId::Calculator),
        WindowState::Minimized
    );

    dispatch(
        &mut state,
        DesktopAction::RestoreWindow {
            window_id: WindowId::Calculator,
        },
    );
    assert_eq!(
        state.registry().state(WindowId::Calculator),
        WindowState::Active
    );
    assert_eq!(state.foreground_window(), Some(WindowId::Calculator));
}

#[test]
fn start_menu_and_widgets_close_instead_of_minimizing() {
    let mut state = DesktopState::default();
    for window_id in [WindowId::Start, WindowId::Widgets, WindowId::QuickSettings] {
        toggle(&mut state, window_id, Value::Null);
        toggle(&mut state, window_id, Value::Null);
        assert_eq!(state.registry().state(window_id), WindowState::Closed);
    }
}

#[test]
fn transient_links_stay_out_of_layout_and_taskbar() {
    let mut state = DesktopState::default();
    toggle(&mut state, WindowId::Browser, Value::Null);
    toggle(&mut state, WindowId::Linkedin, Value::Null);

    assert!(state.registry().is_open(WindowId::Linkedin));
    assert!(!state.window_layout(WindowId::Linkedin).visible);
    assert!(state.window_layout(WindowId::Browser).visible);
    assert_eq!(state.foreground_window(), Some(WindowId::Browser));
    assert!(state
        .taskbar_entries()
        .iter()
        .all(|entry| entry.window_id != WindowId::Linkedin));
}
