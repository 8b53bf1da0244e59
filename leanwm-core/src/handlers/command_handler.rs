use std::time::Instant;

use crate::child_process::{exec_shell, Children};
use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::models::{Handle, Manager};
use crate::state::State;
use crate::Command;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Processes a command and invokes the associated function.
    pub fn command_handler(&mut self, command: &Command) -> bool {
        tracing::debug!(?command, "Running command");
        process_internal(self, command).unwrap_or(false)
    }
}

fn process_internal<H: Handle, C: Config, SERVER: DisplayServer<H>>(
    manager: &mut Manager<H, C, SERVER>,
    command: &Command,
) -> Option<bool> {
    let state = &mut manager.state;
    match command {
        Command::Execute(shell_command) => execute(&mut manager.children, shell_command),

        Command::CloseWindow => close_window(state),

        Command::FocusWindowNext => Some(state.focus_relative(1)),
        Command::FocusWindowPrevious => Some(state.focus_relative(-1)),
        Command::SwapWindowNext => swap_window(state, 1),
        Command::SwapWindowPrevious => swap_window(state, -1),

        Command::SendToWorkspace(number) => send_to_workspace(state, *number),
        Command::GoToWorkspace(number) => Some(state.goto_workspace(number.checked_sub(1)?)),

        Command::IncreaseWeight => change_weight(state, 1.0),
        Command::DecreaseWeight => change_weight(state, -1.0),
        Command::IncreaseGap => change_gap(state, true),
        Command::DecreaseGap => change_gap(state, false),

        Command::ToggleFullscreen => toggle_fullscreen(state),
        Command::CycleLayout => cycle_layout(state),
    }
}

fn execute(children: &mut Children, shell_command: &str) -> Option<bool> {
    if exec_shell(shell_command, children).is_none() {
        tracing::warn!(command = shell_command, "Could not spawn command");
    }
    None
}

fn close_window<H: Handle>(state: &mut State<H>) -> Option<bool> {
    let handle = state.focused_window()?;
    Some(state.close_window(&handle, Instant::now()))
}

fn send_to_workspace<H: Handle>(state: &mut State<H>, number: usize) -> Option<bool> {
    let handle = state.focused_window()?;
    Some(state.move_window_to_workspace(&handle, number.checked_sub(1)?))
}

/// Swaps the focused client with its neighbour, wrapping around. Focus stays with the
/// client, so it moves along.
fn swap_window<H: Handle>(state: &mut State<H>, offset: isize) -> Option<bool> {
    let id = state.current_workspace;
    if state.registry.fullscreen_on(id).is_some() {
        return Some(false);
    }
    let workspace = state.registry.workspace(id)?;
    let index = workspace.focused_index()?;
    let other = workspace.relative_index(index, offset)?;
    if !state.registry.swap(id, index, other) {
        return Some(false);
    }
    Some(state.reflow(id))
}

fn toggle_fullscreen<H: Handle>(state: &mut State<H>) -> Option<bool> {
    let handle = state.focused_window()?;
    let on = !state.registry.is_fullscreen(&handle);
    Some(state.set_fullscreen(&handle, on))
}

fn cycle_layout<H: Handle>(state: &mut State<H>) -> Option<bool> {
    let id = state.current_workspace;
    let layout = state.registry.cycle_layout(id)?;
    tracing::debug!(?layout, workspace = id, "Layout changed");
    state.reflow(id);
    Some(true)
}

fn change_weight<H: Handle>(state: &mut State<H>, direction: f32) -> Option<bool> {
    let handle = state.focused_window()?;
    let step = state.settings.weight_step;
    let (min, max) = (state.settings.min_weight, state.settings.max_weight);
    let client = state.registry.get_mut(&handle)?;
    let before = client.weight;
    client.adjust_weight(direction * step, min, max);
    if (client.weight - before).abs() < f32::EPSILON {
        return Some(false);
    }
    Some(state.reflow(state.current_workspace))
}

fn change_gap<H: Handle>(state: &mut State<H>, increase: bool) -> Option<bool> {
    let step = state.settings.gap_step;
    let gap = if increase {
        state.gap.saturating_add(step).min(max_gap(state).max(state.gap))
    } else {
        state.gap.saturating_sub(step)
    };
    if gap == state.gap {
        return Some(false);
    }
    state.gap = gap;
    Some(state.reflow(state.current_workspace))
}

/// The largest gap that still leaves a single client one pixel in each direction.
fn max_gap<H: Handle>(state: &State<H>) -> u32 {
    let area = state.screen.usable_area();
    let side = area.w.min(area.h);
    u32::try_from((side - 1) / 2).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Keybind, TestConfig};
    use crate::display_action::DisplayAction;
    use crate::handlers::tests::manager_with;
    use crate::layouts::Layout;
    use crate::models::{WindowHandle, Xyhw};
    use crate::{DisplayEvent, StateChange};

    fn widths(manager: &crate::models::TestManager) -> Vec<i32> {
        manager
            .state
            .registry
            .clients_on(0)
            .map(|c| c.geometry.w)
            .collect()
    }

    #[test]
    fn weight_changes_resize_the_focused_client() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        assert!(manager.command_handler(&Command::IncreaseWeight));
        assert!(manager.command_handler(&Command::IncreaseWeight));
        assert!(manager.command_handler(&Command::IncreaseWeight));
        assert!(manager.command_handler(&Command::IncreaseWeight));
        // Weights 1.0 and 2.0.
        assert_eq!(widths(&manager), vec![333, 667]);
    }

    #[test]
    fn weight_never_drops_below_the_minimum() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        for _ in 0..3 {
            assert!(manager.command_handler(&Command::DecreaseWeight));
        }
        assert!(!manager.command_handler(&Command::DecreaseWeight));
        let weight = manager.state.registry.get(&WindowHandle(2)).unwrap().weight;
        assert!((weight - 0.25).abs() < f32::EPSILON);
        assert_eq!(widths(&manager), vec![800, 200]);
    }

    #[test]
    fn endless_weight_increases_stop_at_the_cap() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        for _ in 0..8000 {
            manager.command_handler(&Command::IncreaseWeight);
        }
        assert!(!manager.command_handler(&Command::IncreaseWeight));
        let weight = manager.state.registry.get(&WindowHandle(2)).unwrap().weight;
        assert!((weight - 4.0).abs() < f32::EPSILON);
        // Weights 1.0 and 4.0.
        assert_eq!(widths(&manager), vec![200, 800]);
        let slots: Vec<_> = manager
            .state
            .registry
            .clients_on(0)
            .map(|c| c.geometry)
            .collect();
        assert!(!slots[0].overlaps(&slots[1]));
    }

    #[test]
    fn weight_changes_leave_other_workspaces_alone() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        manager.command_handler(&Command::SendToWorkspace(2));
        manager.state.actions.clear();
        manager.command_handler(&Command::IncreaseWeight);
        assert!(manager.state.actions.iter().all(|act| !matches!(
            act,
            DisplayAction::ConfigureWindow { window, .. } if *window == WindowHandle(2)
        )));
    }

    #[test]
    fn gap_grows_and_shrinks_in_steps() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        assert!(manager.command_handler(&Command::IncreaseGap));
        assert_eq!(manager.state.gap, 2);
        assert_eq!(widths(&manager), vec![499, 499]);
        assert!(manager.command_handler(&Command::DecreaseGap));
        assert!(!manager.command_handler(&Command::DecreaseGap));
        assert_eq!(manager.state.gap, 0);
    }

    #[test]
    fn gap_is_capped_by_the_screen() {
        let mut manager = manager_with(&[1], TestConfig::default());
        manager.display_event_handler(DisplayEvent::ScreenCreate(Xyhw::new(0, 0, 9, 9)));
        for _ in 0..10 {
            manager.command_handler(&Command::IncreaseGap);
        }
        assert_eq!(manager.state.gap, 4);
    }

    #[test]
    fn swap_moves_the_focused_client_and_keeps_focus() {
        let mut manager = manager_with(&[1, 2, 3], TestConfig::default());
        assert!(manager.command_handler(&Command::SwapWindowPrevious));
        let order: Vec<_> = manager
            .state
            .registry
            .clients_on(0)
            .map(|c| c.handle)
            .collect();
        assert_eq!(order, vec![WindowHandle(1), WindowHandle(3), WindowHandle(2)]);
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(3)));
        assert_eq!(
            manager.state.registry.get(&WindowHandle(3)).unwrap().geometry.x,
            333
        );
    }

    #[test]
    fn swap_next_wraps_to_the_front() {
        let mut manager = manager_with(&[1, 2, 3], TestConfig::default());
        assert!(manager.command_handler(&Command::SwapWindowNext));
        let order: Vec<_> = manager
            .state
            .registry
            .clients_on(0)
            .map(|c| c.handle)
            .collect();
        assert_eq!(order, vec![WindowHandle(3), WindowHandle(2), WindowHandle(1)]);
    }

    #[test]
    fn fullscreen_toggles_on_and_off() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        assert!(manager.command_handler(&Command::ToggleFullscreen));
        let actions: Vec<_> = manager.state.actions.drain(..).collect();
        assert!(actions.contains(&DisplayAction::SetFullscreen(WindowHandle(2), true)));
        assert!(actions.contains(&DisplayAction::ConfigureWindow {
            window: WindowHandle(2),
            xyhw: Xyhw::new(0, 0, 1000, 700),
            border: 0,
        }));
        assert!(actions.contains(&DisplayAction::RaiseWindow(WindowHandle(2))));
        assert!(!manager.command_handler(&Command::SwapWindowNext));

        assert!(manager.command_handler(&Command::ToggleFullscreen));
        let actions: Vec<_> = manager.state.actions.drain(..).collect();
        assert!(actions.contains(&DisplayAction::SetFullscreen(WindowHandle(2), false)));
        assert!(actions.contains(&DisplayAction::ConfigureWindow {
            window: WindowHandle(2),
            xyhw: Xyhw::new(500, 0, 500, 700),
            border: 0,
        }));
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(2)));
    }

    #[test]
    fn fullscreen_requests_from_clients_follow_the_action() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        let request = |change| DisplayEvent::FullscreenRequest(WindowHandle(1), change);
        manager.display_event_handler(request(StateChange::Add));
        assert_eq!(manager.state.registry.fullscreen_on(0), Some(WindowHandle(1)));
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(1)));
        assert!(!manager.display_event_handler(request(StateChange::Add)));
        manager.display_event_handler(request(StateChange::Toggle));
        assert_eq!(manager.state.registry.fullscreen_on(0), None);
        manager.display_event_handler(request(StateChange::Toggle));
        manager.display_event_handler(request(StateChange::Remove));
        assert_eq!(manager.state.registry.fullscreen_on(0), None);
    }

    #[test]
    fn destroying_the_fullscreen_window_restores_tiling() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        manager.command_handler(&Command::ToggleFullscreen);
        manager.display_event_handler(DisplayEvent::WindowDestroy(WindowHandle(2)));
        assert_eq!(manager.state.registry.fullscreen_on(0), None);
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(1)));
        assert_eq!(widths(&manager), vec![1000]);
    }

    #[test]
    fn cycle_layout_relays_the_visible_workspace() {
        let mut manager = manager_with(&[1, 2, 3], TestConfig::default());
        assert!(manager.command_handler(&Command::CycleLayout));
        let geometry: Vec<_> = manager
            .state
            .registry
            .clients_on(0)
            .map(|c| c.geometry)
            .collect();
        assert_eq!(
            geometry,
            vec![
                Xyhw::new(0, 0, 500, 700),
                Xyhw::new(500, 0, 500, 350),
                Xyhw::new(500, 350, 500, 350),
            ]
        );
        assert!(manager.command_handler(&Command::CycleLayout));
        assert!(manager.command_handler(&Command::CycleLayout));
        assert_eq!(widths(&manager), vec![333, 333, 334]);
        assert_eq!(manager.state.registry.workspace(1).unwrap().layout, Layout::Horizontal);
    }

    #[test]
    fn commands_without_a_focused_window_do_nothing() {
        let mut manager = manager_with(&[], TestConfig::default());
        for command in [
            Command::CloseWindow,
            Command::FocusWindowNext,
            Command::SwapWindowNext,
            Command::SendToWorkspace(2),
            Command::IncreaseWeight,
            Command::ToggleFullscreen,
        ] {
            assert!(!manager.command_handler(&command));
        }
        assert!(manager.state.actions.is_empty());
    }

    #[test]
    fn key_chords_dispatch_through_the_binding_table() {
        let config = TestConfig {
            keybinds: vec![Keybind {
                command: Command::GoToWorkspace(2),
                modifier: vec!["Mod4".to_owned()],
                key: "2".to_owned(),
            }],
            ..TestConfig::default()
        };
        let mut manager = manager_with(&[1], config);
        manager.display_event_handler(DisplayEvent::KeyCombo(
            crate::utils::modmask_lookup::ModMask::Super,
            0x0032,
        ));
        assert_eq!(manager.state.current_workspace, 1);

        manager.display_event_handler(DisplayEvent::KeyCombo(
            crate::utils::modmask_lookup::ModMask::Alt,
            0x0031,
        ));
        assert_eq!(manager.state.current_workspace, 1);
    }
}
