use leanwm_core::models::DockEdge;

use super::{default_terminal, BaseCommand, Config, Keybind};

const WORKSPACES_NUM: usize = 9;

fn bind(command: BaseCommand, value: &str, modifier: &[&str], key: &str) -> Keybind {
    Keybind {
        command,
        value: value.to_owned(),
        modifier: Some(
            modifier
                .iter()
                .map(|m| (*m).to_owned())
                .collect::<Vec<_>>()
                .into(),
        ),
        key: key.to_owned(),
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut commands = vec![
            // Mod + Return => Open a terminal
            bind(BaseCommand::Execute, default_terminal(), &["modkey"], "Return"),
            // Mod + p => Open dmenu
            bind(BaseCommand::Execute, "dmenu_run", &["modkey"], "p"),
            // Mod + Shift + q => close focused window
            bind(BaseCommand::CloseWindow, "", &["modkey", "Shift"], "q"),
            // Mod + j / k => cycle focus
            bind(BaseCommand::FocusWindowNext, "", &["modkey"], "j"),
            bind(BaseCommand::FocusWindowPrevious, "", &["modkey"], "k"),
            // Mod + Shift + j / k => move the focused window along the row
            bind(BaseCommand::SwapWindowNext, "", &["modkey", "Shift"], "j"),
            bind(BaseCommand::SwapWindowPrevious, "", &["modkey", "Shift"], "k"),
            // Mod + l / h => widen or narrow the focused window
            bind(BaseCommand::IncreaseWeight, "", &["modkey"], "l"),
            bind(BaseCommand::DecreaseWeight, "", &["modkey"], "h"),
            // Mod + equal / minus => grow or shrink the gaps
            bind(BaseCommand::IncreaseGap, "", &["modkey"], "equal"),
            bind(BaseCommand::DecreaseGap, "", &["modkey"], "minus"),
            // Mod + f => fullscreen the focused window
            bind(BaseCommand::ToggleFullscreen, "", &["modkey"], "f"),
            // Mod + space => next layout
            bind(BaseCommand::CycleLayout, "", &["modkey"], "space"),
        ];

        // add "goto workspace"
        for i in 1..=WORKSPACES_NUM {
            commands.push(bind(
                BaseCommand::GoToWorkspace,
                &i.to_string(),
                &["modkey"],
                &i.to_string(),
            ));
        }

        // and "send to workspace"
        for i in 1..=WORKSPACES_NUM {
            commands.push(bind(
                BaseCommand::SendToWorkspace,
                &i.to_string(),
                &["modkey", "Shift"],
                &i.to_string(),
            ));
        }

        Self {
            modkey: "Mod4".to_owned(),
            workspaces: WORKSPACES_NUM,
            workspace_names: None,
            gap: 4,
            gap_step: 2,
            outer_gaps: true,
            border_width: 1,
            focused_border_color: "#ff0000".to_owned(),
            normal_border_color: "#222222".to_owned(),
            dock_height: 24,
            dock_edge: DockEdge::Top,
            weight_step: 0.25,
            min_weight: 0.25,
            max_weight: 8.0,
            close_timeout_ms: 2000,
            focus_follows_pointer: true,
            autostart: None,
            keybind: commands,
        }
    }
}
