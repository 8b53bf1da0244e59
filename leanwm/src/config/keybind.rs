use super::BaseCommand;
use anyhow::{bail, ensure, Context, Result};
use leanwm_core::utils::keysym_lookup::{into_keysym, is_shifted_letter};
use leanwm_core::utils::modmask_lookup::try_into_mod;
use leanwm_core::Command;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Keybind {
    pub command: BaseCommand,
    #[serde(default)]
    pub value: String,
    pub modifier: Option<Modifier>,
    pub key: String,
}

impl Keybind {
    /// Resolves the binding into what the core dispatches on.
    ///
    /// `workspaces` bounds the workspace numbers accepted by the workspace commands.
    /// The `modkey` placeholder must already have been substituted.
    pub fn try_convert_to_core_keybind(&self, workspaces: usize) -> Result<leanwm_core::Keybind> {
        let value_is_some = !self.value.trim().is_empty();
        if !self.command.takes_value() {
            ensure!(
                !value_is_some,
                "{:?} does not take a value, found `{}`",
                self.command,
                self.value
            );
        }

        let command = match self.command {
            BaseCommand::Execute => {
                ensure!(value_is_some, "value must not be empty");
                Command::Execute(self.value.clone())
            }
            BaseCommand::CloseWindow => Command::CloseWindow,
            BaseCommand::FocusWindowNext => Command::FocusWindowNext,
            BaseCommand::FocusWindowPrevious => Command::FocusWindowPrevious,
            BaseCommand::SwapWindowNext => Command::SwapWindowNext,
            BaseCommand::SwapWindowPrevious => Command::SwapWindowPrevious,
            BaseCommand::SendToWorkspace => Command::SendToWorkspace(
                workspace_index(&self.value, workspaces)
                    .context("invalid workspace for SendToWorkspace")?,
            ),
            BaseCommand::GoToWorkspace => Command::GoToWorkspace(
                workspace_index(&self.value, workspaces)
                    .context("invalid workspace for GoToWorkspace")?,
            ),
            BaseCommand::IncreaseWeight => Command::IncreaseWeight,
            BaseCommand::DecreaseWeight => Command::DecreaseWeight,
            BaseCommand::IncreaseGap => Command::IncreaseGap,
            BaseCommand::DecreaseGap => Command::DecreaseGap,
            BaseCommand::ToggleFullscreen => Command::ToggleFullscreen,
            BaseCommand::CycleLayout => Command::CycleLayout,
        };

        let keysym = into_keysym(&self.key)
            .with_context(|| format!("Key `{}` is not valid", self.key))?;
        ensure!(
            !is_shifted_letter(keysym),
            "Key `{}` is a shifted letter, bind `{}` with the Shift modifier instead",
            self.key,
            self.key.to_lowercase()
        );
        let modifier: Vec<String> = self
            .modifier
            .clone()
            .map(Into::into)
            .unwrap_or_default();
        for m in &modifier {
            ensure!(try_into_mod(m).is_some(), "Modifier `{m}` is not valid");
        }

        Ok(leanwm_core::Keybind {
            command,
            modifier,
            key: self.key.clone(),
        })
    }
}

/// A 1-based workspace number within `1..=workspaces`.
fn workspace_index(value: &str, workspaces: usize) -> Result<usize> {
    let index = usize::from_str(value.trim())
        .with_context(|| format!("`{value}` is not a workspace number"))?;
    if index == 0 || index > workspaces {
        bail!("workspace {index} is outside 1..={workspaces}");
    }
    Ok(index)
}

#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
#[serde(untagged)]
pub enum Modifier {
    Single(String),
    List(Vec<String>),
}

impl Modifier {
    pub fn is_empty(&self) -> bool {
        match self {
            Modifier::Single(single) => single.is_empty(),
            Modifier::List(list) => list.is_empty(),
        }
    }

    /// Replaces the `modkey` placeholder with the configured modifier.
    pub fn substitute_modkey(&mut self, modkey: &str) {
        match self {
            Modifier::Single(m) if *m == "modkey" => modkey.clone_into(m),
            Modifier::List(ms) => {
                for m in ms.iter_mut().filter(|m| **m == "modkey") {
                    modkey.clone_into(m);
                }
            }
            Modifier::Single(_) => {}
        }
    }

    pub fn sort_unstable(&mut self) {
        match self {
            Self::Single(_) => {}
            Self::List(modifiers) => modifiers.sort_unstable(),
        }
    }
}

impl From<Modifier> for Vec<String> {
    fn from(m: Modifier) -> Self {
        match m {
            Modifier::Single(modifier) => vec![modifier],
            Modifier::List(modifiers) => modifiers,
        }
    }
}

impl From<Vec<String>> for Modifier {
    fn from(l: Vec<String>) -> Self {
        Self::List(l)
    }
}

impl From<&str> for Modifier {
    fn from(m: &str) -> Self {
        Self::Single(m.to_owned())
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(modifier) => write!(f, "{modifier}"),
            Self::List(modifiers) => write!(f, "{}", modifiers.join("+")),
        }
    }
}
