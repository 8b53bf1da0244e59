//! `leanwm` general configuration

mod checks;
mod default;
mod keybind;

pub use self::keybind::{Keybind, Modifier};

use super::BaseCommand;
use anyhow::{Context, Result};
use leanwm_core::models::DockEdge;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use xdg::BaseDirectories;

/// General configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Substituted for the `modkey` placeholder in key bindings.
    pub modkey: String,
    pub workspaces: usize,
    /// Names published to pagers. Numbers are used when unset.
    pub workspace_names: Option<Vec<String>>,
    pub gap: u32,
    pub gap_step: u32,
    pub outer_gaps: bool,
    pub border_width: u32,
    pub focused_border_color: String,
    pub normal_border_color: String,
    pub dock_height: u32,
    pub dock_edge: DockEdge,
    pub weight_step: f32,
    pub min_weight: f32,
    pub max_weight: f32,
    pub close_timeout_ms: u64,
    pub focus_follows_pointer: bool,
    pub autostart: Option<String>,
    pub keybind: Vec<Keybind>,
}

/// Loads the configuration from `path`, or from the XDG config directory when no path is
/// given.
///
/// # Errors
///
/// Fails if the XDG directories cannot be resolved, if the file cannot be read or parsed,
/// or if the defaults cannot be written on first run.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            parse(&contents).with_context(|| format!("could not parse {}", path.display()))
        }
        None => load_from_file(&default_path()?),
    }
}

/// `$XDG_CONFIG_HOME/leanwm/config.toml`, creating the directory if needed.
///
/// # Errors
///
/// Fails if the XDG directories cannot be resolved or created.
pub fn default_path() -> Result<PathBuf> {
    let path = BaseDirectories::with_prefix("leanwm")?;
    Ok(path.place_config_file("config.toml")?)
}

/// Reads `config_filename`, writing the defaults there first if it does not exist.
fn load_from_file(config_filename: &Path) -> Result<Config> {
    if config_filename.exists() {
        let contents = fs::read_to_string(config_filename)?;
        parse(&contents).with_context(|| format!("could not parse {}", config_filename.display()))
    } else {
        let config = Config::default();
        let toml = toml::to_string(&config)?;
        fs::write(config_filename, toml)
            .with_context(|| format!("could not write {}", config_filename.display()))?;
        tracing::info!(path = %config_filename.display(), "Wrote default configuration");
        Ok(config)
    }
}

fn parse(contents: &str) -> Result<Config> {
    Ok(toml::from_str(contents)?)
}

pub fn is_program_in_path(program: &str) -> bool {
    if let Ok(path) = env::var("PATH") {
        for p in path.split(':') {
            let p_str = format!("{p}/{program}");
            if fs::metadata(p_str).is_ok() {
                return true;
            }
        }
    }
    false
}

/// Returns a terminal to set for the default mod+Return keybind.
fn default_terminal<'s>() -> &'s str {
    // order from least common to most common.
    let terms = &[
        "alacritty",
        "kitty",
        "urxvt",
        "st",
        "terminator",
        "gnome-terminal",
        "xfce4-terminal",
        "konsole",
        "xterm",
    ];

    // If no terminal found in path, default to a good one
    terms
        .iter()
        .find(|terminal| is_program_in_path(terminal))
        .unwrap_or(&"xterm")
}

fn absolute_path(path: &str) -> Option<PathBuf> {
    let exp_path = shellexpand::full(path).ok()?;
    std::fs::canonicalize(exp_path.as_ref()).ok()
}

impl Config {
    /// Key bindings with the `modkey` placeholder replaced.
    fn substituted_keybinds(&self) -> impl Iterator<Item = Keybind> + '_ {
        self.keybind.iter().cloned().map(|mut keybind| {
            if let Some(ref mut modifier) = keybind.modifier {
                modifier.substitute_modkey(&self.modkey);
            }
            keybind
        })
    }
}

impl leanwm_core::Config for Config {
    fn workspace_count(&self) -> usize {
        self.workspaces
    }

    fn workspace_names(&self) -> Vec<String> {
        match &self.workspace_names {
            Some(names) => names.clone(),
            None => (1..=self.workspaces).map(|i| i.to_string()).collect(),
        }
    }

    fn gap(&self) -> u32 {
        self.gap
    }

    fn gap_step(&self) -> u32 {
        self.gap_step
    }

    fn outer_gaps(&self) -> bool {
        self.outer_gaps
    }

    fn border_width(&self) -> u32 {
        self.border_width
    }

    fn focused_border_color(&self) -> String {
        self.focused_border_color.clone()
    }

    fn normal_border_color(&self) -> String {
        self.normal_border_color.clone()
    }

    fn dock_height(&self) -> u32 {
        self.dock_height
    }

    fn dock_edge(&self) -> DockEdge {
        self.dock_edge
    }

    fn weight_step(&self) -> f32 {
        self.weight_step
    }

    fn min_weight(&self) -> f32 {
        self.min_weight
    }

    fn max_weight(&self) -> f32 {
        self.max_weight
    }

    fn close_timeout(&self) -> Duration {
        Duration::from_millis(self.close_timeout_ms)
    }

    fn focus_follows_pointer(&self) -> bool {
        self.focus_follows_pointer
    }

    fn autostart(&self) -> Option<PathBuf> {
        let path = self.autostart.as_deref()?;
        let resolved = absolute_path(path);
        if resolved.is_none() {
            tracing::warn!(path, "Autostart script not found");
        }
        resolved
    }

    fn mapped_bindings(&self) -> Vec<leanwm_core::Keybind> {
        self.substituted_keybinds()
            .filter_map(
                |keybind| match keybind.try_convert_to_core_keybind(self.workspaces) {
                    Ok(internal_keybind) => Some(internal_keybind),
                    Err(err) => {
                        tracing::error!(?keybind, "Invalid key binding: {err:#}");
                        None
                    }
                },
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leanwm_core::{Command, Config as _};

    #[test]
    fn missing_file_is_created_with_the_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = load_from_file(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reread = load(Some(path.as_path())).unwrap();
        assert_eq!(reread, config);
    }

    #[test]
    fn omitted_fields_take_their_defaults() {
        let config = parse("gap = 6\ndock_edge = \"bottom\"\n").unwrap();
        assert_eq!(config.gap, 6);
        assert_eq!(config.dock_edge, DockEdge::Bottom);
        assert_eq!(config.workspaces, Config::default().workspaces);
        assert_eq!(config.close_timeout(), Duration::from_millis(2000));
        assert!(config.outer_gaps);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn malformed_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "gap = \"wide\"").unwrap();
        assert!(load(Some(path.as_path())).is_err());
    }

    #[test]
    fn mapped_bindings_substitute_the_modkey() {
        let config = parse(
            r#"
            modkey = "Mod1"

            [[keybind]]
            command = "GoToWorkspace"
            value = "2"
            modifier = ["modkey", "Shift"]
            key = "2"

            [[keybind]]
            command = "CloseWindow"
            modifier = "modkey"
            key = "NoSuchKey"
            "#,
        )
        .unwrap();

        let bindings = config.mapped_bindings();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].command, Command::GoToWorkspace(2));
        assert_eq!(bindings[0].modifier, vec!["Mod1".to_owned(), "Shift".to_owned()]);
    }

    #[test]
    fn workspace_names_fall_back_to_numbers() {
        let mut config = Config {
            workspaces: 3,
            ..Config::default()
        };
        assert_eq!(config.workspace_names(), vec!["1", "2", "3"]);
        config.workspace_names = Some(vec!["web".into(), "code".into(), "chat".into()]);
        assert_eq!(config.workspace_names()[1], "code");
    }

    #[test]
    fn autostart_expands_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("autostart.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();

        let config = Config {
            autostart: Some(script.display().to_string()),
            ..Config::default()
        };
        assert_eq!(config.autostart(), fs::canonicalize(&script).ok());

        let missing = Config {
            autostart: Some(dir.path().join("nope.sh").display().to_string()),
            ..Config::default()
        };
        assert_eq!(missing.autostart(), None);
    }
}
