use super::{Config, Modifier};
use anyhow::{bail, ensure, Result};
use std::collections::HashSet;

impl Config {
    /// Rejects configurations the manager cannot start with.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, with every invalid key binding listed.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.workspaces >= 1, "at least one workspace is required");
        if let Some(names) = &self.workspace_names {
            ensure!(
                names.len() == self.workspaces,
                "{} workspace names given for {} workspaces",
                names.len(),
                self.workspaces
            );
        }
        ensure!(
            is_hex_color(&self.focused_border_color),
            "focused_border_color `{}` is not #RRGGBB",
            self.focused_border_color
        );
        ensure!(
            is_hex_color(&self.normal_border_color),
            "normal_border_color `{}` is not #RRGGBB",
            self.normal_border_color
        );
        ensure!(
            self.min_weight.is_finite() && self.min_weight > 0.0,
            "min_weight must be positive"
        );
        ensure!(
            self.max_weight.is_finite() && self.max_weight >= self.min_weight,
            "max_weight must not be below min_weight"
        );
        ensure!(
            self.weight_step.is_finite() && self.weight_step > 0.0,
            "weight_step must be positive"
        );
        ensure!(self.close_timeout_ms > 0, "close_timeout_ms must be positive");

        let errors = self.keybind_errors();
        if !errors.is_empty() {
            bail!("invalid key bindings:\n  {}", errors.join("\n  "));
        }
        Ok(())
    }

    /// Check all keybinds: values, key and modifier names, and duplicated combinations.
    fn keybind_errors(&self) -> Vec<String> {
        let mut returns = Vec::new();
        let mut bindings = HashSet::new();
        for keybind in self.substituted_keybinds() {
            if let Err(err) = keybind.try_convert_to_core_keybind(self.workspaces) {
                returns.push(format!("{err:#} for keybind {keybind:?}"));
            }

            let mut modkey = keybind
                .modifier
                .clone()
                .unwrap_or_else(|| Modifier::List(vec![]));
            modkey.sort_unstable();
            if bindings.replace((modkey.clone(), keybind.key.clone())).is_some() {
                returns.push(format!(
                    "multiple commands bound to key combination {modkey} + {}",
                    keybind.key
                ));
            }
        }
        returns
    }

    /// Prints what was checked, for `--check`.
    pub fn check(&self, verbose: bool) {
        println!("\x1b[0;94m::\x1b[0m Checking configuration . . .");
        if verbose {
            println!("{self:#?}");
        }
        match self.validate() {
            Ok(()) => println!("\x1b[0;92m    -> Configuration OK\x1b[0m"),
            Err(err) => println!("\x1b[1;91mERROR: {err:#}\x1b[0m"),
        }
    }
}

fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Keybind;
    use crate::BaseCommand;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn zero_workspaces_are_rejected() {
        let config = Config {
            workspaces: 0,
            keybind: vec![],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn colors_must_be_hex() {
        let config = Config {
            focused_border_color: "red".to_owned(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(is_hex_color("#1a2B3c"));
        assert!(!is_hex_color("#1a2B3"));
    }

    #[test]
    fn max_weight_must_not_undercut_min_weight() {
        let config = Config {
            min_weight: 2.0,
            max_weight: 1.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn duplicated_combinations_are_reported() {
        let mut config = Config::default();
        config.keybind.push(Keybind {
            command: BaseCommand::DecreaseGap,
            value: String::new(),
            modifier: Some(vec!["Shift".to_owned(), "modkey".to_owned()].into()),
            key: "q".to_owned(),
        });
        let errors = config.keybind_errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("multiple commands"));
    }

    #[test]
    fn bindings_to_missing_workspaces_are_reported() {
        let config = Config {
            workspaces: 3,
            ..Config::default()
        };
        // The defaults bind workspaces 4 to 9 twice each.
        assert_eq!(config.keybind_errors().len(), 12);
        assert!(config.validate().is_err());
    }
}
