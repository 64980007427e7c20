use crate::config::Config;
use crate::config::migrate::{add_missing_keys, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the config file as stored, or the effective config when there
    /// is no file yet.
    pub fn print(path: &Path, cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        if path.exists() {
            let content = fs::read_to_string(path)?;
            println!("{}", content);
        } else {
            info(format!("No config file at {}, showing defaults", path.display()));
            println!("{}", serde_yaml::to_string(cfg)?);
        }
        Ok(())
    }

    /// Open the config in `editor`, falling back to `$EDITOR`/`$VISUAL`
    /// and then the platform default.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let requested = editor.map(str::to_string).unwrap_or_else(|| default_editor.clone());

        if run_editor(&requested, path) {
            success(format!("Configuration file edited using '{}'", requested));
            return Ok(());
        }

        warning(format!(
            "Editor '{}' not available, falling back to '{}'",
            requested, default_editor
        ));

        if run_editor(&default_editor, path) {
            success(format!(
                "Configuration file edited using fallback '{}'",
                default_editor
            ));
            Ok(())
        } else {
            Err(AppError::Config(format!(
                "failed to edit {} with '{}'",
                path.display(),
                default_editor
            )))
        }
    }

    /// Report keys missing from the config file. Returns them.
    pub fn check(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "config file not found: {} (run `gymdesk init`)",
                path.display()
            )));
        }

        let missing = missing_keys(path)?;
        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            warning(format!("Missing keys: {}", missing.join(", ")));
            info("Run `gymdesk config --migrate` to add them with defaults.");
        }

        // Values present but unusable
        let cfg = Config::load()?;
        if let Err(e) = cfg.default_payment() {
            warning(e.to_string());
        }

        Ok(missing)
    }

    pub fn migrate(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "config file not found: {} (run `gymdesk init`)",
                path.display()
            )));
        }

        let added = add_missing_keys(path)?;
        if added.is_empty() {
            info("Configuration already up to date.");
        } else {
            success(format!("Added keys: {}", added.join(", ")));
        }
        Ok(added)
    }
}

fn run_editor(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}
