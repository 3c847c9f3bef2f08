//! Configuration loading and clipboard factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use promptgrade_core::traits::Clipboard;

use crate::clipboard::{detect_system_clipboard, CommandClipboard, UnavailableClipboard};

/// How prompts reach the clipboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClipboardConfig {
    /// Auto-detect a platform copy utility.
    #[default]
    System,
    /// Pipe text into an explicit program.
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default = "default_clipboard_timeout_ms")]
        timeout_ms: u64,
    },
    /// Copying always fails.
    Disabled,
}

fn default_clipboard_timeout_ms() -> u64 {
    5000
}

/// Top-level promptgrade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptgradeConfig {
    /// Clipboard backend.
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    /// How long copy notifications stay visible, in milliseconds.
    #[serde(default = "default_notice_duration_ms")]
    pub notice_duration_ms: u64,
    /// Default eval set file used instead of the built-in prompts.
    #[serde(default)]
    pub eval_set: Option<PathBuf>,
    /// Print notifications to stderr.
    #[serde(default = "default_true")]
    pub echo_notifications: bool,
}

fn default_notice_duration_ms() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}

impl Default for PromptgradeConfig {
    fn default() -> Self {
        Self {
            clipboard: ClipboardConfig::default(),
            notice_duration_ms: default_notice_duration_ms(),
            eval_set: None,
            echo_notifications: true,
        }
    }
}

impl PromptgradeConfig {
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_clipboard_config(config: &ClipboardConfig) -> ClipboardConfig {
    match config {
        ClipboardConfig::Command {
            program,
            args,
            timeout_ms,
        } => ClipboardConfig::Command {
            program: resolve_env_vars(program),
            args: args.iter().map(|a| resolve_env_vars(a)).collect(),
            timeout_ms: *timeout_ms,
        },
        other => other.clone(),
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `promptgrade.toml` in the current directory
/// 2. `~/.config/promptgrade/config.toml`
///
/// Environment variable overrides: `PROMPTGRADE_NOTICE_MS`,
/// `PROMPTGRADE_CLIPBOARD_CMD`.
pub fn load_config_from(path: Option<&Path>) -> Result<PromptgradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("promptgrade.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let mut config = toml::from_str::<PromptgradeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            // Relative eval set paths are relative to the config file.
            if let (Some(eval_set), Some(parent)) = (&config.eval_set, path.parent()) {
                if eval_set.is_relative() && !parent.as_os_str().is_empty() {
                    config.eval_set = Some(parent.join(eval_set));
                }
            }
            config
        }
        None => PromptgradeConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    config.clipboard = resolve_clipboard_config(&config.clipboard);

    tracing::debug!(source = ?config_path, ?config, "loaded config");
    Ok(config)
}

fn apply_env_overrides(config: &mut PromptgradeConfig) -> Result<()> {
    if let Ok(ms) = std::env::var("PROMPTGRADE_NOTICE_MS") {
        config.notice_duration_ms = ms
            .trim()
            .parse()
            .with_context(|| format!("invalid PROMPTGRADE_NOTICE_MS: {ms}"))?;
    }

    if let Ok(cmd) = std::env::var("PROMPTGRADE_CLIPBOARD_CMD") {
        let mut parts = cmd.split_whitespace().map(str::to_string);
        if let Some(program) = parts.next() {
            config.clipboard = ClipboardConfig::Command {
                program,
                args: parts.collect(),
                timeout_ms: default_clipboard_timeout_ms(),
            };
        }
    }

    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("promptgrade"))
}

/// Create a clipboard instance from its configuration.
pub fn create_clipboard(config: &ClipboardConfig) -> Box<dyn Clipboard> {
    match config {
        ClipboardConfig::System => detect_system_clipboard(),
        ClipboardConfig::Command {
            program,
            args,
            timeout_ms,
        } => Box::new(
            CommandClipboard::new(program.clone(), args.clone())
                .with_timeout(Duration::from_millis(*timeout_ms)),
        ),
        ClipboardConfig::Disabled => {
            Box::new(UnavailableClipboard::new("clipboard disabled in config"))
        }
    }
}
