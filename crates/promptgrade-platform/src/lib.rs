//! promptgrade-platform — Clipboard backends, toast notifications, and config.
//!
//! Implements the `Clipboard` and `Notifier` traits from `promptgrade-core`
//! for terminal use, and loads `promptgrade.toml`.

pub mod clipboard;
pub mod config;
pub mod mock;
pub mod toast;

pub use clipboard::{detect_system_clipboard, CommandClipboard, UnavailableClipboard};
pub use config::{create_clipboard, load_config_from, ClipboardConfig, PromptgradeConfig};
pub use toast::ToastSurface;
