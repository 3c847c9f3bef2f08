//! Clipboard backends that shell out to platform copy utilities.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use promptgrade_core::error::ClipboardError;
use promptgrade_core::traits::Clipboard;

/// Default time allowed for a copy utility to finish.
pub const DEFAULT_CLIPBOARD_TIMEOUT: Duration = Duration::from_secs(5);

/// Writes to the clipboard by piping text into an external program
/// (`pbcopy`, `wl-copy`, `xclip`, ...).
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: DEFAULT_CLIPBOARD_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn pipe(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            // Helpers like xclip and wl-copy fork a process that keeps serving
            // the selection; it must not hold any pipe we wait on.
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    ClipboardError::Unavailable(format!("{} not found", self.program))
                }
                ErrorKind::PermissionDenied => ClipboardError::Denied(e.to_string()),
                _ => ClipboardError::Transport(e.to_string()),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A program that exits without reading stdin closes the pipe; the
            // exit status below decides the outcome in that case.
            if let Err(e) = stdin.write_all(text.as_bytes()).await {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(ClipboardError::Transport(e.to_string()));
                }
            }
            drop(stdin);
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::Transport(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Denied(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    fn name(&self) -> &str {
        &self.program
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        match tokio::time::timeout(self.timeout, self.pipe(text)).await {
            Ok(result) => result,
            Err(_) => Err(ClipboardError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

/// A clipboard that always fails. Used when no backend is available or the
/// user disabled copying.
#[derive(Debug, Clone)]
pub struct UnavailableClipboard {
    reason: String,
}

impl UnavailableClipboard {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Clipboard for UnavailableClipboard {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn write(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(self.reason.clone()))
    }
}

/// Pick a copy utility for the current platform.
///
/// Returns `None` when nothing suitable is known for this environment.
pub fn system_clipboard_command() -> Option<CommandClipboard> {
    if cfg!(target_os = "macos") {
        return Some(CommandClipboard::new("pbcopy", vec![]));
    }
    if cfg!(target_os = "windows") {
        return Some(CommandClipboard::new("clip.exe", vec![]));
    }
    if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        return Some(CommandClipboard::new("wl-copy", vec![]));
    }
    if std::env::var_os("DISPLAY").is_some() {
        return Some(CommandClipboard::new(
            "xclip",
            vec!["-selection".into(), "clipboard".into()],
        ));
    }
    None
}

/// Build the best clipboard available on this system.
pub fn detect_system_clipboard() -> Box<dyn Clipboard> {
    match system_clipboard_command() {
        Some(cmd) => {
            tracing::debug!(program = cmd.program(), "using system clipboard command");
            Box::new(cmd)
        }
        None => {
            tracing::debug!("no system clipboard detected");
            Box::new(UnavailableClipboard::new(
                "no clipboard utility found for this environment",
            ))
        }
    }
}
