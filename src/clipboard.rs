/*!
 * Clipboard support for repodump
 *
 * The rendered dump is piped into the first clipboard tool that is
 * available on the system.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// External programs that can take text on stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardProvider {
    Tmux,
    MacOS,
    Wayland,
    Xsel,
    Xclip,
    Wsl,
    Termux,
}

impl ClipboardProvider {
    /// Program and arguments used to copy stdin to the clipboard
    pub fn command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::MacOS => ("pbcopy", &[]),
            Self::Wayland => ("wl-copy", &[]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::Wsl => ("clip.exe", &[]),
            Self::Termux => ("termux-clipboard-set", &[]),
        }
    }

    /// Pipe `text` into this provider's program
    pub fn copy(&self, text: &str) -> Result<()> {
        let (cmd, args) = self.command();
        let mut child = Command::new(cmd)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e))
            })?;

        {
            let stdin = child.stdin.as_mut().ok_or_else(|| {
                ClipboardError::CommandFailed(format!("Failed to open stdin for {}", cmd))
            })?;
            stdin.write_all(text.as_bytes())?;
        }
        // Close stdin so the program sees EOF.
        drop(child.stdin.take());

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed(format!(
                "{} exited with status: {}",
                cmd, status
            )))
        }
    }
}

/// Copy text to the clipboard
///
/// Providers are tried in order of preference; the first one that succeeds
/// wins.
pub fn copy_to_clipboard(text: &str) -> Result<ClipboardProvider> {
    let mut last_error = None;

    for provider in available_providers() {
        match provider.copy(text) {
            Ok(()) => {
                log::info!("Copied output to clipboard using {:?}", provider);
                return Ok(provider);
            }
            Err(e) => {
                log::debug!("Clipboard provider {:?} failed: {}", provider, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or(ClipboardError::NoClipboardFound))
}

/// Providers usable on this system, most preferred first
pub fn available_providers() -> Vec<ClipboardProvider> {
    candidate_providers(
        env::var_os("TMUX").is_some(),
        env::var_os("WAYLAND_DISPLAY").is_some(),
    )
    .into_iter()
    .filter(|provider| command_exists(provider.command().0))
    .collect()
}

fn candidate_providers(in_tmux: bool, on_wayland: bool) -> Vec<ClipboardProvider> {
    let mut providers = Vec::new();
    if in_tmux {
        providers.push(ClipboardProvider::Tmux);
    }

    if cfg!(target_os = "macos") {
        providers.push(ClipboardProvider::MacOS);
    } else if cfg!(target_os = "android") {
        providers.push(ClipboardProvider::Termux);
    } else if env::var_os("WSL_DISTRO_NAME").is_some() || cfg!(target_os = "windows") {
        providers.push(ClipboardProvider::Wsl);
    } else {
        if on_wayland {
            providers.push(ClipboardProvider::Wayland);
        }
        providers.push(ClipboardProvider::Xsel);
        providers.push(ClipboardProvider::Xclip);
    }

    providers
}

/// Check if a command can be found on `PATH`
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH").map_or(false, |paths| {
        env::split_paths(&paths).any(|dir| dir.join(command).is_file())
    })
}
