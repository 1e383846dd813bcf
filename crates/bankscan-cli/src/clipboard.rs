//! Clipboard integration via platform helper binaries

use std::io::Write;

use anyhow::{bail, Context, Result};

/// Copy text to the system clipboard.
///
/// Locates the first helper available on PATH (pbcopy on macOS, wl-copy on
/// Wayland, xclip on X11) and pipes the text to its stdin. Callers treat a
/// failure as non-fatal and log it.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let (name, args): (&str, &[&str]) = if which::which("pbcopy").is_ok() {
        ("pbcopy", &[])
    } else if which::which("wl-copy").is_ok() {
        ("wl-copy", &[])
    } else if which::which("xclip").is_ok() {
        ("xclip", &["-selection", "clipboard"])
    } else {
        bail!("No clipboard helper found (tried pbcopy, wl-copy, xclip)");
    };

    let mut child = std::process::Command::new(name)
        .args(args)
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .with_context(|| format!("spawning {}", name))?;

    {
        let stdin = child.stdin.as_mut().context("no stdin")?;
        stdin
            .write_all(text.as_bytes())
            .with_context(|| format!("writing to {}", name))?;
    }

    let status = child.wait().with_context(|| format!("waiting on {}", name))?;
    if !status.success() {
        bail!("{} exited with {}", name, status);
    }

    Ok(())
}
