use crate::utils::error::{DiagramError, Result};
use std::process::Command;

fn opener_command(path: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", path]);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

/// Hands a written figure to the platform's default viewer.
pub fn open_in_viewer(path: &str) -> Result<()> {
    tracing::info!("Opening {} in the default viewer...", path);
    let status = opener_command(path).status()?;

    if !status.success() {
        return Err(DiagramError::render(format!(
            "viewer exited with {} while opening {}",
            status, path
        )));
    }
    Ok(())
}
