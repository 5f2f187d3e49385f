/// Verification gate side channel
///
/// Opens the sponsor page in the user's browser and, after a fixed delay,
/// reports the step as done. Nothing confirms the page was actually viewed;
/// this gate is cosmetic and must not be treated as a security control.

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::VerifyError;

/// Hand a URL to the desktop's default opener
pub fn open_external(url: &str) -> Result<(), VerifyError> {
    let (program, args) = opener_command(url);
    spawn_reaped(program, &args)
        .map(|_| info!("🔓 Opened verification page: {}", url))
        .map_err(|source| VerifyError::Open {
            url: url.to_string(),
            source,
        })
}

/// Spawn with null stdio; the child is waited on from its own thread
fn spawn_reaped(program: &str, args: &[String]) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    thread::Builder::new()
        .name("opener-reaper".into())
        .spawn(move || {
            let status = child.wait();
            if let Err(e) = &status {
                warn!("⚠️  Opener did not exit cleanly: {}", e);
            }
            status
        })
}

fn opener_command(url: &str) -> (&'static str, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("open", vec![url.to_string()])
    } else if cfg!(target_os = "windows") {
        // Empty title argument so `start` doesn't treat the URL as one
        ("cmd", vec!["/C".into(), "start".into(), String::new(), url.to_string()])
    } else {
        ("xdg-open", vec![url.to_string()])
    }
}

/// Open the page, then wait out the delay.
///
/// The gate unlocks even when the page could not be opened.
pub async fn run_verification(url: String, delay: Duration) {
    if let Err(e) = open_external(&url) {
        warn!("⚠️  {}", e);
    }
    unlock_after(delay).await;
}

/// The fixed wait standing in for a real confirmation
pub async fn unlock_after(delay: Duration) {
    tokio::time::sleep(delay).await;
    info!("Verification delay elapsed after {:?}", delay);
}
