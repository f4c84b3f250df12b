//! Idle action execution

use std::sync::{Arc, Mutex};
use tokio::process::Command;
use tracing::{error, info};

/// Run the operator-configured idle action (e.g. a session lock or logout
/// hook) through the shell
pub async fn run_idle_action(command: &str) -> Result<(), String> {
    info!("Running idle action: {}", command);

    let output = Command::new("sh")
        .args(["-c", command])
        .output()
        .await
        .map_err(|e| format!("Failed to execute idle action: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "Idle action exited with {}: {}",
            output.status,
            stderr.trim()
        ));
    }

    info!("Idle action completed");
    Ok(())
}

/// Run the idle action detached from the driver; failures land in the
/// shared error ledger instead of propagating
pub fn spawn_idle_action(command: String, errors: Arc<Mutex<Vec<String>>>) {
    tokio::spawn(async move {
        if let Err(e) = run_idle_action(&command).await {
            error!("{}", e);
            if let Ok(mut errors) = errors.lock() {
                errors.push(e);
            }
        }
    });
}
