//! Hook wiring for the application shell

use std::sync::{Arc, Mutex};
use tracing::info;

use crate::config::Config;
use crate::tracker::IdleHooks;
use super::action::spawn_idle_action;

/// Build the hooks the HTTP shell binds to the tracker.
///
/// The idle transition runs the configured idle action (if any); warning and
/// resume transitions are logged by the driver itself, so the hooks here only
/// add shell-side effects.
pub fn shell_hooks(config: &Config, errors: Arc<Mutex<Vec<String>>>) -> IdleHooks {
    let mut hooks = IdleHooks::new().on_warning(|remaining| {
        info!(
            "Clients should prompt the user: {}s until the session is closed",
            remaining.as_secs()
        );
    });

    if let Some(command) = config.on_idle_cmd.clone() {
        hooks = hooks.on_idle(move || {
            spawn_idle_action(command.clone(), Arc::clone(&errors));
        });
    }

    hooks
}
