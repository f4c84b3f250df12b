//! Qualifying activity events and the monitored surface they arrive on

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// The fixed set of interaction event kinds that reset the inactivity clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    PointerDown,
    PointerMove,
    KeyPress,
    Scroll,
    TouchStart,
    Click,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 6] = [
        ActivityKind::PointerDown,
        ActivityKind::PointerMove,
        ActivityKind::KeyPress,
        ActivityKind::Scroll,
        ActivityKind::TouchStart,
        ActivityKind::Click,
    ];

    /// Parse the wire name of a qualifying event kind
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pointer-down" => Some(ActivityKind::PointerDown),
            "pointer-move" => Some(ActivityKind::PointerMove),
            "key-press" => Some(ActivityKind::KeyPress),
            "scroll" => Some(ActivityKind::Scroll),
            "touch-start" => Some(ActivityKind::TouchStart),
            "click" => Some(ActivityKind::Click),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::PointerDown => "pointer-down",
            ActivityKind::PointerMove => "pointer-move",
            ActivityKind::KeyPress => "key-press",
            ActivityKind::Scroll => "scroll",
            ActivityKind::TouchStart => "touch-start",
            ActivityKind::Click => "click",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The monitored surface: a broadcast feed of qualifying activity events.
///
/// Producers (HTTP handlers, embedding applications) emit events; each
/// tracker takes one subscription at spawn and drops it at teardown, so
/// there are no ambient global listeners to leak.
#[derive(Debug, Clone)]
pub struct ActivitySurface {
    tx: broadcast::Sender<ActivityKind>,
}

impl ActivitySurface {
    /// Create a surface with the given event buffer capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit one qualifying activity event to all subscribed trackers
    pub fn emit(&self, kind: ActivityKind) {
        if self.tx.send(kind).is_err() {
            debug!("Activity event '{}' dropped: no subscribed tracker", kind);
        }
    }

    /// Subscribe to the activity feed
    pub fn subscribe(&self) -> broadcast::Receiver<ActivityKind> {
        self.tx.subscribe()
    }
}

impl Default for ActivitySurface {
    fn default() -> Self {
        Self::new(64)
    }
}
