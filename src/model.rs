// Defines the core data structures for the adapter.

use std::fmt;

/// Coarse state label of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Running,
    Stopped,
}

impl ServiceState {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceState::Running => "running",
            ServiceState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents one systemd service unit as reported by a single `systemctl show`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub id: String,   // e.g., "ssh.service"
    pub name: String, // e.g., "ssh"
    pub running: bool,
    pub state: ServiceState,

    // Display-only extras, empty when systemctl did not report them.
    pub description: String,
    pub load_state: String,   // e.g., "loaded", "not-found"
    pub active_state: String, // e.g., "active", "inactive", "failed"
    pub sub_state: String,    // e.g., "running", "dead", "exited"
}

impl Service {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_failed(&self) -> bool {
        self.active_state == "failed"
    }

    /// systemctl still describes units it has no file for; they carry `LoadState=not-found`.
    pub fn is_not_found(&self) -> bool {
        self.load_state == "not-found"
    }
}
