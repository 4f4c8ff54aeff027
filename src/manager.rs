// The interface a host application uses to drive a service backend.

use crate::error::Result;
use crate::model::Service;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Start,
    Stop,
    Restart,
}

impl ServiceAction {
    pub fn verb(self) -> &'static str {
        match self {
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
            ServiceAction::Restart => "restart",
        }
    }
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

pub trait ServiceManager {
    /// Stable identifier of the backend, e.g. `"systemd"`.
    fn id(&self) -> &str;

    /// Human readable backend name.
    fn name(&self) -> &str;

    /// Lists the given units, or every plain service unit when `units` is empty.
    fn list(&self, units: &[String]) -> Result<Vec<Service>>;

    fn get_service(&self, id: &str) -> Result<Option<Service>> {
        Ok(self.list(&[id.to_string()])?.into_iter().next())
    }

    fn start(&self, id: &str) -> Result<()>;

    fn stop(&self, id: &str) -> Result<()>;

    fn restart(&self, id: &str) -> Result<()>;

    fn control(&self, id: &str, action: ServiceAction) -> Result<()> {
        match action {
            ServiceAction::Start => self.start(id),
            ServiceAction::Stop => self.stop(id),
            ServiceAction::Restart => self.restart(id),
        }
    }
}
