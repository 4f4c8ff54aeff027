// Handles all interactions with the `systemctl` command.

pub mod parse;
pub mod runner;

use crate::config::{Config, Scope};
use crate::error::{Error, Result};
use crate::manager::ServiceManager;
use crate::model::Service;
use log::{debug, info};
use runner::{CommandRunner, SystemRunner};

/// [`ServiceManager`] backed by systemd units.
#[derive(Debug, Clone)]
pub struct SystemdServiceManager<R = SystemRunner> {
    runner: R,
    systemctl: String,
    scope: Scope,
}

impl SystemdServiceManager<SystemRunner> {
    pub fn new(config: &Config) -> Self {
        Self::with_runner(SystemRunner, config)
    }
}

impl<R: CommandRunner> SystemdServiceManager<R> {
    pub fn with_runner(runner: R, config: &Config) -> Self {
        Self {
            runner,
            systemctl: config.systemctl.clone(),
            scope: config.scope,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Tests whether systemctl can be found on this host.
    pub fn verify(&self) -> bool {
        match self.runner.status("which", &[self.systemctl.clone()]) {
            Ok(()) => true,
            Err(e) => {
                debug!("systemd backend unavailable: {e}");
                false
            }
        }
    }

    fn args<I, S>(&self, rest: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = Vec::new();
        if self.scope == Scope::User {
            args.push("--user".to_string());
        }
        args.extend(rest.into_iter().map(Into::into));
        args
    }

    /// Every plain `.service` unit file known to systemd.
    fn unit_files(&self) -> Result<Vec<String>> {
        let args = self.args(["list-unit-files", "--no-legend", "--no-pager", "-la"]);
        let output = self.runner.output(&self.systemctl, &args)?;
        Ok(parse::parse_unit_files(&output))
    }

    fn run_verb(&self, verb: &str, id: &str) -> Result<()> {
        validate_unit(id)?;
        info!("systemctl {verb} {id}");
        let args = self.args([verb, id]);
        self.runner.status(&self.systemctl, &args)
    }
}

impl<R: CommandRunner> ServiceManager for SystemdServiceManager<R> {
    fn id(&self) -> &str {
        "systemd"
    }

    fn name(&self) -> &str {
        "systemd"
    }

    fn list(&self, units: &[String]) -> Result<Vec<Service>> {
        let units = if units.is_empty() {
            self.unit_files()?
        } else {
            units.to_vec()
        };

        // `systemctl show` without units describes the manager itself.
        if units.is_empty() {
            return Ok(Vec::new());
        }
        for unit in &units {
            validate_unit(unit)?;
        }

        let mut args = self.args(["show", "--full", "--all", "--no-pager"]);
        args.extend(units);
        let output = self.runner.output(&self.systemctl, &args)?;
        Ok(parse::services_from_show(&output))
    }

    fn start(&self, id: &str) -> Result<()> {
        self.run_verb("start", id)
    }

    fn stop(&self, id: &str) -> Result<()> {
        self.run_verb("stop", id)
    }

    fn restart(&self, id: &str) -> Result<()> {
        self.run_verb("restart", id)
    }
}

/// Rejects names systemctl would read as options.
fn validate_unit(id: &str) -> Result<()> {
    if id.trim().is_empty() || id.starts_with('-') {
        return Err(Error::InvalidUnit(id.to_string()));
    }
    Ok(())
}
