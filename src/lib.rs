//! Enumerate, inspect and control systemd service units through `systemctl`.
//!
//! [`SystemdServiceManager`] implements the host-facing [`ServiceManager`]
//! trait by running `systemctl` and parsing its `key=value` output into
//! [`Service`] records. The [`app`] module is a terminal monitor built on top.

pub mod app;
pub mod config;
pub mod error;
pub mod manager;
pub mod model;
pub mod systemd;

pub use config::{Config, Scope};
pub use error::{Error, Result};
pub use manager::{ServiceAction, ServiceManager};
pub use model::{Service, ServiceState};
pub use systemd::SystemdServiceManager;
