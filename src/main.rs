use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{LevelFilter, info};
use std::path::PathBuf;
use systemd_services::app::App;
use systemd_services::{
    Config, Scope, Service, ServiceAction, ServiceManager, SystemdServiceManager,
};

#[derive(Parser, Debug)]
#[command(version, about = "Inspect and control systemd service units")]
struct Cli {
    /// Talk to the user's service manager instead of the system one
    #[arg(long, global = true)]
    user: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// systemctl program to run
    #[arg(long, global = true, value_name = "PATH")]
    systemctl: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List services (all plain service units when none are given)
    List { units: Vec<String> },
    /// Show one service
    Show { unit: String },
    /// Start a service
    Start { unit: String },
    /// Stop a service
    Stop { unit: String },
    /// Restart a service
    Restart { unit: String },
    /// Check that systemctl is available
    Check,
    /// Interactive monitor (default)
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Tui);

    // stderr output would draw over the monitor, so it stays quiet unless asked.
    let level = match (&command, cli.debug) {
        (_, true) => LevelFilter::Debug,
        (Command::Tui, false) => LevelFilter::Off,
        _ => LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.user {
        config.scope = Scope::User;
    }
    if let Some(systemctl) = cli.systemctl {
        config.systemctl = systemctl;
    }
    info!("using {} ({:?} scope)", config.systemctl, config.scope);

    let manager = SystemdServiceManager::new(&config);

    match command {
        Command::List { units } => {
            for service in manager.list(&units)? {
                println!("{}", list_line(&service));
            }
        }
        Command::Show { unit } => {
            let Some(service) = manager.get_service(&unit)?.filter(|s| !s.is_not_found()) else {
                bail!("service {unit} not found");
            };
            println!("Id:          {}", service.id);
            println!("Name:        {}", service.name);
            println!("Description: {}", service.description);
            println!("State:       {}", service.state);
            println!("Load:        {}", service.load_state);
            println!("Active:      {}", service.active_state);
            println!("Sub:         {}", service.sub_state);
        }
        Command::Start { unit } => control(&manager, &unit, ServiceAction::Start)?,
        Command::Stop { unit } => control(&manager, &unit, ServiceAction::Stop)?,
        Command::Restart { unit } => control(&manager, &unit, ServiceAction::Restart)?,
        Command::Check => {
            if !manager.verify() {
                bail!("{} not found", config.systemctl);
            }
            println!("{} is available", config.systemctl);
        }
        Command::Tui => run_tui(manager, &config)?,
    }

    Ok(())
}

fn list_line(service: &Service) -> String {
    format!("{:<40} {:<8} {}", service.name, service.state, service.id)
}

fn control(manager: &impl ServiceManager, unit: &str, action: ServiceAction) -> Result<()> {
    manager
        .control(unit, action)
        .with_context(|| format!("Failed to {action} service {unit}"))
}

fn run_tui(manager: SystemdServiceManager, config: &Config) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = App::new(manager, config.refresh_interval()).run(&mut terminal);
    ratatui::restore();
    result.context("Monitor exited with an error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use systemd_services::ServiceState;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["systemd-services", "restart", "ssh.service", "--user"]).unwrap();
        assert!(cli.user);
        assert!(matches!(cli.command, Some(Command::Restart { ref unit }) if unit == "ssh.service"));
    }

    #[test]
    fn list_line_is_name_state_id() {
        let service = Service {
            id: "systemd\\x2dlogind.service".into(),
            name: "systemd-logind".into(),
            running: true,
            state: ServiceState::Running,
            description: String::new(),
            load_state: "loaded".into(),
            active_state: "active".into(),
            sub_state: "running".into(),
        };
        let line = list_line(&service);
        assert_eq!(
            line.split_whitespace().collect::<Vec<_>>(),
            ["systemd-logind", "running", "systemd\\x2dlogind.service"]
        );
        assert_eq!(line.find("running"), Some(41));
    }

    #[test]
    fn no_subcommand_means_monitor() {
        let cli = Cli::try_parse_from(["systemd-services"]).unwrap();
        assert!(cli.command.is_none());
    }
}
