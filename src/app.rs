// The central application controller and event loop.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::warn;
use ratatui::{Terminal, backend::Backend, widgets::ListState};
use std::time::{Duration, Instant};

pub mod ui;

use crate::manager::{ServiceAction, ServiceManager};
use crate::model::Service;

/// Which services the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Running,
}

pub struct App<M> {
    manager: M,
    services: Vec<Service>,
    list_state: ListState,
    filter: Filter,
    details: Option<Service>,
    status: Option<String>,
    list_error: Option<String>,
    tick_rate: Duration,
    should_quit: bool,
}

impl<M: ServiceManager> App<M> {
    pub fn new(manager: M, tick_rate: Duration) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0)); // Start with first item selected

        Self {
            manager,
            services: Vec::new(),
            list_state,
            filter: Filter::All,
            details: None,
            status: None,
            list_error: None,
            tick_rate,
            should_quit: false,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        // Initial fetch
        self.refresh_services();

        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| {
                let view = ui::View {
                    services: &self.services,
                    filter: self.filter,
                    details: self.details.as_ref(),
                    status: self.status.as_deref().or(self.list_error.as_deref()),
                };
                ui::render(f, &view, &mut self.list_state)
            })?;

            let timeout = self
                .tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                self.refresh_services();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        // A message stays up until the next key press.
        self.status = None;

        match code {
            KeyCode::Esc if self.details.is_some() => self.details = None,
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.next(),
            KeyCode::Char('k') | KeyCode::Up => self.previous(),
            KeyCode::Enter => self.toggle_details(),
            KeyCode::Char('/') => self.toggle_filter(),

            KeyCode::Char('s') => self.perform_action(ServiceAction::Start),
            KeyCode::Char('x') => self.perform_action(ServiceAction::Stop),
            KeyCode::Char('r') => self.perform_action(ServiceAction::Restart),
            _ => {}
        }
    }

    fn refresh_services(&mut self) {
        match self.manager.list(&[]) {
            Ok(services) => {
                self.services = match self.filter {
                    Filter::All => services,
                    Filter::Running => services.into_iter().filter(Service::is_running).collect(),
                };
                self.list_error = None;
            }
            Err(e) => {
                warn!("failed to list services: {e}");
                self.list_error = Some(format!("List failed: {e}"));
            }
        }

        if let Some(selected) = self.list_state.selected() {
            if selected >= self.services.len() {
                self.list_state
                    .select(Some(self.services.len().saturating_sub(1)));
            }
        }
    }

    fn selected(&self) -> Option<&Service> {
        self.list_state
            .selected()
            .and_then(|index| self.services.get(index))
    }

    fn next(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.services.len().saturating_sub(1) {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.services.len().saturating_sub(1)
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn toggle_filter(&mut self) {
        self.filter = match self.filter {
            Filter::All => Filter::Running,
            Filter::Running => Filter::All,
        };
        self.list_state.select(Some(0));
        self.refresh_services();
    }

    fn toggle_details(&mut self) {
        if self.details.take().is_some() {
            return;
        }
        let Some(id) = self.selected().map(|s| s.id.clone()) else {
            return;
        };
        match self.manager.get_service(&id) {
            Ok(Some(service)) if !service.is_not_found() => self.details = Some(service),
            Ok(_) => self.status = Some(format!("{id} is no longer known to systemd")),
            Err(e) => {
                warn!("failed to query {id}: {e}");
                self.status = Some(format!("Query failed: {e}"));
            }
        }
    }

    // Failures are reported in the status line; the loop keeps running.
    fn perform_action(&mut self, action: ServiceAction) {
        let Some(id) = self.selected().map(|s| s.id.clone()) else {
            return;
        };
        self.status = Some(match self.manager.control(&id, action) {
            Ok(()) => format!("{action} {id}: ok"),
            Err(e) => {
                warn!("{action} {id} failed: {e}");
                format!("{action} {id} failed: {e}")
            }
        });
        self.refresh_services();
    }
}
