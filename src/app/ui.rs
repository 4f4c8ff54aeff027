// Handles the rendering of widgets to the terminal frame.

use super::Filter;
use crate::model::Service;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

/// Everything the renderer needs from the application state.
pub struct View<'a> {
    pub services: &'a [Service],
    pub filter: Filter,
    pub details: Option<&'a Service>,
    pub status: Option<&'a str>,
}

/// Main render function called every frame.
pub fn render(f: &mut Frame, view: &View<'_>, list_state: &mut ListState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    render_service_list(f, chunks[0], view.services, list_state, view.filter);
    render_footer(f, chunks[1], view);

    if let Some(service) = view.details {
        render_details(f, service);
    }
}

fn render_service_list(
    f: &mut Frame,
    area: Rect,
    services: &[Service],
    state: &mut ListState,
    filter: Filter,
) {
    let items: Vec<ListItem> = services
        .iter()
        .map(|service| {
            let (status_symbol, color) = if service.is_running() {
                ("●", Color::Green)
            } else if service.is_failed() {
                ("✖", Color::Red)
            } else {
                ("○", Color::DarkGray)
            };

            let content = Line::from(vec![
                Span::styled(status_symbol, Style::default().fg(color)),
                Span::raw(format!(" {:<40}", service.name)),
                Span::styled(
                    format!("[{}::{}]", service.state, service.sub_state),
                    Style::default().fg(Color::Gray),
                ),
            ]);

            ListItem::new(content)
        })
        .collect();

    let title = match filter {
        Filter::All => " All Services ",
        Filter::Running => " Running Services ",
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, state);
}

fn render_footer(f: &mut Frame, area: Rect, view: &View<'_>) {
    let help_text = match view.status {
        Some(status) => Line::from(Span::styled(status, Style::default().fg(Color::Yellow))),
        None => Line::from(vec![
            Span::raw("Nav: "),
            Span::styled("j/k ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Details: "),
            Span::styled("Enter ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Filter: "),
            Span::styled("/ ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Action: "),
            Span::styled(
                "s(start) x(stop) r(restart) ",
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("| Quit: "),
            Span::styled("q", Style::default().fg(Color::Red)),
        ]),
    };

    let paragraph =
        Paragraph::new(help_text).block(Block::default().borders(Borders::ALL).title(" Controls "));

    f.render_widget(paragraph, area);
}

fn render_details(f: &mut Frame, service: &Service) {
    let area = centered_rect(60, 50, f.area());

    f.render_widget(Clear, area);

    let row = |label: &'static str, value: &str| {
        Line::from(vec![
            Span::styled(
                format!("{label:<14}"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(value.to_string()),
        ])
    };

    let content = vec![
        row("Id", &service.id),
        row("Name", &service.name),
        row("Description", &service.description),
        row("State", service.state.as_str()),
        row("Load", &service.load_state),
        row("Active", &service.active_state),
        row("Sub", &service.sub_state),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} (Esc to close) ", service.name));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceState;
    use ratatui::{Terminal, backend::TestBackend};

    fn service(name: &str, running: bool) -> Service {
        Service {
            id: format!("{name}.service"),
            name: name.to_string(),
            running,
            state: if running {
                ServiceState::Running
            } else {
                ServiceState::Stopped
            },
            description: "Test unit".into(),
            load_state: "loaded".into(),
            active_state: if running { "active" } else { "inactive" }.into(),
            sub_state: if running { "running" } else { "dead" }.into(),
        }
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_list_and_status() {
        let services = vec![service("ssh", true), service("cron", false)];
        let view = View {
            services: &services,
            filter: Filter::All,
            details: None,
            status: Some("stop cron.service: ok"),
        };
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        let mut state = ListState::default();
        state.select(Some(0));

        terminal.draw(|f| render(f, &view, &mut state)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("All Services"));
        assert!(text.contains("ssh"));
        assert!(text.contains("[stopped::dead]"));
        assert!(text.contains("stop cron.service: ok"));
    }

    #[test]
    fn renders_details_popup() {
        let services = vec![service("ssh", true)];
        let view = View {
            services: &services,
            filter: Filter::Running,
            details: Some(&services[0]),
            status: None,
        };
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut state = ListState::default();

        terminal.draw(|f| render(f, &view, &mut state)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Running Services"));
        assert!(text.contains("ssh.service"));
        assert!(text.contains("Test unit"));
    }

    #[test]
    fn centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 50, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 20);
    }
}
