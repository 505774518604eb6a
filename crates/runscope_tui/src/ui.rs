//! UI rendering for TUI.

use crate::{
    App, AppMode, CardSection, CardState, ChatView, LoadPhase, RunsFocus, RunsView, StepStatus, ViewKind,
    card_header, card_sections,
};
use chrono::{DateTime, Local, Utc};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Tabs,
        Wrap,
    },
};
use runscope_core::{ChatMessage, RunStatus};

/// Draw the whole dashboard.
#[tracing::instrument(skip_all)]
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Active view
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);
    match app.view {
        ViewKind::Runs => draw_runs_view(f, &app.runs, chunks[1]),
        ViewKind::Chat => draw_chat_view(f, &app.chat, chunks[1]),
    }
    draw_status_bar(f, app, chunks[2]);

    if let AppMode::ConfirmDelete(run_id) = &app.mode {
        draw_confirm_delete(f, run_id);
    }
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles = [ViewKind::Runs, ViewKind::Chat]
        .iter()
        .map(|view| format!("{} {}", view.index() + 1, view.title()));
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("Runscope"))
        .select(app.view.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let help = match (&app.mode, app.view) {
        (AppMode::ConfirmDelete(_), _) => "y: Confirm delete | any other key: Cancel",
        (AppMode::Browse, ViewKind::Runs) => {
            "↑↓: Navigate | ←→: Pane | Enter: Open | d: Delete | c: Copy workflow | f: Flagged | r: Reload | Tab: Chat | q: Quit"
        }
        (AppMode::Browse, ViewKind::Chat) => {
            "↑↓: Navigate | Enter: Select | x: Clear | PgUp/PgDn: Scroll | r: Reload | Tab: Runs | q: Quit"
        }
    };

    let mut spans = Vec::new();
    if app.is_copied() {
        spans.push(Span::styled(
            "Copied! ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(error) = app.current_error() {
        spans.push(Span::styled(
            format!("Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(message) = &app.status_message {
        spans.push(Span::raw(format!("{} ", message)));
    }
    spans.push(Span::styled(help, Style::default().fg(Color::DarkGray)));

    let status = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(status, area);
}

fn draw_runs_view(f: &mut Frame, runs: &RunsView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_run_list(f, runs, chunks[0]);
    draw_step_cards(f, runs, chunks[1]);
}

fn status_style(status: &RunStatus) -> Style {
    let color = match status {
        RunStatus::Success => Color::Green,
        RunStatus::InProgress => Color::Yellow,
        RunStatus::Failed => Color::Red,
        RunStatus::Other(_) => Color::Gray,
    };
    Style::default().fg(color)
}

fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

fn draw_run_list(f: &mut Frame, runs: &RunsView, area: Rect) {
    let title = if runs.filter().flagged_only {
        "Search Runs (flagged)".to_string()
    } else {
        "Search Runs".to_string()
    };
    let block = pane_block(title, *runs.focus() == RunsFocus::List);

    if runs.list_phase().is_loading() {
        f.render_widget(Paragraph::new("Loading runs...").block(block), area);
        return;
    }
    if runs.runs().is_empty() {
        let message = if *runs.list_phase() == LoadPhase::Loaded {
            "No runs found"
        } else {
            ""
        };
        f.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    let header = Row::new(vec!["Status", "Created", "User", "Query"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let selected_id = runs.selected().as_ref().map(|run| run.id.as_str());
    let rows: Vec<Row> = runs
        .runs()
        .iter()
        .map(|run| {
            let marker = if selected_id == Some(run.id.as_str()) {
                "▶ "
            } else {
                "  "
            };
            let flag = if run.is_flagged { " ⚑" } else { "" };
            Row::new(vec![
                Line::styled(format!("{}{}", marker, run.status), status_style(&run.status)),
                Line::raw(local_time(&run.created_at)),
                Line::raw(run.user_label().to_string()),
                Line::raw(format!(
                    "{}{}",
                    run.initial_query.as_deref().unwrap_or("No query available"),
                    flag
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(19),
            Constraint::Length(18),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = TableState::default().with_selected(Some(runs.cursor()));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_step_cards(f: &mut Frame, runs: &RunsView, area: Rect) {
    let focused = *runs.focus() == RunsFocus::Steps;
    let Some(run) = runs.selected() else {
        let block = pane_block("Steps".to_string(), focused);
        f.render_widget(
            Paragraph::new("Select a run to view its steps")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    };

    let name = run.name.as_deref().unwrap_or("Unnamed run");
    let block = pane_block(format!("{} ({})", name, run.short_id()), focused);

    if runs.detail_phase().is_loading() {
        f.render_widget(Paragraph::new("Loading steps...").block(block), area);
        return;
    }
    if runs.step_logs().is_empty() {
        f.render_widget(Paragraph::new("No steps recorded").block(block), area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut highlighted_line = 0usize;
    for (index, step) in runs.step_logs().iter().enumerate() {
        let status = StepStatus::of(step);
        let state = runs.card_state(index);
        let is_cursor = focused && index == runs.step_cursor();
        if index == runs.step_cursor() {
            highlighted_line = lines.len();
        }

        let (title, duration) = card_header(step);
        let toggle = match state {
            CardState::Collapsed => "▸",
            CardState::Expanded => "▾",
        };
        let status_color = match status {
            StepStatus::Succeeded => Color::Green,
            StepStatus::Failed => Color::Red,
        };
        let mut header_style = Style::default().add_modifier(Modifier::BOLD);
        if is_cursor {
            header_style = header_style.bg(Color::DarkGray);
        }
        let mut header = vec![
            Span::styled(format!("{} ", toggle), header_style),
            Span::styled(format!("{} ", status.icon()), header_style.fg(status_color)),
            Span::styled(title, header_style),
        ];
        if let Some(duration) = duration {
            header.push(Span::styled(
                format!("  {}", duration),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(header));

        if state == CardState::Expanded {
            for section in card_sections(step) {
                let title_style = match section {
                    CardSection::Error(_) => Style::default().fg(Color::Red),
                    _ => Style::default().fg(Color::Yellow),
                };
                lines.push(Line::styled(format!("    {}:", section.title()), title_style));
                lines.extend(
                    section
                        .body()
                        .lines()
                        .map(|line| Line::raw(format!("      {}", line))),
                );
            }
        }
        lines.push(Line::raw(""));
    }

    // Keep the highlighted card near the top third of the pane
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = highlighted_line.saturating_sub(visible / 3);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(paragraph, area);
}

fn draw_chat_view(f: &mut Frame, chat: &ChatView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(0)])
        .split(area);

    draw_user_list(f, chat, chunks[0]);
    draw_transcript(f, chat, chunks[1]);
}

fn draw_user_list(f: &mut Frame, chat: &ChatView, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Users");
    if chat.users_phase().is_loading() {
        f.render_widget(Paragraph::new("Loading users...").block(block), area);
        return;
    }

    let selected = chat.selected_user_id().as_deref();
    let items: Vec<ListItem> = chat
        .users()
        .iter()
        .map(|user| {
            let style = if selected == Some(user.user_id.as_str()) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Line::styled(user.display_name.clone(), style))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(chat.user_cursor()));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_transcript(f: &mut Frame, chat: &ChatView, area: Rect) {
    let title = match chat.selected_user() {
        Some(user) => format!("Chat History: {}", user.display_name),
        None => "Chat History".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if chat.selected_user_id().is_none() {
        f.render_widget(
            Paragraph::new("Select a user to view their chat history")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }
    if chat.messages_phase().is_loading() {
        f.render_widget(Paragraph::new("Loading messages...").block(block), area);
        return;
    }
    if chat.messages().is_empty() {
        f.render_widget(
            Paragraph::new("No messages found for this user").block(block),
            area,
        );
        return;
    }

    let lines: Vec<Line> = chat.messages().iter().flat_map(message_lines).collect();
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((chat.scroll(), 0));
    f.render_widget(paragraph, area);
}

fn message_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    let (alignment, color, who) = if message.is_from_user() {
        (Alignment::Right, Color::Cyan, "User")
    } else {
        (Alignment::Left, Color::Green, "Assistant")
    };

    let mut header = format!("{} · {}", who, local_time(&message.created_at));
    if let Some(kind) = &message.message_type {
        header.push_str(&format!(" [{}]", kind));
    }

    let mut lines = vec![
        Line::styled(header, Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(alignment),
    ];
    if let Some(text) = &message.content_text {
        lines.extend(
            text.lines()
                .map(|line| Line::raw(line.to_string()).alignment(alignment)),
        );
    }
    if let Some(json) = &message.content_json {
        let pretty = serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string());
        lines.extend(pretty.lines().map(|line| {
            Line::styled(line.to_string(), Style::default().fg(Color::DarkGray))
                .alignment(alignment)
        }));
    }
    lines.push(Line::raw(""));
    lines
}

fn draw_confirm_delete(f: &mut Frame, run_id: &str) {
    let area = centered_rect(50, 7, f.area());
    let text = vec![
        Line::raw(format!("Delete run {}?", run_id)),
        Line::raw(""),
        Line::styled(
            "This cannot be undone. Press y to confirm.",
            Style::default().fg(Color::Yellow),
        ),
    ];
    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Confirm Delete"),
        );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let scaled = u32::from(area.width) * u32::from(percent_x.min(100)) / 100;
    let width = u16::try_from(scaled).unwrap_or(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
