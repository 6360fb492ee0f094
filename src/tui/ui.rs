use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::filter::is_overdue;
use crate::models::{DueFilter, Selector, Status, Task};
use super::app::{App, InputMode};
use super::form::{FormField, FormMode, TaskForm};
use super::theme::Theme;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Help
        ].as_ref())
        .split(f.area());

    render_header(f, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)].as_ref())
        .split(chunks[1]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Filters
            Constraint::Length(6), // Stats
            Constraint::Min(0),
        ].as_ref())
        .split(body[0]);

    render_filters(f, app, sidebar[0]);
    render_stats(f, app, sidebar[1]);
    render_task_list(f, app, body[1]);
    render_help(f, app, chunks[2]);

    if app.input_mode == InputMode::Form {
        if let Some(form) = &app.form {
            render_form(f, form, &app.theme);
        }
    }
}

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(title, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)))
}

/// Title on the left, the session profile on the right.
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = panel("Task Manager", theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let profile = Paragraph::new(Line::from(vec![
        Span::styled("Signed in as ", Style::default().fg(theme.dim)),
        Span::styled(app.store.owner().to_string(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(profile, inner);
}

fn filter_line<'a>(label: &'a str, value: String, active: bool, theme: &Theme) -> Line<'a> {
    let value_style = if active {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    Line::from(vec![
        Span::styled(label, Style::default().fg(theme.dim)),
        Span::styled(value, value_style),
    ])
}

fn render_filters(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let spec = &app.filters;
    let lines = vec![
        filter_line("Status:   ", spec.status.to_string(), spec.status != Selector::All, theme),
        filter_line("Priority: ", spec.priority.to_string(), spec.priority != Selector::All, theme),
        filter_line("Due:      ", spec.due.to_string(), spec.due != DueFilter::All, theme),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("Filters", theme)), area);
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let stats = app.stats();
    let row = |label: &'static str, n: usize, color: Color| {
        Line::from(vec![
            Span::styled(format!("{:<13}", label), Style::default().fg(theme.dim)),
            Span::styled(n.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    };
    let lines = vec![
        row("Total", stats.total, theme.text),
        row("To do", stats.todo, theme.todo),
        row("In progress", stats.in_progress, theme.in_progress),
        row("Completed", stats.completed, theme.completed),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("Stats", theme)), area);
}

/// One two-line row per task: title/description, badges, due date and sharing.
fn task_card(t: &Task, overdue: bool, theme: &Theme) -> Row<'static> {
    let done = t.status == Status::Completed;

    let checkbox = if done { "[x]" } else { "[ ]" };
    let title_style = if done {
        Style::default().fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    };
    let mut title_lines = vec![Line::from(Span::styled(t.title.clone(), title_style))];
    if let Some(desc) = &t.description {
        title_lines.push(Line::from(Span::styled(desc.clone(), Style::default().fg(theme.dim))));
    }

    let mut status_lines = vec![Line::from(Span::styled(
        t.status.label(),
        Style::default().fg(theme.status_color(t.status)),
    ))];
    if overdue {
        status_lines.push(Line::from(Span::styled(
            "Overdue",
            Style::default().fg(theme.alert).add_modifier(Modifier::BOLD),
        )));
    }

    let due_style = Style::default().fg(if overdue { theme.alert } else { theme.text });
    let mut due_lines = vec![Line::from(Span::styled(
        t.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        due_style,
    ))];
    if let Some(shared) = t.shared_with.as_ref().filter(|s| !s.is_empty()) {
        due_lines.push(Line::from(Span::styled(
            format!("shared: {}", shared.len()),
            Style::default().fg(theme.dim),
        )));
    }

    let row_style = if overdue {
        Style::default().fg(theme.alert)
    } else {
        Style::default()
    };

    Row::new(vec![
        Cell::from(checkbox),
        Cell::from(Text::from(title_lines)),
        Cell::from(Span::styled(
            t.priority.as_str(),
            Style::default().fg(theme.priority_color(t.priority)),
        )),
        Cell::from(Text::from(status_lines)),
        Cell::from(Text::from(due_lines)),
    ])
    .style(row_style)
    .height(2)
}

fn render_task_list(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let now = app.store.now();
    let visible = app.visible();

    if visible.is_empty() {
        let hint = if app.store.is_empty() {
            "Create your first task to get started!"
        } else {
            "Try adjusting your filters"
        };
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("No tasks found", Style::default().fg(theme.text).add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(hint, Style::default().fg(theme.dim))),
        ];
        let empty = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(panel("Tasks (0)", &theme));
        f.render_widget(empty, area);
        return;
    }

    let title = format!("Tasks ({})", visible.len());
    let rows: Vec<Row> = visible
        .iter()
        .map(|t| task_card(t, is_overdue(t, now), &theme))
        .collect();
    drop(visible);

    let widths = [
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(vec!["", "Title", "Priority", "Status", "Due"])
            .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(panel(&title, &theme))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(theme.selection_bg))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_help(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = match (&app.notice, app.input_mode) {
        (_, InputMode::Form) => Line::from(Span::styled(
            "Tab/↓: Next field | Shift-Tab/↑: Prev | ←/→: Change choice | Enter: Save | Esc: Cancel",
            Style::default().fg(theme.dim),
        )),
        (Some(notice), InputMode::Normal) => Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(theme.notice).add_modifier(Modifier::BOLD),
        )),
        (None, InputMode::Normal) => Line::from(Span::styled(
            "q: Quit | a: Add | e: Edit | Space: Done | d: Del | s: Status | p: Priority | f: Due | x: Clear filters",
            Style::default().fg(theme.dim),
        )),
    };
    let help = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(help, area);
}

fn render_form(f: &mut Frame, form: &TaskForm, theme: &Theme) {
    let area = centered_rect(60, 10, f.area());
    f.render_widget(Clear, area);

    let title = match form.mode {
        FormMode::Create => "Create New Task",
        FormMode::Edit(_) => "Edit Task",
    };

    let mut lines: Vec<Line> = FormField::ORDER
        .iter()
        .map(|field| {
            let value = match field {
                FormField::Title => form.title.clone(),
                FormField::Description => form.description.clone(),
                FormField::Status => format!("< {} >", form.status.label()),
                FormField::Priority => format!("< {} >", form.priority),
                FormField::Due => form.due.clone(),
                FormField::SharedWith => form.shared_with.clone(),
            };
            let focused = *field == form.focus;
            let label_style = if focused {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.dim)
            };
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(format!("{:<31}", field.label()), label_style),
                Span::styled(format!("{}{}", value, cursor), Style::default().fg(theme.text)),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(err.to_string(), Style::default().fg(theme.alert))));
    }

    let input = Paragraph::new(lines).block(panel(title, theme));
    f.render_widget(input, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(r.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(r.height.saturating_sub(height) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
