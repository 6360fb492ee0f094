pub mod app;
pub mod form;
pub mod theme;
pub mod ui;

use std::{error::Error, io};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use app::{App, InputMode};
use ui::ui;

/// Runs the dashboard until the user quits.
pub fn run_tui(mut app: App) -> Result<(), Box<dyn Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(tasks = app.store.len(), theme = app.theme.name, "dashboard started");
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "dashboard loop failed");
        return Err(err.into());
    }
    info!("dashboard closed");

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Windows reports releases too
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(app, key) {
                return Ok(());
            }
        }
    }
}

/// Dispatches one key press. Returns `true` when the user asked to quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.input_mode {
        InputMode::Normal => {
            app.notice = None;
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return true,
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char(' ') => app.toggle_selected(),
                KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                KeyCode::Char('a') => app.start_create(),
                KeyCode::Char('e') | KeyCode::Enter => app.start_edit(),
                KeyCode::Char('s') => app.cycle_status_filter(),
                KeyCode::Char('p') => app.cycle_priority_filter(),
                KeyCode::Char('f') => app.cycle_due_filter(),
                KeyCode::Char('x') => app.reset_filters(),
                _ => {}
            }
        }
        InputMode::Form => match key.code {
            KeyCode::Enter => app.submit_form(),
            KeyCode::Esc => app.cancel_form(),
            KeyCode::Tab | KeyCode::Down => {
                if let Some(form) = app.form.as_mut() {
                    form.next_field();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(form) = app.form.as_mut() {
                    form.prev_field();
                }
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(form) = app.form.as_mut() {
                    form.cycle(key.code == KeyCode::Right);
                }
            }
            KeyCode::Char(c) => {
                if let Some(form) = app.form.as_mut() {
                    form.input_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(form) = app.form.as_mut() {
                    form.backspace();
                }
            }
            _ => {}
        },
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    use crate::models::{Priority, Status};
    use crate::store::TaskStore;
    use super::theme::Theme;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn keyboard_create_edit_toggle_delete() {
        let mut app = App::new(TaskStore::default(), Theme::default());

        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Ship release");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        let task = &app.store.tasks()[0];
        assert_eq!(task.title, "Ship release");
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.priority, Priority::Low);

        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "E!");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.tasks()[0].title, "Ship releasE!");

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.store.tasks()[0].status, Status::Completed);
        assert!(app.notice.is_some());

        press(&mut app, KeyCode::Char('d'));
        assert!(app.store.is_empty());
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn escape_in_form_discards_input() {
        let mut app = App::new(TaskStore::default(), Theme::default());
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "q");
        assert!(!press(&mut app, KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.store.is_empty());
    }

    #[test]
    fn any_key_clears_notice() {
        let mut app = App::new(TaskStore::default(), Theme::default());
        app.notice = Some("Task deleted successfully".into());
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.notice, None);
    }
}
