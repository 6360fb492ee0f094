use ratatui::widgets::TableState;
use tracing::info;
use uuid::Uuid;

use crate::filter::apply_filters;
use crate::models::{FilterSpec, Priority, Status, Task, TaskPatch};
use crate::stats::{compute_stats, Stats};
use crate::store::TaskStore;
use super::form::{FormMode, TaskForm};
use super::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Form,
}

/// Dashboard state. Owns the store; every view reads from here and every
/// intent writes through the store's methods.
pub struct App {
    pub store: TaskStore,
    pub filters: FilterSpec,
    pub state: TableState,
    pub input_mode: InputMode,
    pub form: Option<TaskForm>,
    /// Transient success message, cleared on the next key press.
    pub notice: Option<String>,
    pub theme: Theme,
}

impl App {
    pub fn new(store: TaskStore, theme: Theme) -> App {
        let mut app = App {
            store,
            filters: FilterSpec::default(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            form: None,
            notice: None,
            theme,
        };
        app.clamp_selection();
        app
    }

    /// Tasks passing the current filters, newest first.
    pub fn visible(&self) -> Vec<&Task> {
        apply_filters(self.store.tasks(), &self.filters, self.store.now())
    }

    pub fn stats(&self) -> Stats {
        compute_stats(self.store.tasks())
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        let i = self.state.selected()?;
        self.visible().get(i).map(|t| t.id)
    }

    /// Keeps the selection inside the visible list after it changes.
    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= len {
                self.state.select(Some(len - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Selects the next visible task, wrapping around.
    pub fn next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous visible task, wrapping around.
    pub fn previous(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// The checkbox: completed tasks go back to todo, anything else is completed.
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        let Some(task) = self.store.get(id) else { return };
        let status = if task.status == Status::Completed {
            Status::Todo
        } else {
            Status::Completed
        };
        if self.store.update(id, TaskPatch::status(status)) {
            self.notice = Some(format!("Task marked as {}", status));
        }
        self.clamp_selection();
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        if self.store.delete(id) {
            info!(id = %id, "deleted from dashboard");
            self.notice = Some("Task deleted successfully".to_string());
        }
        self.clamp_selection();
    }

    /// Opens an empty form.
    pub fn start_create(&mut self) {
        self.form = Some(TaskForm::create());
        self.input_mode = InputMode::Form;
    }

    /// Opens the form pre-filled from the selected task.
    pub fn start_edit(&mut self) {
        let Some(id) = self.selected_id() else { return };
        if let Some(task) = self.store.get(id) {
            self.form = Some(TaskForm::edit(task));
            self.input_mode = InputMode::Form;
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    /// Validates the open form and applies it. On a validation error the form
    /// stays open with the error attached and nothing is mutated.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else { return };
        let input = match form.submit() {
            Ok(input) => input,
            Err(e) => {
                form.error = Some(e);
                return;
            }
        };
        let mode = form.mode;
        match mode {
            FormMode::Create => {
                self.store.create(input);
                self.state.select(Some(0));
                self.notice = Some("Task created successfully".to_string());
            }
            FormMode::Edit(id) => {
                if self.store.update(id, TaskPatch::replace_all(input)) {
                    self.notice = Some("Task updated successfully".to_string());
                }
            }
        }
        self.cancel_form();
        self.clamp_selection();
    }

    /// Replaces the filter spec wholesale.
    pub fn set_filters(&mut self, filters: FilterSpec) {
        self.filters = filters;
        self.clamp_selection();
    }

    pub fn cycle_status_filter(&mut self) {
        let mut f = self.filters;
        f.status = f.status.cycle(&Status::ALL);
        self.set_filters(f);
    }

    pub fn cycle_priority_filter(&mut self) {
        let mut f = self.filters;
        f.priority = f.priority.cycle(&[Priority::High, Priority::Medium, Priority::Low]);
        self.set_filters(f);
    }

    pub fn cycle_due_filter(&mut self) {
        let mut f = self.filters;
        f.due = f.due.cycle();
        self.set_filters(f);
    }

    pub fn reset_filters(&mut self) {
        self.set_filters(FilterSpec::default());
    }
}
