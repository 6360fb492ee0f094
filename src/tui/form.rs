use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use uuid::Uuid;

use crate::error::FormError;
use crate::models::{Priority, Status, Task, TaskInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Status,
    Priority,
    Due,
    SharedWith,
}

impl FormField {
    pub const ORDER: [FormField; 6] = [
        FormField::Title,
        FormField::Description,
        FormField::Status,
        FormField::Priority,
        FormField::Due,
        FormField::SharedWith,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Status => "Status",
            FormField::Priority => "Priority",
            FormField::Due => "Due (YYYY-MM-DD [HH:MM])",
            FormField::SharedWith => "Shared with (comma separated)",
        }
    }

    fn index(self) -> usize {
        FormField::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

/// State of the create/edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub due: String,
    pub shared_with: String,
    pub focus: FormField,
    pub error: Option<FormError>,
    /// Due date the edit form was opened with. Kept at full precision while
    /// the due text still reads as it was pre-filled.
    original_due: Option<DateTime<Local>>,
}

impl TaskForm {
    /// An empty form for a new task.
    pub fn create() -> TaskForm {
        TaskForm {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            status: Status::Todo,
            priority: Priority::Medium,
            due: String::new(),
            shared_with: String::new(),
            focus: FormField::Title,
            error: None,
            original_due: None,
        }
    }

    /// A form pre-populated from `task`.
    pub fn edit(task: &Task) -> TaskForm {
        TaskForm {
            mode: FormMode::Edit(task.id),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status,
            priority: task.priority,
            due: task.due_date.map(format_due).unwrap_or_default(),
            shared_with: task.shared_with.as_ref().map(|s| s.join(", ")).unwrap_or_default(),
            focus: FormField::Title,
            error: None,
            original_due: task.due_date,
        }
    }

    pub fn next_field(&mut self) {
        let i = self.focus.index();
        self.focus = FormField::ORDER[(i + 1) % FormField::ORDER.len()];
    }

    pub fn prev_field(&mut self) {
        let i = self.focus.index();
        self.focus = FormField::ORDER[(i + FormField::ORDER.len() - 1) % FormField::ORDER.len()];
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Due => Some(&mut self.due),
            FormField::SharedWith => Some(&mut self.shared_with),
            FormField::Status | FormField::Priority => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(buf) = self.focused_text() {
            buf.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buf) = self.focused_text() {
            buf.pop();
        }
    }

    /// Steps the focused choice field (status or priority).
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Status => self.status = step(&Status::ALL, self.status, forward),
            FormField::Priority => self.priority = step(&Priority::ALL, self.priority, forward),
            _ => {}
        }
    }

    /// Validates the fields and builds the payload.
    pub fn submit(&self) -> Result<TaskInput, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Ok(TaskInput {
            title: title.to_string(),
            description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date()?,
            shared_with: parse_shared(&self.shared_with),
        })
    }

    fn due_date(&self) -> Result<Option<DateTime<Local>>, FormError> {
        match self.original_due {
            Some(due) if self.due.trim() == format_due(due) => Ok(Some(due)),
            _ => parse_due(&self.due),
        }
    }
}

fn step<T: Copy + PartialEq>(order: &[T], current: T, forward: bool) -> T {
    let n = order.len();
    let i = order.iter().position(|v| *v == current).unwrap_or(0);
    if forward {
        order[(i + 1) % n]
    } else {
        order[(i + n - 1) % n]
    }
}

/// Parses the due-date input. Empty means no due date; a bare date means local midnight.
pub fn parse_due(input: &str) -> Result<Option<DateTime<Local>>, FormError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let naive = if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        dt
    } else if let Some(dt) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        dt
    } else {
        return Err(FormError::InvalidDueDate(input.to_string()));
    };
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(Some)
        .ok_or_else(|| FormError::InvalidDueDate(input.to_string()))
}

/// Splits a comma-separated id list, dropping blanks. Nothing left means `None`.
pub fn parse_shared(input: &str) -> Option<Vec<String>> {
    let ids: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

fn format_due(due: DateTime<Local>) -> String {
    if due.hour() == 0 && due.minute() == 0 {
        due.format("%Y-%m-%d").to_string()
    } else {
        due.format("%Y-%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::models::TaskPatch;
    use crate::store::TaskStore;

    #[test]
    fn empty_title_is_rejected() {
        let mut form = TaskForm::create();
        form.title = "   ".into();
        assert_eq!(form.submit(), Err(FormError::EmptyTitle));
    }

    #[test]
    fn bad_due_date_is_rejected() {
        let mut form = TaskForm::create();
        form.title = "Pay rent".into();
        form.due = "next tuesday".into();
        assert_eq!(form.submit(), Err(FormError::InvalidDueDate("next tuesday".into())));
    }

    #[test]
    fn submit_trims_and_drops_blank_fields() {
        let mut form = TaskForm::create();
        form.title = "  Write report ".into();
        form.description = "   ".into();
        form.shared_with = " alice, ,bob ,".into();
        form.due = "2025-03-04".into();

        let input = form.submit().unwrap();
        assert_eq!(input.title, "Write report");
        assert_eq!(input.description, None);
        assert_eq!(input.shared_with, Some(vec!["alice".to_string(), "bob".to_string()]));
        let due = input.due_date.unwrap();
        assert_eq!(due.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!((due.hour(), due.minute()), (0, 0));
    }

    #[test]
    fn due_accepts_time_of_day() {
        let due = parse_due("2025-03-04 17:30").unwrap().unwrap();
        assert_eq!((due.hour(), due.minute()), (17, 30));
        assert_eq!(parse_due("").unwrap(), None);
    }

    #[test]
    fn edit_form_round_trips_task_fields() {
        let mut store = TaskStore::default();
        let id = store
            .create(TaskInput {
                title: "Plan trip".into(),
                description: Some("book flights".into()),
                status: Status::InProgress,
                priority: Priority::High,
                due_date: parse_due("2025-06-01 09:15").unwrap(),
                shared_with: Some(vec!["sam".into(), "kim".into()]),
            })
            .id;
        let task = store.get(id).unwrap();

        let form = TaskForm::edit(task);
        assert_eq!(form.mode, FormMode::Edit(id));
        assert_eq!(form.due, "2025-06-01 09:15");
        assert_eq!(form.shared_with, "sam, kim");

        let input = form.submit().unwrap();
        assert_eq!(input.description.as_deref(), Some("book flights"));
        assert_eq!(input.due_date, task.due_date);
        assert_eq!(input.shared_with, task.shared_with);
    }

    #[test]
    fn editing_title_keeps_due_seconds() {
        let mut store = TaskStore::default();
        let due = Local.with_ymd_and_hms(2030, 1, 2, 9, 0, 45).unwrap();
        let id = store
            .create(TaskInput {
                title: "Renew passport".into(),
                due_date: Some(due),
                ..TaskInput::default()
            })
            .id;

        let mut form = TaskForm::edit(store.get(id).unwrap());
        assert_eq!(form.due, "2030-01-02 09:00");
        form.title.push_str(" and visa");
        let input = form.submit().unwrap();
        assert!(store.update(id, TaskPatch::replace_all(input)));

        let task = store.get(id).unwrap();
        assert_eq!(task.title, "Renew passport and visa");
        assert_eq!(task.due_date, Some(due));

        let mut form = TaskForm::edit(task);
        form.due = "2030-01-03".into();
        let moved = form.submit().unwrap().due_date.unwrap();
        assert_eq!(moved.date_naive(), NaiveDate::from_ymd_opt(2030, 1, 3).unwrap());
        assert_eq!(moved.second(), 0);
    }

    #[test]
    fn typing_only_reaches_text_fields() {
        let mut form = TaskForm::create();
        form.input_char('a');
        form.next_field();
        form.next_field();
        assert_eq!(form.focus, FormField::Status);
        form.input_char('z');
        form.cycle(true);
        assert_eq!(form.status, Status::InProgress);
        form.cycle(false);
        form.cycle(false);
        assert_eq!(form.status, Status::Completed);
        assert_eq!(form.title, "a");

        form.prev_field();
        form.prev_field();
        form.prev_field();
        assert_eq!(form.focus, FormField::SharedWith);
    }
}
