use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseError;

/// Owner id stamped on new tasks until real sessions exist.
pub const PLACEHOLDER_OWNER: &str = "current-user";

/// Workflow state of a task.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }

    /// Human label, e.g. `in progress`.
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in progress",
            Status::Completed => "completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(Status::Todo),
            "in-progress" | "in_progress" | "inprogress" => Ok(Status::InProgress),
            "completed" | "done" => Ok(Status::Completed),
            _ => Err(ParseError {
                kind: "status",
                value: s.to_string(),
                expected: "todo, in-progress, completed",
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParseError {
                kind: "priority",
                value: s.to_string(),
                expected: "low, medium, high",
            }),
        }
    }
}

/// Represents a single task on the board.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    /// Unique identifier, assigned at creation and never changed.
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Local>>,
    pub created_at: DateTime<Local>,
    /// Refreshed on every mutation; never earlier than `created_at`.
    pub updated_at: DateTime<Local>,
    /// Owner id. A placeholder for now, nothing enforces ownership.
    pub user_id: String,
    /// Display-only list of collaborators.
    #[serde(default)]
    pub shared_with: Option<Vec<String>>,
}

/// Everything a task form submits: the task minus identity, timestamps and owner.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Local>>,
    #[serde(default)]
    pub shared_with: Option<Vec<String>>,
}

/// A shallow partial update. `None` leaves a field untouched; for optional
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<DateTime<Local>>>,
    pub shared_with: Option<Option<Vec<String>>>,
}

impl TaskPatch {
    pub fn status(status: Status) -> Self {
        TaskPatch {
            status: Some(status),
            ..TaskPatch::default()
        }
    }

    /// A patch replacing every user-editable field, as an edit form submits.
    pub fn replace_all(input: TaskInput) -> Self {
        TaskPatch {
            title: Some(input.title),
            description: Some(input.description),
            status: Some(input.status),
            priority: Some(input.priority),
            due_date: Some(input.due_date),
            shared_with: Some(input.shared_with),
        }
    }

    pub(crate) fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due) = self.due_date {
            task.due_date = due;
        }
        if let Some(shared) = self.shared_with {
            task.shared_with = shared;
        }
    }
}

/// Either a single value or `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    /// True when this selector lets `value` through.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }
}

impl<T: Copy> Selector<T> {
    /// Steps through `all`, then each value in `order`, then back to `all`.
    pub fn cycle(self, order: &[T]) -> Self
    where
        T: PartialEq,
    {
        match self {
            Selector::All => order.first().map_or(Selector::All, |v| Selector::Only(*v)),
            Selector::Only(current) => {
                let pos = order.iter().position(|v| *v == current);
                match pos.and_then(|i| order.get(i + 1)) {
                    Some(next) => Selector::Only(*next),
                    None => Selector::All,
                }
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Only(v) => write!(f, "{}", v),
        }
    }
}

impl<T: FromStr<Err = ParseError>> FromStr for Selector<T> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Selector::All)
        } else {
            s.parse().map(Selector::Only)
        }
    }
}

/// Due-date window applied by the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueFilter {
    #[default]
    All,
    Today,
    Overdue,
    Upcoming,
}

impl DueFilter {
    pub const ORDER: [DueFilter; 4] = [
        DueFilter::All,
        DueFilter::Today,
        DueFilter::Overdue,
        DueFilter::Upcoming,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DueFilter::All => "all",
            DueFilter::Today => "today",
            DueFilter::Overdue => "overdue",
            DueFilter::Upcoming => "upcoming",
        }
    }

    pub fn cycle(self) -> Self {
        let i = DueFilter::ORDER.iter().position(|d| *d == self).unwrap_or(0);
        DueFilter::ORDER[(i + 1) % DueFilter::ORDER.len()]
    }
}

impl fmt::Display for DueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DueFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(DueFilter::All),
            "today" => Ok(DueFilter::Today),
            "overdue" => Ok(DueFilter::Overdue),
            "upcoming" => Ok(DueFilter::Upcoming),
            _ => Err(ParseError {
                kind: "due filter",
                value: s.to_string(),
                expected: "all, today, overdue, upcoming",
            }),
        }
    }
}

/// The status/priority/due criteria currently applied to the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSpec {
    pub status: Selector<Status>,
    pub priority: Selector<Priority>,
    pub due: DueFilter,
}

impl FilterSpec {
    pub fn is_unfiltered(&self) -> bool {
        *self == FilterSpec::default()
    }
}
