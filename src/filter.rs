use chrono::{DateTime, Local};

use crate::models::{DueFilter, FilterSpec, Status, Task};

/// Decides whether `task` belongs in the visible list under `spec`.
///
/// A task without a due date is never excluded by the due-date clause.
/// `today` compares local calendar days, not instants.
pub fn matches(task: &Task, spec: &FilterSpec, now: DateTime<Local>) -> bool {
    if !spec.status.admits(&task.status) {
        return false;
    }
    if !spec.priority.admits(&task.priority) {
        return false;
    }
    if let Some(due) = task.due_date {
        match spec.due {
            DueFilter::All => {}
            DueFilter::Today => {
                if due.date_naive() != now.date_naive() {
                    return false;
                }
            }
            DueFilter::Overdue => {
                if due >= now {
                    return false;
                }
            }
            DueFilter::Upcoming => {
                if due <= now {
                    return false;
                }
            }
        }
    }
    true
}

/// The visible subset of `tasks`, in collection order.
pub fn apply_filters<'a>(tasks: &'a [Task], spec: &FilterSpec, now: DateTime<Local>) -> Vec<&'a Task> {
    tasks.iter().filter(|t| matches(t, spec, now)).collect()
}

/// True when the task is past due and still open. Recomputed on every call.
pub fn is_overdue(task: &Task, now: DateTime<Local>) -> bool {
    task.status != Status::Completed && task.due_date.is_some_and(|due| due < now)
}
