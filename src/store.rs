use chrono::{DateTime, Local};
use tracing::debug;
use uuid::Uuid;

use crate::models::{Task, TaskInput, TaskPatch, PLACEHOLDER_OWNER};

/// Source of "now" for timestamps.
pub type Clock = fn() -> DateTime<Local>;

/// The authoritative, session-only task collection.
///
/// Tasks are kept newest-first. `create`, `update` and `delete` are the only
/// write surface; readers borrow the collection through [`TaskStore::tasks`].
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    owner: String,
    clock: Clock,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore::new(PLACEHOLDER_OWNER)
    }
}

impl TaskStore {
    /// Creates an empty store whose new tasks are owned by `owner`.
    pub fn new(owner: impl Into<String>) -> TaskStore {
        TaskStore::with_clock(owner, Local::now)
    }

    pub fn with_clock(owner: impl Into<String>, clock: Clock) -> TaskStore {
        TaskStore {
            tasks: Vec::new(),
            owner: owner.into(),
            clock,
        }
    }

    /// Current time as seen by this store.
    pub fn now(&self) -> DateTime<Local> {
        (self.clock)()
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Adds a new task at the front of the collection and returns it.
    pub fn create(&mut self, input: TaskInput) -> &Task {
        let now = (self.clock)();
        let task = Task {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
            user_id: self.owner.clone(),
            shared_with: input.shared_with,
        };
        debug!(id = %task.id, title = %task.title, "task created");
        self.tasks.insert(0, task);
        &self.tasks[0]
    }

    /// Merges `patch` into the task with `id` and refreshes `updated_at`.
    ///
    /// Returns `false` and changes nothing when no such task exists.
    pub fn update(&mut self, id: Uuid, patch: TaskPatch) -> bool {
        let now = (self.clock)();
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                patch.apply(task);
                // a clock that steps backwards must not break created <= updated
                task.updated_at = now.max(task.updated_at);
                debug!(id = %id, found = true, "task updated");
                true
            }
            None => {
                debug!(id = %id, found = false, "update ignored");
                false
            }
        }
    }

    /// Removes the task with `id`. Returns `false` when it was not present.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let len_before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let found = self.tasks.len() != len_before;
        debug!(id = %id, found, "task delete");
        found
    }
}
