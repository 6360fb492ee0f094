use crate::models::{Status, Task};

/// Per-status task counts over the whole, unfiltered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
}

pub fn compute_stats(tasks: &[Task]) -> Stats {
    tasks.iter().fold(
        Stats {
            total: tasks.len(),
            ..Stats::default()
        },
        |mut stats, t| {
            match t.status {
                Status::Todo => stats.todo += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::Completed => stats.completed += 1,
            }
            stats
        },
    )
}
