use chrono::{Duration, Local};

use taskboard::models::{DueFilter, FilterSpec, Priority, Selector, Status, TaskInput};
use taskboard::report::{render_report, stats_line};
use taskboard::stats::{compute_stats, Stats};
use taskboard::store::TaskStore;

fn store_with(statuses: &[Status]) -> TaskStore {
    let mut store = TaskStore::default();
    for (i, status) in statuses.iter().enumerate() {
        store.create(TaskInput {
            title: format!("Task {}", i + 1),
            status: *status,
            ..TaskInput::default()
        });
    }
    store
}

#[test]
fn test_stats_counts_by_status() {
    let store = store_with(&[
        Status::Todo,
        Status::Todo,
        Status::InProgress,
        Status::Completed,
        Status::Completed,
    ]);
    assert_eq!(
        compute_stats(store.tasks()),
        Stats {
            total: 5,
            todo: 2,
            in_progress: 1,
            completed: 2,
        }
    );
}

#[test]
fn test_stats_empty() {
    assert_eq!(compute_stats(&[]), Stats::default());
}

#[test]
fn test_stats_follow_mutations() {
    let mut store = store_with(&[Status::Todo, Status::Todo]);
    let id = store.tasks()[0].id;
    store.update(id, taskboard::models::TaskPatch::status(Status::Completed));
    let stats = compute_stats(store.tasks());
    assert_eq!((stats.todo, stats.completed), (1, 1));

    store.delete(id);
    assert_eq!(compute_stats(store.tasks()).total, 1);
}

#[test]
fn test_report_lists_visible_tasks_and_full_stats() {
    let mut store = store_with(&[Status::Todo, Status::InProgress, Status::Completed]);
    store.create(TaskInput {
        title: "Late invoice".into(),
        priority: Priority::High,
        due_date: Some(Local::now() - Duration::days(2)),
        ..TaskInput::default()
    });

    let spec = FilterSpec {
        status: Selector::Only(Status::Todo),
        ..FilterSpec::default()
    };
    let out = render_report(&store, &spec, Local::now());
    assert!(out.contains("Late invoice"));
    assert!(out.contains("(overdue)"));
    assert!(out.contains("Task 1"));
    assert!(!out.contains("Task 2"));
    assert!(out.contains("Total: 4 | To do: 2 | In progress: 1 | Completed: 1"));
}

#[test]
fn test_report_empty_messages() {
    let empty = TaskStore::default();
    let out = render_report(&empty, &FilterSpec::default(), Local::now());
    assert!(out.starts_with("No tasks found. Create your first task to get started!"));

    let store = store_with(&[Status::Todo]);
    let spec = FilterSpec {
        due: DueFilter::Overdue,
        status: Selector::Only(Status::Completed),
        ..FilterSpec::default()
    };
    let out = render_report(&store, &spec, Local::now());
    assert!(out.starts_with("No tasks found. Try adjusting your filters"));
    assert!(out.ends_with(&stats_line(&compute_stats(store.tasks()))));
}
