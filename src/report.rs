use chrono::{DateTime, Local};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::filter::{apply_filters, is_overdue};
use crate::models::{FilterSpec, Priority, Status};
use crate::stats::{compute_stats, Stats};
use crate::store::TaskStore;

/// Renders the visible tasks as a table followed by the stats line.
pub fn render_report(store: &TaskStore, spec: &FilterSpec, now: DateTime<Local>) -> String {
    let visible = apply_filters(store.tasks(), spec, now);
    let stats = compute_stats(store.tasks());

    if visible.is_empty() {
        let hint = if store.is_empty() {
            "Create your first task to get started!"
        } else {
            "Try adjusting your filters"
        };
        return format!("No tasks found. {}\n{}", hint, stats_line(&stats));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Shared").add_attribute(Attribute::Bold),
            Cell::new("Id").add_attribute(Attribute::Bold),
        ]);

    for t in visible {
        let overdue = is_overdue(t, now);
        let due = match t.due_date {
            Some(d) if overdue => format!("{} (overdue)", d.format("%Y-%m-%d")),
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => "-".to_string(),
        };
        let shared = t.shared_with.as_ref().map_or(0, Vec::len);
        let short_id: String = t.id.simple().to_string().chars().take(8).collect();

        let status_color = match t.status {
            Status::Completed => Color::Green,
            Status::InProgress => Color::Blue,
            Status::Todo => Color::Reset,
        };
        let priority_color = match t.priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Grey,
        };

        table.add_row(vec![
            Cell::new(&t.title),
            Cell::new(t.status.label()).fg(status_color),
            Cell::new(t.priority).fg(priority_color),
            Cell::new(due).fg(if overdue { Color::Red } else { Color::Reset }),
            Cell::new(if shared > 0 { shared.to_string() } else { String::new() }),
            Cell::new(short_id),
        ]);
    }

    format!("{table}\n{}", stats_line(&stats))
}

pub fn stats_line(stats: &Stats) -> String {
    format!(
        "Total: {} | To do: {} | In progress: {} | Completed: {}",
        stats.total, stats.todo, stats.in_progress, stats.completed
    )
}
