//! # Taskboard
//!
//! A terminal dashboard for personal tasks: create, edit and delete tasks,
//! tag them with a status and a priority, track due dates, and narrow the
//! list with filters. Everything lives in memory for the length of a session.
//!
//! ## Features
//!
//! *   **Task Store**: newest-first collection with create/update/delete as its only write surface.
//! *   **Filters**: status, priority and due-date windows (`today`, `overdue`, `upcoming`).
//! *   **Overdue flag**: derived on every render from the wall clock, never stored.
//! *   **Stats**: per-status counts over the whole collection.
//! *   **Themes**: one dashboard, several looks (`classic`, `midnight`, `paper`).
//!
//! ## Usage
//!
//! ```bash
//! # Open the dashboard
//! taskboard
//!
//! # Start with some tasks loaded from a JSON file
//! taskboard ui --seed tasks.json
//!
//! # Print the filtered list as a table
//! taskboard list --seed tasks.json --status todo --due overdue
//! ```
//!
//! #### Dashboard Key Bindings
//!
//! *   `q`: Quit
//! *   `a`: Create task
//! *   `e` / `Enter`: Edit selected task
//! *   `Space`: Toggle completed
//! *   `d`: Delete selected task
//! *   `s` / `p` / `f`: Cycle status / priority / due filter
//! *   `x`: Clear filters
//!
//! ## Configuration
//!
//! `~/.config/taskboard/config.toml` (override with `TASKBOARD_CONFIG` or `--config`):
//!
//! ```toml
//! owner = "robin"
//! theme = "midnight"
//! log_level = "debug"
//! log_file = "/tmp/taskboard.log"
//!
//! [colors]
//! alert = "#FF0000"
//! ```
//!
//! Set `TASKBOARD_LOG` to override the log filter.

pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod report;
pub mod seed;
pub mod stats;
pub mod store;
pub mod tui;
