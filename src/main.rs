use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use taskboard::config::Config;
use taskboard::logging::{init_logging, LogSink};
use taskboard::models::{DueFilter, FilterSpec, Priority, Selector, Status};
use taskboard::report::render_report;
use taskboard::seed::session_store;
use taskboard::tui::app::App;
use taskboard::tui::run_tui;
use taskboard::tui::theme::{Theme, THEME_NAMES};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Personal task dashboard for the terminal", long_about = None)]
struct Cli {
    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Theme name (overrides config)
    #[arg(long, global = true)]
    theme: Option<String>,
    /// Session owner id (overrides config)
    #[arg(long, global = true)]
    owner: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard
    Ui {
        /// JSON file of tasks to start the session with
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Print the filtered task list and stats
    List {
        /// JSON file of tasks to start the session with
        #[arg(long)]
        seed: Option<PathBuf>,
        /// all, todo, in-progress, completed
        #[arg(short, long, default_value = "all")]
        status: Selector<Status>,
        /// all, low, medium, high
        #[arg(short, long, default_value = "all")]
        priority: Selector<Priority>,
        /// all, today, overdue, upcoming
        #[arg(short, long, default_value = "all")]
        due: DueFilter,
    },
    /// List built-in themes
    Themes,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: Shell,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(owner) = cli.owner {
        config.owner = owner;
    }

    match cli.command {
        Some(Commands::List { seed, status, priority, due }) => {
            init_logging(config.log_level.as_deref(), LogSink::Stderr);
            let store = session_store(&config.owner, seed.as_deref())?;
            let spec = FilterSpec { status, priority, due };
            println!("{}", render_report(&store, &spec, Local::now()));
        }
        Some(Commands::Themes) => {
            for name in THEME_NAMES {
                let marker = if name == config.theme { " (current)" } else { "" };
                println!("{}{}", name, marker);
            }
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "taskboard", &mut io::stdout());
        }
        Some(Commands::Ui { seed }) => open_dashboard(&config, seed)?,
        None => open_dashboard(&config, None)?,
    }
    Ok(())
}

fn open_dashboard(config: &Config, seed: Option<PathBuf>) -> anyhow::Result<()> {
    init_logging(config.log_level.as_deref(), LogSink::File(config.log_file.as_deref()));
    let store = session_store(&config.owner, seed.as_deref())?;
    let theme = Theme::from_config(&config.theme, &config.colors);
    run_tui(App::new(store, theme)).map_err(|e| anyhow!("dashboard failed: {e}"))
}
