//! Command-line driver for the todolist core.
//!
//! # Responsibility
//! - Map one invocation to one user action on `TodoService`.
//! - Render the resulting visible list as plain text rows.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, warn};
use std::path::PathBuf;
use todolist_core::config::DEFAULT_DATA_FILE;
use todolist_core::{
    core_version, default_log_level, init_logging, open_service, JsonFileStore, ListEvent,
    SearchOrder, TodoConfig, TodoId, TodoRow, TodoService, TodoServiceError,
};

#[derive(Debug, Parser)]
#[command(name = "todolist", version, about = "Short to-do items kept in a local JSON file")]
struct Cli {
    /// JSON file holding the to-do records.
    #[arg(long, global = true, default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Row order for search results: timestamp|store
    #[arg(long, global = true, default_value = "timestamp")]
    search_order: SearchOrder,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every item, newest first.
    List,
    /// Add an item. Words are joined with single spaces.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Mark an item complete, or open again with --undo.
    Toggle {
        id: TodoId,
        #[arg(long)]
        undo: bool,
    },
    /// Delete an item.
    Delete { id: TodoId },
    /// Show only items containing QUERY, case-insensitively.
    Search { query: String },
    /// Print the core version.
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let command = cli.command.unwrap_or(Command::List);
    if let Command::Version = command {
        println!("todolist {}", core_version());
        return Ok(());
    }

    let config = TodoConfig {
        data_file: cli.data,
        search_order: cli.search_order,
        ..TodoConfig::default()
    };
    let mut service = open_service(&config)
        .with_context(|| format!("failed to open `{}`", config.data_file.display()))?;

    run(&mut service, command)?;
    render(&mut service);
    Ok(())
}

fn run(service: &mut TodoService<JsonFileStore>, command: Command) -> Result<()> {
    match command {
        Command::List | Command::Version => {}
        Command::Add { text } => match service.add(&text.join(" ")) {
            Ok(_) => {}
            Err(TodoServiceError::EmptyInput) => warn!("event=cli_add status=skipped"),
            Err(err) => return Err(err).context("failed to add item"),
        },
        Command::Toggle { id, undo } => {
            service
                .toggle(id, !undo)
                .with_context(|| format!("failed to toggle {id}"))?;
        }
        Command::Delete { id } => {
            service
                .delete(id)
                .with_context(|| format!("failed to delete {id}"))?;
        }
        Command::Search { query } => {
            service.search(&query).context("search failed")?;
        }
    }
    Ok(())
}

fn render(service: &mut TodoService<JsonFileStore>) {
    for row in service.rows() {
        println!("{}", format_row(row));
    }
    for event in service.take_post_render_events() {
        match event {
            ListEvent::ScrollToTop => debug!("event=cli_scroll_top status=ok"),
        }
    }
}

fn format_row(row: &TodoRow) -> String {
    let mark = if row.completed { 'x' } else { ' ' };
    format!("{}  [{mark}] {}", row.id, row.text)
}
