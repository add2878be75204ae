use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use taskaid::config::load_config;
use taskaid::logging::{TracingLogger, error_chain, init_tracing};
use taskaid::model::{ReminderStatus, TaskItem, default_state, parse_due_date};
use taskaid::store::{FallbackReason, StateStore};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "taskaid", about = "Local state store for the desktop task tracker")]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base directory that holds the application folder.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Path,
    Show,
    Status,
    Reset,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "09:00:00")]
        time: NaiveTime,
    },
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    let store = StateStore::new(&config, Arc::new(TracingLogger))?;

    match cli.command {
        Commands::Path => {
            println!("{}", store.data_folder_path().display());
            println!("{}", store.state_file_path().display());
        }
        Commands::Show => {
            let state = store.load_state();
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::Status => {
            let outcome = store.load_outcome();
            match outcome.fallback_reason() {
                None => println!("loaded"),
                Some(FallbackReason::Missing) => {
                    println!("no state file yet; default state in use");
                }
                Some(FallbackReason::Corrupt(err)) => {
                    println!(
                        "state file unusable; default state in use: {}",
                        error_chain(err)
                    );
                }
            }
            println!("{} tasks", outcome.state().tasks.len());
        }
        Commands::Reset => {
            store.save_state(&default_state())?;
            info!(path = %store.state_file_path().display(), "state reset");
        }
        Commands::Add { name, date, time } => {
            let due_date = parse_due_date(&date)
                .with_context(|| format!("invalid --date {date:?}, expected YYYY-MM-DD"))?;
            let mut state = store.load_state();
            state.tasks.push(TaskItem {
                name,
                due_date,
                due_time: time,
                reminder_status: ReminderStatus::None,
                reminder_label: "Not set".to_string(),
            });
            store.save_state(&state)?;
            info!(tasks = state.tasks.len(), "task added");
        }
    }

    Ok(())
}
