// src/main.rs
use anyhow::Result;
use clap::{Parser, Subcommand};

mod config;
mod jira;
mod prompt;
mod scripts;
mod task_sets;
mod templates;

use scripts::create::{CreateArgs, RunOutcome};

#[derive(Parser)]
#[command(name = "jisc")]
#[command(about = "Jira sub-task creator - add sub-tasks to a story from task sets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create sub-tasks for a story
    Create {
        /// Username to authenticate with the Jira instance
        #[arg(short, long)]
        user: Option<String>,
        /// Password to authenticate with the Jira instance
        #[arg(short, long)]
        password: Option<String>,
        /// Parent story to add the sub-tasks to (e.g. ABC-123)
        #[arg(short, long)]
        story: Option<String>,
        /// Project key of the story
        #[arg(short = 'k', long)]
        key: Option<String>,
        /// Add this single task to the story
        #[arg(short, long, conflicts_with = "file")]
        task: Option<String>,
        /// Task set name (see list-sets); otherwise a path to a task set file
        #[arg(short, long)]
        file: Option<String>,
        /// Add every task of the set without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// List the available task sets
    ListSets,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Create { user, password, story, key, task, file, yes } => {
            let args = CreateArgs { user, password, story, key, task, file, yes };
            if scripts::create::run(args).await? == RunOutcome::LockedOut {
                eprintln!();
                eprintln!("❌ Too many wrong attempts. Login into Jira manually and complete the captcha.");
                std::process::exit(1);
            }
        }
        Commands::ListSets => {
            scripts::list_sets::run()?;
        }
    }

    Ok(())
}
