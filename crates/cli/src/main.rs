//! codebrain CLI: the main entry point.
//!
//! Commands:
//! - `init`:       Create the `.claude/` brain for this project
//! - `start`:      Open a session and print the session prompt
//! - `status`:     Show what the brain knows right now
//! - `checkpoint`: Save context and log a checkpoint
//! - `context`:    Inspect or patch the context document
//! - `todo`:       Manage the project checklist
//! - `decide`:     Record an architectural decision
//! - `learn`:      Record a code-style pattern
//! - `remember` / `recall`: Solution memory
//! - `sync`:       Refresh vendor specs
//! - `config`:     Show tool configuration

use clap::{Parser, Subcommand};

mod commands;
mod prompt;

#[derive(Parser)]
#[command(
    name = "codebrain",
    about = "codebrain — persistent project memory for coding assistants",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the brain in the current project
    Init {
        /// Project name (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,

        /// Reset the context document even if one exists
        #[arg(long)]
        force: bool,
    },

    /// Start a session: show context and print the session prompt
    Start,

    /// Show brain status
    Status,

    /// Save a checkpoint
    Checkpoint {
        /// Checkpoint message
        message: Option<String>,
    },

    /// Inspect or update the context document
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Manage TODOs
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },

    /// Record an architectural decision
    Decide {
        /// What was decided
        title: String,

        /// Why
        #[arg(short, long)]
        reasoning: String,

        /// Alternatives that were considered (repeatable)
        #[arg(short, long = "alternative")]
        alternatives: Vec<String>,
    },

    /// Record a learned code-style pattern
    Learn {
        /// Pattern category (e.g. naming, errors)
        category: String,

        /// The pattern itself
        pattern: String,

        /// An example of the pattern
        #[arg(short, long)]
        example: Option<String>,
    },

    /// Remember how a problem was solved
    Remember {
        problem: String,
        solution: String,
    },

    /// Find remembered solutions to similar problems
    Recall {
        problem: String,
    },

    /// Detect the project stack and refresh vendor specs
    Sync {
        /// Only refresh specs that are stale
        #[arg(long)]
        stale_only: bool,
    },

    /// Tool configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ContextAction {
    /// Print the context document
    Show,

    /// Set a value by dotted key (e.g. `current_state.working_on`)
    Set {
        key: String,
        /// Parsed as YAML, so `true` and `3` keep their types
        value: String,
    },
}

#[derive(Subcommand)]
enum TodoAction {
    /// Add a TODO
    Add {
        text: String,

        /// high, normal or low
        #[arg(short, long, default_value = "normal")]
        priority: String,
    },

    /// Mark a TODO as done
    Done {
        id: u64,
    },

    /// List TODOs
    List {
        /// Include completed TODOs
        #[arg(short, long)]
        all: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init { name, force } => commands::init::run(name, force).await?,
        Commands::Start => commands::start::run().await?,
        Commands::Status => commands::status::run().await?,
        Commands::Checkpoint { message } => commands::checkpoint::run(message).await?,
        Commands::Context { action } => match action {
            ContextAction::Show => commands::context::show().await?,
            ContextAction::Set { key, value } => commands::context::set(&key, &value).await?,
        },
        Commands::Todo { action } => match action {
            TodoAction::Add { text, priority } => commands::todo::add(&text, &priority).await?,
            TodoAction::Done { id } => commands::todo::done(id).await?,
            TodoAction::List { all } => commands::todo::list(all).await?,
        },
        Commands::Decide {
            title,
            reasoning,
            alternatives,
        } => commands::decide::run(title, reasoning, alternatives).await?,
        Commands::Learn {
            category,
            pattern,
            example,
        } => commands::learn::run(&category, &pattern, example.as_deref()).await?,
        Commands::Remember { problem, solution } => {
            commands::solution::remember(&problem, &solution).await?
        }
        Commands::Recall { problem } => commands::solution::recall(&problem).await?,
        Commands::Sync { stale_only } => commands::sync::run(stale_only).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
        },
    }

    Ok(())
}
