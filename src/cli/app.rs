//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use kanban::config::BoardConfig;
use kanban::output::OutputMode;

/// kanban - Reactive project board
#[derive(Parser, Debug)]
#[command(
    name = "kanban",
    version,
    about = "Reactive project board with validated input and drag-and-drop",
    long_about = "Replay form submissions and drag gestures against a project board.\n\n\
                  Submissions are validated field by field before a project is created.\n\
                  Dragging a card onto another column changes the project's status."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Board configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a session script (reads stdin when no file is given)
    Run {
        /// Script file, one event per line
        script: Option<PathBuf>,
    },

    /// Validate a project submission without creating it
    Validate {
        /// Project title
        #[arg(short, long)]
        title: Option<String>,

        /// Project description
        #[arg(short, long)]
        description: Option<String>,

        /// Number of people assigned
        #[arg(short, long)]
        people: Option<String>,

        /// Extra field as key=value (repeatable)
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// Show the form schema
    Schema {
        /// Print the effective configuration as TOML instead
        #[arg(long)]
        toml: bool,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Run { script }) => {
            let config = BoardConfig::load(cli.config.as_deref())?;
            commands::run(&config, script.as_deref(), output_mode)
        },
        Some(Command::Validate {
            title,
            description,
            people,
            fields,
        }) => {
            let config = BoardConfig::load(cli.config.as_deref())?;
            let submission = commands::Submission {
                title,
                description,
                people,
                fields,
            };
            commands::validate(&config, submission, output_mode)
        },
        Some(Command::Schema { toml }) => {
            let config = BoardConfig::load(cli.config.as_deref())?;
            commands::schema(&config, toml, output_mode)
        },
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": kanban::VERSION
                    })
                );
            } else {
                println!("kanban v{}", kanban::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": kanban::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("kanban v{}", kanban::VERSION);
                println!("\nRun 'kanban --help' for usage");
                println!("Run 'kanban run session.txt' to replay a session");
            }
            Ok(())
        },
    }
}
