use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tizum::commands;
use tizum::config::Config;
use tizum::error::Result;
use tizum::logging::{self, LogTarget};
use tizum::output::{self, Format};
use tizum::service::TaskService;
use tizum::store::TaskStore;

#[derive(Parser)]
#[command(name = "tizum", version, about = "A small personal task tracker")]
struct Cli {
    /// Task database file (overrides TIZUM_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: Format,
    /// Log debug output (TIZUM_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task; all words are joined with spaces
    Add {
        #[arg(required = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// List tasks with their positions
    List,
    /// Flip a task between pending and done
    Toggle {
        /// 1-based position from `list`
        #[arg(allow_hyphen_values = true)]
        position: String,
    },
    /// Delete tasks by position (comma or space separated)
    Delete {
        #[arg(required = true, allow_hyphen_values = true)]
        positions: Vec<String>,
    },
    /// Replace a task's text
    Edit {
        /// 1-based position from `list`
        #[arg(allow_hyphen_values = true)]
        position: String,
        #[arg(required = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Open the interactive task list
    Tui,
    /// Show database, environment and version diagnostics
    Doctor,
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Settings shared by every command that needs the data directory.
struct Startup {
    db: Option<PathBuf>,
    verbose: bool,
    format: Format,
}

impl Startup {
    /// Resolve the data directory and install logging. The TUI logs to a
    /// file so log lines never land on the alternate screen.
    fn config(&self, log_to_file: bool) -> Result<Config> {
        let config = Config::load(self.db.clone())?;
        let target = if log_to_file {
            LogTarget::File(&config.log_path)
        } else {
            LogTarget::Stderr
        };
        if let Err(err) = logging::init(target, self.verbose) {
            output::report_error(&err, self.format);
        }
        Ok(config)
    }

    fn service(&self, log_to_file: bool) -> Result<TaskService> {
        let config = self.config(log_to_file)?;
        Ok(TaskService::new(TaskStore::open(&config.db_path)?))
    }
}

fn run(cli: Cli, format: Format) -> Result<()> {
    let startup = Startup {
        db: cli.db,
        verbose: cli.verbose,
        format,
    };

    let Some(command) = cli.command else {
        output::print_banner();
        println!("{}", output::USAGE);
        return Ok(());
    };

    match command {
        Commands::External(args) => {
            let name = args.first().map(String::as_str).unwrap_or_default();
            println!("Unknown command: {name}");
            Ok(())
        }
        Commands::Doctor => commands::doctor::run(&startup.config(false)?, format),
        Commands::Tui => tizum::tui::run(&startup.service(true)?),
        Commands::Add { text } => commands::add::run(&startup.service(false)?, &text, format),
        Commands::List => commands::list::run(&startup.service(false)?, format),
        Commands::Toggle { position } => {
            commands::toggle::run(&startup.service(false)?, &position, format)
        }
        Commands::Delete { positions } => {
            commands::delete::run(&startup.service(false)?, &positions, format)
        }
        Commands::Edit { position, text } => {
            commands::edit::run(&startup.service(false)?, &position, &text, format)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let format = cli.format;
    if let Err(err) = run(cli, format) {
        tracing::debug!(code = err.code(), "command failed");
        output::report_error(&err, format);
        if err.is_fatal() {
            std::process::exit(1);
        }
    }
}
