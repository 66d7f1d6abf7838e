//! certify CLI — the console front end of the certification portal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "certify", version, about = "Console MCQ certification manager")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive portal (default)
    Run {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Catalog file to seed courses from (overrides the config)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Validate a course catalog TOML file
    Validate {
        /// Path to catalog file
        #[arg(long)]
        catalog: PathBuf,
    },

    /// List the courses the portal would start with
    ListCourses {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Catalog file (overrides the config)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Create a starter config and example catalog
    Init,
}

fn main() {
    // Logs go to stderr so the menu on stdout stays readable.
    let filter = match "certify=warn".parse() {
        Ok(directive) => tracing_subscriber::EnvFilter::from_default_env().add_directive(directive),
        Err(_) => tracing_subscriber::EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Run {
        config: None,
        catalog: None,
    });

    let result = match command {
        Commands::Run { config, catalog } => commands::run::execute(config, catalog),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::ListCourses {
            config,
            catalog,
            format,
        } => commands::list_courses::execute(config, catalog, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
