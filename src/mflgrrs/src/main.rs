// mflgrrs/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use mflgrrs::cli::{check_project, info_project, relocate_project, write_project};
use mflgrrs::constants::{CONFIG_ENV, MODEL_WS_ENV};
use mflgrrs::ProjectConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mflgrrs")]
#[command(about = "Configuration management system for MODFLOW-LGR models", long_about = None)]
#[command(version = env!("MFLGRRS_CLI_VERSION"))]
struct Cli {
    /// Directory the control file is resolved against (defaults to current directory)
    #[arg(short, long, value_name = "DIR", global = true, env = MODEL_WS_ENV)]
    model_ws: Option<PathBuf>,

    /// Project configuration file (defaults to mflgr-config.yml in the model workspace)
    #[arg(short, long, value_name = "FILE", global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the grids of a simulation
    Info {
        file: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load every grid with input checks enabled
    Check {
        file: PathBuf,
        /// Fail on invalid name file entries instead of skipping them
        #[arg(long)]
        strict: bool,
    },
    /// Copy a simulation to a new workspace
    Relocate { file: PathBuf, new_ws: PathBuf },
    /// Rewrite the control file in normalized form
    Write {
        file: PathBuf,
        /// Print to standard output instead of writing the file
        #[arg(long)]
        stdout: bool,
    },
}

fn entrypoint() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let search_dir = match &cli.model_ws {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let config = ProjectConfig::discover(cli.config.as_deref(), &search_dir)?;
    let model_ws = match (cli.model_ws, config.model_ws()) {
        (Some(dir), _) => dir,
        (None, Some(dir)) => dir.to_path_buf(),
        (None, None) => search_dir,
    };

    match cli.command {
        Commands::Info { file, json } => info_project(&file, &model_ws, &config, json),
        Commands::Check { file, strict } => check_project(&file, &model_ws, &config, strict),
        Commands::Relocate { file, new_ws } => relocate_project(&file, &model_ws, &new_ws, &config),
        Commands::Write { file, stdout } => write_project(&file, &model_ws, &config, stdout),
    }
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
