mod catalog;
mod geo;
mod matching;
mod orbit;
mod positions;
mod web;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::catalog::Catalog;
use crate::web::Config;

#[derive(Parser)]
#[command(name = "starcrossed")]
#[command(about = "Satellite matchmaking service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web service
    Serve {
        /// Path to the YAML config file
        #[arg(long, default_value = "config.yaml")]
        config: String,
    },
    /// List the satellites a TLE file provides
    Catalog { file: PathBuf },
    /// Print a satellite's ground track as JSON
    Track {
        file: PathBuf,
        name: String,
        #[arg(long, default_value_t = 24)]
        hours: u32,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config),
        Commands::Catalog { file } => catalog_summary(&file),
        Commands::Track { file, name, hours } => print_track(&file, &name, hours),
    }
}

fn serve(config_path: &str) -> ExitCode {
    let config = match Config::from_file(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn catalog_summary(file: &Path) -> ExitCode {
    let catalog = Catalog::new();
    catalog.load(file);

    println!("{} satellites", catalog.count());
    for (i, name) in catalog.all_names().iter().enumerate() {
        let marker = if catalog.get(name).is_some() {
            ""
        } else {
            " (no elements)"
        };
        println!("  {}: {}{}", i + 1, name, marker);
    }
    ExitCode::SUCCESS
}

fn print_track(file: &Path, name: &str, hours: u32) -> ExitCode {
    let catalog = Catalog::new();
    catalog.load(file);

    let track = match matching::catalog_ground_track(&catalog, name, hours) {
        Ok(track) => track,
        Err(e) => {
            eprintln!("Propagation error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&track) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error encoding track: {}", e);
            ExitCode::FAILURE
        }
    }
}
