mod config;
mod init;
mod logo;
mod prompt;
mod pwa;
mod ui;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;

use crate::config::Config;

#[derive(Parser)]
#[command(version)]
#[command(about = "Interactive app project generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Initialize a new project from a template.")]
    Init,
    #[command(name = "new-logo")]
    #[command(about = "Generate a logo with AI and derive the icon set.")]
    NewLogo,
    #[command(name = "new-pwa-images")]
    #[command(about = "Generate the PWA icon set from an existing image.")]
    NewPwaImages,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::init() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Init => init::run(&config),
        Commands::NewLogo => logo::run(&config),
        Commands::NewPwaImages => pwa::run(),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!(
            "{} {err:#}",
            style("✗ Failed to generate project:").red().bold()
        );
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
