// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use console::style;
use extweb_cli::commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "extweb")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Compiles declarative route files into a distributable userscript", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Quiet mode: only show errors (useful for CI)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new userscript project
    Init {
        /// Project name (defaults to current directory name)
        name: Option<String>,
    },
    /// Build the release userscript into dist/
    Build,
    /// Build in development mode (split header + body for fast reload)
    Dev {
        /// Watch the project and rebuild on change
        #[arg(short, long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(name).await,
        Commands::Build => commands::build::run(cli.quiet).await,
        Commands::Dev { watch } => commands::dev::run(watch, cli.quiet).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("error:").red(), e);
        std::process::exit(1);
    }
}
