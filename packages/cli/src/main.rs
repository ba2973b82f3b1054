use clap::{CommandFactory, Parser, Subcommand};
use colored::*;
use env_logger::Env;
use log::debug;
use std::io;
use std::process::ExitCode;
use anyhow::Result;
use stopwatch_core::{format_duration, DurationFormat, Epoch, StoreConfig};

pub mod commands;

#[derive(Parser)]
#[command(name = "stopwatch")]
#[command(about = "Stopwatches that keep running between shell commands", version)]
struct Cli {
    /// Output durations in seconds
    #[arg(short = 's', long, global = true, conflicts_with = "milliseconds")]
    seconds: bool,
    /// Output durations in milliseconds
    #[arg(long = "ms", visible_alias = "milliseconds", global = true)]
    milliseconds: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new stopwatch and print its id
    Start {
        /// Id of the stopwatch, generated when omitted
        #[arg(short = 'n', long)]
        name: Option<String>,
    },
    /// Stop a stopwatch and print its duration
    Stop {
        id: String,
    },
    /// List all running stopwatches
    #[command(visible_alias = "list")]
    Ls,
    /// Time until interrupted, without touching the stopwatch file
    Wait {
        /// Redraw the running time every 100ms
        #[arg(short, long)]
        live: bool,
    },
    /// Remove the stopwatch file
    Purge {
        /// Skip confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

impl Cli {
    fn duration_format(&self) -> DurationFormat {
        if self.seconds {
            DurationFormat::Seconds
        } else if self.milliseconds {
            DurationFormat::Milliseconds
        } else {
            DurationFormat::Human
        }
    }
}

pub struct CliApp {
    epoch: Epoch,
    format: DurationFormat,
}

impl CliApp {
    pub fn new(epoch: Epoch, format: DurationFormat) -> Self {
        Self { epoch, format }
    }

    fn store_config(&self) -> Result<StoreConfig> {
        let config = StoreConfig::from_env()?;
        debug!("Using stopwatch file {}", config.file_path().display());
        Ok(config)
    }

    async fn run(cli: Cli, epoch: Epoch) -> Result<ExitCode> {
        let app = Self::new(epoch, cli.duration_format());

        match cli.command {
            Some(Commands::Start { name }) => {
                let id = commands::start(&app.store_config()?, &app.epoch, name)?;
                println!("{}", id);
            }
            Some(Commands::Stop { id }) => {
                let elapsed = commands::stop(&app.store_config()?, &app.epoch, &id)?;
                println!("{}", format_duration(elapsed, app.format));
            }
            Some(Commands::Ls) => {
                commands::list(&app.store_config()?, &app.epoch, app.format, io::stdout().lock())?;
            }
            Some(Commands::Wait { live }) => {
                commands::wait(&app.epoch, live, app.format, commands::shutdown_signal(), io::stdout())
                    .await?;
            }
            Some(Commands::Purge { yes }) => {
                commands::purge(&app.store_config()?, yes, io::stdin().lock(), io::stderr())?;
            }
            None => {
                eprintln!("{}", Cli::command().render_help());
                return Ok(ExitCode::FAILURE);
            }
        }
        Ok(ExitCode::SUCCESS)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let epoch = Epoch::now();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match CliApp::run(cli, epoch).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
