use anyhow::{bail, Context, Result};
use blueboy_commander::config::CommanderConfig;
use blueboy_commander::dispatch::{CommandSink, LineSink};
use blueboy_commander::fields::FieldSource;
use blueboy_commander::{Commander, PacketSink};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_CONFIG: &str = "blueboy.toml";

#[derive(Debug, Parser)]
#[command(name = "blueboy_commander")]
#[command(about = "Blueboy attitude logging commands", long_about = None)]
struct Cli {
    /// Config file (defaults to ./blueboy.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Set an operator field, e.g. --set OWN_PERIOD=100
    #[arg(long = "set", value_name = "NAME=VALUE", global = true)]
    overrides: Vec<String>,

    /// Print commands instead of sending them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Begin attitude logging for one device
    Begin { device: String },
    /// End attitude logging for one device
    End { device: String },
    /// Begin attitude logging for OWN then TEST
    BeginAll,
    /// End attitude logging for OWN then TEST
    EndAll,
}

fn load_config(cli: &Cli) -> Result<CommanderConfig> {
    let mut config = match &cli.config {
        Some(path) => CommanderConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => CommanderConfig::load(Path::new(DEFAULT_CONFIG))?,
        None => CommanderConfig::default(),
    };
    for assignment in &cli.overrides {
        config.apply_override(assignment)?;
    }
    Ok(config)
}

fn run<F: FieldSource, S: CommandSink>(commander: &mut Commander<F, S>, command: &Commands) {
    match command {
        Commands::Begin { device } => commander.begin_attitude(device),
        Commands::End { device } => commander.end_attitude(device),
        Commands::BeginAll => commander.begin_attitude_all(),
        Commands::EndAll => commander.end_attitude_all(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let fields = config.field_store();

    if cli.dry_run {
        let mut commander = Commander::new(fields, LineSink::stdout());
        run(&mut commander, &cli.command);
        return Ok(());
    }

    let sink = PacketSink::connect(&config.link.name, config.link.scan_timeout())
        .with_context(|| format!("failed to connect to {}", config.link.name))?;
    let mut commander = Commander::new(fields, sink);
    run(&mut commander, &cli.command);

    let (_, sink) = commander.into_parts();
    let (sent, failures) = (sink.sent(), sink.failures());
    if let Err(e) = sink.close() {
        warn!("Failed to disconnect: {}", e);
    }
    info!("Sent {} command(s)", sent);

    if failures > 0 {
        bail!("{} command(s) failed to send", failures);
    }
    Ok(())
}
