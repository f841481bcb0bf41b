use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::Cli;
use onomo::config::{self, ConfigFile, ConfigResolver};
use onomo::notify::make_notifier;
use onomo::scheduler::{PhaseScheduler, PhaseWaiters};
use onomo::sound::{make_interval_waiter, make_sounder};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("onomo")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("onomo.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli) -> Result<()> {
    info!("Starting application");

    let config_path = cli.configfile.clone().unwrap_or_else(config::default_config_path);
    let resolver = ConfigResolver::default();

    let created = config::ensure_config_file(&config_path, resolver.options())
        .with_context(|| format!("Failed to create config file {}", config_path.display()))?;
    if created {
        println!("{} {}", "Created config file:".yellow(), config_path.display());
    }

    let file = ConfigFile::load(&config_path)
        .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
    let config = resolver.resolve(&file, &cli.overrides)?;

    if cli.show_config {
        println!("{} {}", "Config file:".cyan(), config_path.display());
        for line in config.describe() {
            println!("  {}", line);
        }
        return Ok(());
    }

    let alert = make_sounder(config.audio_file.as_deref())?;
    let waiters = PhaseWaiters {
        pomodoro: make_interval_waiter(config.pomo_duration(), config.pomo_sound.as_deref())?,
        short_break: make_interval_waiter(config.short_duration(), config.break_sound.as_deref())?,
        long_break: make_interval_waiter(config.long_duration(), config.break_sound.as_deref())?,
    };
    let notifier = make_notifier(&config.message_by);

    info!("Entering schedule loop (longper: {})", config.long_per);
    let mut scheduler = PhaseScheduler::new(notifier, alert, waiters, config.long_per);
    scheduler.run()
}

fn main() {
    // Parse first so --help and --version exit before anything else runs
    let cli = Cli::from_env();

    let result = setup_logging(cli.verbose)
        .context("Failed to setup logging")
        .and_then(|_| run_application(&cli));

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red(), e);
        std::process::exit(1);
    }
}
