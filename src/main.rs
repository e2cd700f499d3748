// Main entry point for steptrace

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use steptrace::cli::{Cli, Commands, ReplayArgs};
use steptrace::config::{self, Config};
use steptrace::logging;
use steptrace::model::TestRun;
use steptrace::report::{ReportService, ReporterRegistry};
use steptrace::screenshots::NoScreenshots;
use steptrace::steps::{BaseStepListener, StepDelay, StepEvent, event};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    info!("Starting steptrace v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load();

    if cli.config {
        print_config(&config);
        return Ok(());
    }

    if let Some(config_file) = cli.init_config {
        std::fs::write(&config_file, Config::default().to_toml()).with_context(|| {
            format!("Failed to write configuration file: {}", config_file.display())
        })?;
        println!("Configuration file created: {}", config_file.display());
        return Ok(());
    }

    let registry = ReporterRegistry::with_defaults();

    match &cli.command {
        Some(Commands::Replay(args)) => replay(args, &config, &registry),
        Some(Commands::Formats) => {
            for format in registry.formats() {
                println!("{}", format);
            }
            Ok(())
        }
        None => {
            println!("No command given. Use 'steptrace --help' for usage.");
            Ok(())
        }
    }
}

fn replay(args: &ReplayArgs, config: &Config, registry: &ReporterRegistry) -> Result<()> {
    let events = StepEvent::load_all(&args.events)?;
    info!("Replaying {} events from {}", events.len(), args.events.display());

    let delay_ms = args.step_delay.unwrap_or(config.steps.delay_ms);
    let mut listener =
        BaseStepListener::new(NoScreenshots).with_step_delay(StepDelay::from_millis(delay_ms));
    event::replay(&events, &mut listener);
    let outcomes = listener.into_test_run_results();

    let formats = if args.formats.is_empty() {
        &config.reports.formats
    } else {
        &args.formats
    };
    let reporters = registry.reporters_for(formats)?;

    let output_directory = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    let mut service = ReportService::new(output_directory, reporters);
    if let Some(qualifier) = args.qualifier.as_ref().or(config.reports.qualifier.as_ref()) {
        service.use_qualifier(qualifier);
    }

    let written = service
        .generate_reports_for(&outcomes)
        .context("Report generation aborted")?;

    print_summary(&outcomes);
    for path in &written {
        println!("  report: {}", path.display());
    }

    Ok(())
}

fn print_summary(outcomes: &[TestRun]) {
    println!("{} test run(s)", outcomes.len());
    for outcome in outcomes {
        println!(
            "  {:<8} {} ({} steps, {}ms)",
            outcome.result().as_str(),
            outcome.title(),
            outcome.nested_step_count(),
            outcome.duration_ms()
        );
    }
}

fn print_config(config: &Config) {
    println!("Current configuration:");
    println!("  Output directory: {}", config.output.directory.display());
    println!("  Step delay: {}ms", config.steps.delay_ms);
    println!("  Report formats: {}", config.reports.formats.join(", "));
    if let Some(qualifier) = &config.reports.qualifier {
        println!("  Qualifier: {}", qualifier);
    }

    println!("\n  Environment variables:");
    match std::env::var(config::ENV_STEP_DELAY) {
        Ok(value) => println!("    {}: {}", config::ENV_STEP_DELAY, value),
        Err(_) => println!("    {}: not set", config::ENV_STEP_DELAY),
    }

    println!("\nConfiguration precedence:");
    println!("  1. Command-line arguments (highest)");
    println!("  2. Environment variables");
    println!("  3. Configuration file ({})", config::CONFIG_FILE_NAME);
    println!("  4. Built-in defaults (lowest)");
}
