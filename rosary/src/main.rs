//! Rosary - daily prayer sequence viewer
//!
//! CLI entry point: loads the catalog once, then prints or views the rosary.

use std::fs;
use std::time::Duration;

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use rosary::catalog::{CatalogIndex, CatalogSource, check_catalog, load_catalog};
use rosary::cli::{Cli, Command, OutputFormat, generate_after_help, get_log_path};
use rosary::config::Config;
use rosary::output;
use rosary::sequence::{SequenceBuilder, weekday_name};
use rosary::session::Session;
use rosary::tui;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let source = match &cli.catalog {
        Some(location) => CatalogSource::parse(location),
        None => config.catalog.source(),
    };
    let language = cli.language.clone().unwrap_or_else(|| config.language.clone());
    let date = cli.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    info!(%source, %language, %date, "Rosary starting");

    let builder = SequenceBuilder::with_policy(config.localization.clone());
    let timeout = config.catalog.timeout();

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Show { format }) => {
            let index = load_index(&source, timeout).await?;
            cmd_show(Session::with_catalog(index, builder, language, date), format)
        }
        Some(Command::Themes { format }) => cmd_themes(&load_index(&source, timeout).await?, date, format),
        Some(Command::Languages) => cmd_languages(&load_index(&source, timeout).await?),
        Some(Command::Check { format }) => cmd_check(&load_index(&source, timeout).await?, &builder, format),
        Some(Command::View) | None => {
            // The viewer comes up empty and fills in once the catalog arrives
            let session = Session::new(builder, language, date);
            let loader = tokio::spawn(async move { load_catalog(&source, timeout).await.map(CatalogIndex::new) });
            tui::run(session, loader, config.viewer.tick_rate()).await
        }
    }
}

async fn load_index(source: &CatalogSource, timeout: Duration) -> Result<CatalogIndex> {
    let catalog = load_catalog(source, timeout).await.context("Failed to load catalog")?;
    Ok(CatalogIndex::new(catalog))
}

fn cmd_show(session: Session, format: OutputFormat) -> Result<()> {
    let rosary = session.render().context("Failed to render rosary")?;
    match format {
        OutputFormat::Text => print!("{}", output::rosary_text(&rosary)),
        OutputFormat::Json => println!("{}", output::to_json(&rosary)?),
    }
    Ok(())
}

fn cmd_themes(index: &CatalogIndex, date: chrono::NaiveDate, format: OutputFormat) -> Result<()> {
    let themes = output::theme_summaries(index, weekday_name(date));
    match format {
        OutputFormat::Text => print!("{}", output::themes_text(&themes)),
        OutputFormat::Json => println!("{}", output::to_json(&themes)?),
    }
    Ok(())
}

fn cmd_languages(index: &CatalogIndex) -> Result<()> {
    let languages = index.catalog().languages();
    if languages.is_empty() {
        println!("No languages found");
    } else {
        for language in languages {
            println!("{}", language);
        }
    }
    Ok(())
}

fn cmd_check(index: &CatalogIndex, builder: &SequenceBuilder, format: OutputFormat) -> Result<()> {
    let report = check_catalog(index, builder.rules());
    match format {
        OutputFormat::Text => print!("{}", output::check_text(&report)),
        OutputFormat::Json => println!("{}", output::to_json(&report)?),
    }

    if report.has_errors() {
        return Err(eyre::eyre!(
            "{} Catalog check found {} error(s)",
            "✗".red(),
            report.errors().count()
        ));
    }
    Ok(())
}
