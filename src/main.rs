// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_typewriter::config::{Command, RenderArgs, ServeArgs};
use notion_typewriter::output::{deliver, DeliveryTarget, OutputPlan};
use notion_typewriter::{
    server, CommandLineInput, Environment, MarkdownPipeline, NotionHttpClient, RenderConfig,
    ServeConfig,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// The console gets `level`; the log file always records debug output.
fn setup_logging(level: LevelFilter, verbose: bool) -> anyhow::Result<()> {
    let log_file_path = std::env::temp_dir().join("notion_typewriter.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}"
    } else {
        "{m}{n}"
    };

    // stderr keeps `render` output on stdout pipeable
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("console", Box::new(console_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs the HTTP collaborator.
async fn serve(args: ServeArgs, env: &Environment) -> anyhow::Result<()> {
    let config = ServeConfig::resolve(args, env)?;
    let state = server::AppState::new(&config)?;

    if config.default_page.is_none() {
        log::warn!("No default page configured; requests must pass pageUrl or pageId");
    }

    server::run(state, config.bind)
        .await
        .context("HTTP server failed")?;
    Ok(())
}

/// Fetches and renders one page, then delivers it to a file or stdout.
async fn render(args: RenderArgs, env: &Environment) -> anyhow::Result<()> {
    let config = RenderConfig::resolve(args, env)?;
    let client = NotionHttpClient::with_base_url(&config.api_key, &config.api_base_url)?;
    let pipeline = MarkdownPipeline::new(Arc::new(client));

    let snapshot = pipeline
        .snapshot_input(&config.page)
        .await
        .with_context(|| format!("Failed to render page {}", config.page))?;

    let target = match &config.output {
        Some(path) => DeliveryTarget::WriteFile {
            path: path.clone(),
            content: snapshot.markdown.clone(),
        },
        None => DeliveryTarget::PrintToStdout {
            content: snapshot.markdown.clone(),
        },
    };
    let report = deliver(OutputPlan::new().with_operation(target));
    if !report.is_success() {
        let failures: Vec<String> = report.failed.into_iter().map(|f| f.error).collect();
        anyhow::bail!("Delivery failed: {}", failures.join("; "));
    }

    if let Some(path) = &config.output {
        eprintln!("✓ Markdown saved to {}", path.display());
    }
    if config.print_hash {
        eprintln!("contentHash: {}", snapshot.content_hash);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal; real environment variables still apply
    dotenvy::dotenv().ok();

    let cli = CommandLineInput::parse();
    let level = match (&cli.command, cli.verbose) {
        (_, true) => LevelFilter::Debug,
        (Command::Serve(_), false) => LevelFilter::Info,
        (Command::Render(_), false) => LevelFilter::Warn,
    };
    setup_logging(level, cli.verbose)?;

    let env = Environment::from_process();
    match cli.command {
        Command::Serve(args) => serve(args, &env).await,
        Command::Render(args) => render(args, &env).await,
    }
}
