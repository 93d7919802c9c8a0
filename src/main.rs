//! Jimaku - Batch Subtitle Burn-In Workflow
//!
//! This is the main entry point for the jimaku application, which pairs
//! downloaded video/audio files, translates their speech into subtitles
//! using a faster-whisper CLI and burns the result back into the video
//! with ffmpeg.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use jimaku::cli::{Args, Commands};
use jimaku::config::Config;
use jimaku::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load config.toml from current directory first
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    // Create workflow instance
    let workflow = Workflow::new(config.clone())?;

    // Execute command
    match args.command {
        Commands::Batch { input_dir, output_dir } => {
            let input_dir = input_dir.unwrap_or_else(|| config.input_dir.clone());
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            workflow.run_batch(&input_dir, &output_dir).await?;
        }
        Commands::Process { video, audio, output_dir } => {
            info!("Processing video/audio pair: {}", video.display());
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            workflow.process_pair(&video, &audio, &output_dir).await?;
        }
        Commands::Extract { input, output } => {
            info!("Extracting audio from: {}", input.display());
            workflow.extract_audio(&input, &output).await?;
        }
        Commands::Transcribe { input, output, language } => {
            info!("Transcribing audio: {}", input.display());
            workflow.transcribe_audio(&input, &output, language.as_deref()).await?;
        }
        Commands::Mux { video, subtitles, audio, output } => {
            info!("Muxing subtitles into video: {}", video.display());
            workflow.mux_subtitles(&video, &subtitles, &audio, &output).await?;
        }
    }

    info!("jimaku workflow completed successfully");
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let jimaku_dir = std::env::current_dir()?.join(".jimaku");
    let log_dir = jimaku_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "jimaku.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    // Setup layered subscriber
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    // Initialize the subscriber
    subscriber.try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("jimaku.log").display());

    Ok(())
}
