use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process every video/audio pair in a directory
    Batch {
        /// Directory containing downloaded video/audio pairs
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        /// Output directory for subtitled videos
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Process a single video/audio pair
    Process {
        /// Input video file
        #[arg(short, long)]
        video: PathBuf,

        /// Matching audio file
        #[arg(short, long)]
        audio: PathBuf,

        /// Output directory for the subtitled video
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Extract speech-ready audio from a media file
    Extract {
        /// Input media file
        #[arg(short, long)]
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Transcribe an audio file into SRT subtitles
    Transcribe {
        /// Input audio file
        #[arg(short, long)]
        input: PathBuf,

        /// Output subtitle file
        #[arg(short, long)]
        output: PathBuf,

        /// Source language hint
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Burn subtitles into a video and attach an audio track
    Mux {
        /// Input video file
        #[arg(short, long)]
        video: PathBuf,

        /// Subtitle file
        #[arg(short, long)]
        subtitles: PathBuf,

        /// Audio file carried over into the output
        #[arg(short, long)]
        audio: PathBuf,

        /// Output video file
        #[arg(short, long)]
        output: PathBuf,
    },
}
