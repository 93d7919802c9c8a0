use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{JimakuError, Result};
use crate::media::{MediaProcessorFactory, MediaProcessorTrait};
use crate::pairing::scan_pairs;
use crate::progress::run_stage;
use crate::subtitle::write_srt;
use crate::transcribe::{TranscriberFactory, TranscriberTrait};

pub struct Workflow {
    config: Config,
    transcriber: Box<dyn TranscriberTrait>,
    media: Box<dyn MediaProcessorTrait>,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        let transcriber = TranscriberFactory::create_default(config.transcriber.clone());
        let media = MediaProcessorFactory::create_processor(config.media.clone());

        // Check dependencies
        media.check_availability()?;

        Ok(Self {
            config,
            transcriber,
            media,
        })
    }

    /// Process every video/audio pair found in a directory.
    ///
    /// Pairs are processed independently: a failing pair is reported and the
    /// batch moves on to the next one.
    pub async fn run_batch<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> Result<()> {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();
        info!("Processing directory: {}", input_dir.display());

        if !input_dir.is_dir() {
            return Err(JimakuError::Config(format!(
                "Input path is not a directory: {}",
                input_dir.display()
            )));
        }

        // Create output directory if it doesn't exist
        fs::create_dir_all(output_dir).await?;

        let pairs = scan_pairs(input_dir);
        info!("Found {} video pairs to process", pairs.len());

        for pair in pairs.values() {
            match (&pair.video, &pair.audio) {
                (Some(video), Some(audio)) => {
                    match self.process_pair(video, audio, output_dir).await {
                        Ok(output) => {
                            info!("Successfully processed {}: {}", pair.base_name, output.display())
                        }
                        Err(e) => warn!("Failed to process {}: {}", pair.base_name, e),
                    }
                }
                _ => warn!("Incomplete pair for {}, skipping", pair.base_name),
            }
        }

        Ok(())
    }

    /// Run the four-stage pipeline for one video/audio pair.
    ///
    /// An existing output file means the whole pipeline already ran, so the
    /// pair is skipped before any work happens. Intermediate files live in a
    /// per-run scratch directory that is removed on every exit path.
    pub async fn process_pair<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
        &self,
        video_path: P,
        audio_path: Q,
        output_dir: R,
    ) -> Result<PathBuf> {
        let video_path = video_path.as_ref();
        let audio_path = audio_path.as_ref();
        let output_dir = output_dir.as_ref();

        let video_name = video_path
            .file_name()
            .ok_or_else(|| JimakuError::Config(format!("Invalid video filename: {}", video_path.display())))?;

        fs::create_dir_all(output_dir).await?;
        let output_path = output_dir.join(video_name);

        if output_path.exists() {
            info!("Output already exists, skipping: {}", output_path.display());
            return Ok(output_path);
        }

        info!("Processing video: {}", video_name.to_string_lossy());
        let total_start = Instant::now();

        let scratch = tempfile::Builder::new().prefix("jimaku-").tempdir()?;
        let wav_path = scratch.path().join("audio.wav");
        let srt_path = scratch.path().join("captions.srt");

        run_stage("Extracting audio", self.media.extract_audio(audio_path, &wav_path)).await?;

        let transcription = run_stage(
            "Transcribing audio",
            self.transcriber
                .transcribe(&wav_path, self.config.transcriber.language.as_deref()),
        )
        .await?;

        run_stage("Writing subtitles", write_srt(&transcription.segments, &srt_path)).await?;

        run_stage(
            "Muxing video",
            self.media
                .mux_subtitles(video_path, &srt_path, audio_path, &output_path),
        )
        .await?;

        info!(
            "Completed {} in {} -> {}",
            video_name.to_string_lossy(),
            format_elapsed(total_start.elapsed().as_secs()),
            output_path.display()
        );

        Ok(output_path)
    }

    /// Extract speech-ready audio from a media file
    pub async fn extract_audio<P: AsRef<Path>>(&self, media_path: P, audio_path: P) -> Result<()> {
        let media_path = media_path.as_ref();
        let audio_path = audio_path.as_ref();

        if !media_path.exists() {
            return Err(JimakuError::FileNotFound(media_path.display().to_string()));
        }

        self.media.extract_audio(media_path, audio_path).await
    }

    /// Transcribe an audio file and write the result as SRT
    pub async fn transcribe_audio<P: AsRef<Path>>(
        &self,
        audio_path: P,
        output_path: P,
        language: Option<&str>,
    ) -> Result<()> {
        let audio_path = audio_path.as_ref();
        let output_path = output_path.as_ref();

        if !audio_path.exists() {
            return Err(JimakuError::FileNotFound(audio_path.display().to_string()));
        }

        let transcription = self.transcriber.transcribe(audio_path, language).await?;
        write_srt(&transcription.segments, output_path).await
    }

    /// Burn subtitles into a video and attach an audio track
    pub async fn mux_subtitles<P: AsRef<Path>>(
        &self,
        video_path: P,
        subtitles_path: P,
        audio_path: P,
        output_path: P,
    ) -> Result<()> {
        self.media
            .mux_subtitles(
                video_path.as_ref(),
                subtitles_path.as_ref(),
                audio_path.as_ref(),
                output_path.as_ref(),
            )
            .await
    }
}

/// Format a wall-clock duration for the completion report
fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / (60 * 60);
    let minutes = (seconds % (60 * 60)) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
