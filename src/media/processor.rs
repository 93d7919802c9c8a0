use async_trait::async_trait;
use std::path::Path;
use std::process::Command;
use tracing::info;

use crate::config::MediaConfig;
use crate::error::{JimakuError, Result};
use super::{MediaCommandBuilder, MediaProcessorTrait};

/// Concrete implementation of media processor (FFmpeg-based)
pub struct MediaProcessorImpl {
    config: MediaConfig,
    command_builder: MediaCommandBuilder,
}

impl MediaProcessorImpl {
    /// Create a new media processor implementation
    pub fn new(config: MediaConfig) -> Self {
        let command_builder = MediaCommandBuilder::new(&config.binary_path);

        Self {
            config,
            command_builder,
        }
    }
}

#[async_trait]
impl MediaProcessorTrait for MediaProcessorImpl {
    /// Extract speech-ready audio from a media file
    async fn extract_audio(&self, media_path: &Path, audio_path: &Path) -> Result<()> {
        info!("Extracting audio from {} to {}", media_path.display(), audio_path.display());

        let command = self.command_builder.extract_audio(media_path, audio_path);
        command.execute().await?;

        info!("Audio extraction completed");
        Ok(())
    }

    /// Burn subtitles into the video and mux in the audio track
    async fn mux_subtitles(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        audio_path: &Path,
        output_path: &Path,
    ) -> Result<()> {
        info!("Muxing subtitles from {} into {} -> {}",
              subtitle_path.display(), video_path.display(), output_path.display());

        let command = self.command_builder.mux_subtitles(
            video_path,
            subtitle_path,
            audio_path,
            output_path,
            &self.config.subtitle_options,
        );

        command.execute().await?;

        info!("Subtitle mux completed");
        Ok(())
    }

    /// Check if media processor is available
    fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.binary_path)
            .arg("-version")
            .output()
            .map_err(|e| JimakuError::Media(format!("Media processor not found: {}", e)))?;

        if output.status.success() {
            info!("Media processor is available");
            Ok(())
        } else {
            Err(JimakuError::Media("Media processor version check failed".to_string()))
        }
    }
}
