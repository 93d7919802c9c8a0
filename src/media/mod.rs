// Modular media processing architecture
//
// This module provides a clean abstraction over media processing operations:
// - Processor: FFmpeg-backed implementation
// - Commands: Command builders and abstractions

pub mod commands;
pub mod processor;

use async_trait::async_trait;
use std::path::Path;

pub use commands::*;
pub use processor::*;

use crate::config::MediaConfig;
use crate::error::Result;

#[cfg(test)]
use mockall::automock;

/// Main trait for media processing operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MediaProcessorTrait: Send + Sync {
    /// Extract speech-ready audio (mono 16kHz PCM WAV) from a media file
    async fn extract_audio(&self, media_path: &Path, audio_path: &Path) -> Result<()>;

    /// Burn subtitles into the video stream and mux in the audio track
    async fn mux_subtitles(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        audio_path: &Path,
        output_path: &Path,
    ) -> Result<()>;

    /// Check if media processor is available
    fn check_availability(&self) -> Result<()>;
}

/// Factory for creating media processor instances
pub struct MediaProcessorFactory;

impl MediaProcessorFactory {
    /// Create the default media processor implementation (FFmpeg-based)
    pub fn create_processor(config: MediaConfig) -> Box<dyn MediaProcessorTrait> {
        Box::new(processor::MediaProcessorImpl::new(config))
    }
}
