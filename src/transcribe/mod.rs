// Modular transcription architecture
//
// Transcription runs through an external speech model CLI behind a trait,
// so the workflow can be exercised without the model installed. New engines
// plug in by parsing their own JSON into `Transcription` and extending the
// factory.

pub mod whisper;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use whisper::FasterWhisperTranscriber;

use crate::config::TranscriberConfig;
use crate::error::Result;

#[cfg(test)]
use mockall::automock;

/// One timed text span produced by the speech model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Complete transcription result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub segments: Vec<TranscriptSegment>,
    /// Language detected by the model; informational only
    pub language: Option<String>,
}

/// Main trait for transcription operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriberTrait: Send + Sync {
    /// Transcribe an audio file into timed, translated segments
    async fn transcribe<'a>(
        &self,
        audio_path: &Path,
        language: Option<&'a str>,
    ) -> Result<Transcription>;
}

/// Factory for creating transcriber instances
pub struct TranscriberFactory;

impl TranscriberFactory {
    /// Create the default transcriber (faster-whisper CLI)
    pub fn create_default(config: TranscriberConfig) -> Box<dyn TranscriberTrait> {
        Box::new(FasterWhisperTranscriber::new(config))
    }
}
