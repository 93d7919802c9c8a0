// faster-whisper CLI implementation
//
// Invokes the CLI with JSON output into a scratch directory, then parses the
// document it leaves behind (named after the audio file stem).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::TranscriberConfig;
use crate::error::{JimakuError, Result};
use super::{TranscriberTrait, TranscriptSegment, Transcription};

/// faster-whisper specific JSON output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FasterWhisperOutput {
    pub text: Option<String>,
    pub segments: Vec<FasterWhisperSegment>,
    pub language: Option<String>,
}

/// faster-whisper specific segment format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FasterWhisperSegment {
    pub id: Option<u64>,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub avg_logprob: Option<f64>,
    pub no_speech_prob: Option<f64>,
}

impl From<FasterWhisperOutput> for Transcription {
    fn from(output: FasterWhisperOutput) -> Self {
        let segments = output
            .segments
            .into_iter()
            .map(|seg| TranscriptSegment {
                start: seg.start,
                end: seg.end,
                text: seg.text.trim().to_string(),
            })
            .collect();

        Transcription {
            segments,
            language: output.language,
        }
    }
}

/// Transcriber invoking the faster-whisper CLI as a subprocess
pub struct FasterWhisperTranscriber {
    config: TranscriberConfig,
}

impl FasterWhisperTranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }

    /// Command-line arguments for one transcription run.
    ///
    /// The task is always `translate`: output text is in the model's target
    /// language regardless of what is spoken in the audio.
    fn build_args(&self, audio_path: &Path, output_dir: &Path, language: Option<&str>) -> Vec<String> {
        let mut args = vec![
            audio_path.to_string_lossy().to_string(),
            "--model".to_string(),
            self.config.model.clone(),
            "--device".to_string(),
            self.config.device.clone(),
            "--compute_type".to_string(),
            self.config.compute_type.clone(),
            "--task".to_string(),
            "translate".to_string(),
            "--output_format".to_string(),
            "json".to_string(),
            "--output_dir".to_string(),
            output_dir.to_string_lossy().to_string(),
        ];

        if let Some(lang) = language {
            args.push("--language".to_string());
            args.push(lang.to_string());
        }

        args
    }
}

#[async_trait]
impl TranscriberTrait for FasterWhisperTranscriber {
    async fn transcribe<'a>(
        &self,
        audio_path: &Path,
        language: Option<&'a str>,
    ) -> Result<Transcription> {
        info!("Transcribing {} with model {}", audio_path.display(), self.config.model);

        // Scratch directory for the JSON the CLI writes
        let temp_dir = tempfile::tempdir()
            .map_err(|e| JimakuError::Transcriber(format!("Failed to create temp directory: {}", e)))?;
        let output_dir = temp_dir.path();

        let args = self.build_args(audio_path, output_dir, language);
        debug!("Executing transcriber command: {} {:?}", self.config.binary_path, args);

        let output = Command::new(&self.config.binary_path)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                JimakuError::Transcriber(format!(
                    "Failed to execute {}: {}",
                    self.config.binary_path, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(JimakuError::Transcriber(format!(
                "Transcription failed: {}",
                stderr
            )));
        }

        // The CLI names its output after the audio file stem
        let audio_filename = audio_path
            .file_stem()
            .ok_or_else(|| JimakuError::Transcriber("Invalid audio filename".to_string()))?;
        let json_file = output_dir.join(format!("{}.json", audio_filename.to_string_lossy()));

        if !json_file.exists() {
            return Err(JimakuError::Transcriber("Transcriber JSON output file not found".to_string()));
        }

        let json_content = tokio::fs::read_to_string(&json_file)
            .await
            .map_err(|e| JimakuError::Transcriber(format!("Failed to read JSON output: {}", e)))?;

        let whisper_output: FasterWhisperOutput = serde_json::from_str(&json_content)
            .map_err(|e| JimakuError::Transcriber(format!("Failed to parse transcriber JSON: {}", e)))?;

        let transcription = Transcription::from(whisper_output);
        info!(
            "Transcription completed: {} segments, detected language: {}",
            transcription.segments.len(),
            transcription.language.as_deref().unwrap_or("unknown")
        );

        Ok(transcription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn transcriber() -> FasterWhisperTranscriber {
        FasterWhisperTranscriber::new(Config::default().transcriber)
    }

    #[test]
    fn maps_cli_document_to_segments() {
        let json = r#"{
            "text": " Hello. Goodbye.",
            "segments": [
                {"id": 0, "seek": 0, "start": 0.0, "end": 2.4, "text": " Hello.",
                 "avg_logprob": -0.31, "no_speech_prob": 0.01},
                {"id": 1, "seek": 0, "start": 2.4, "end": 4.0, "text": " Goodbye."}
            ],
            "language": "en"
        }"#;

        let output: FasterWhisperOutput = serde_json::from_str(json).unwrap();
        let transcription = Transcription::from(output);

        assert_eq!(transcription.segments.len(), 2);
        assert_eq!(transcription.segments[0].text, "Hello.");
        assert_eq!(transcription.segments[0].start, 0.0);
        assert_eq!(transcription.segments[1].end, 4.0);
        assert_eq!(transcription.language.as_deref(), Some("en"));
    }

    #[test]
    fn tolerates_minimal_documents() {
        let json = r#"{"segments": []}"#;

        let output: FasterWhisperOutput = serde_json::from_str(json).unwrap();
        let transcription = Transcription::from(output);

        assert!(transcription.segments.is_empty());
        assert!(transcription.language.is_none());
    }

    #[test]
    fn always_requests_the_translate_task() {
        let args = transcriber().build_args(Path::new("audio.wav"), Path::new("/tmp/out"), None);

        assert_eq!(args[0], "audio.wav");
        assert!(args.windows(2).any(|w| w == ["--task", "translate"]));
        assert!(args.windows(2).any(|w| w == ["--model", "large-v3"]));
        assert!(args.windows(2).any(|w| w == ["--device", "cpu"]));
        assert!(args.windows(2).any(|w| w == ["--compute_type", "int8"]));
        assert!(args.windows(2).any(|w| w == ["--output_format", "json"]));
    }

    #[test]
    fn language_hint_is_forwarded() {
        let args = transcriber().build_args(Path::new("a.wav"), Path::new("/tmp/out"), Some("ja"));
        assert!(args.windows(2).any(|w| w == ["--language", "ja"]));
    }

    #[test]
    fn auto_detection_omits_language_flag() {
        let args = transcriber().build_args(Path::new("a.wav"), Path::new("/tmp/out"), None);
        assert!(!args.contains(&"--language".to_string()));
    }
}
