use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{JimakuError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanned for downloaded video/audio pairs
    pub input_dir: PathBuf,
    /// Directory receiving subtitled videos
    pub output_dir: PathBuf,
    pub transcriber: TranscriberConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Path to the faster-whisper CLI binary (e.g., whisper-ctranslate2)
    pub binary_path: String,
    /// Model to use for transcription
    pub model: String,
    /// Inference device
    pub device: String,
    /// Quantization passed as --compute_type
    pub compute_type: String,
    /// Source language hint; omit to let the model detect it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// Additional encoding options for subtitle embedding
    /// Common options: ["-preset", "medium", "-crf", "23", "-pix_fmt", "yuv420p"]
    /// - preset: encoding speed (ultrafast, fast, medium, slow, veryslow)
    /// - crf: quality (0-51, lower = better quality, 23 is default)
    /// - pix_fmt: pixel format for compatibility
    pub subtitle_options: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("videos"),
            output_dir: PathBuf::from("videos_translated"),
            transcriber: TranscriberConfig {
                binary_path: "whisper-ctranslate2".to_string(),
                model: "large-v3".to_string(),
                device: "cpu".to_string(),
                compute_type: "int8".to_string(),
                language: None,
            },
            media: MediaConfig {
                binary_path: "ffmpeg".to_string(),
                subtitle_options: vec![
                    // Example encoding options users can customize:
                    // "-preset".to_string(), "medium".to_string(),  // Encoding speed (ultrafast, fast, medium, slow, veryslow)
                    // "-crf".to_string(), "23".to_string(),         // Quality (0-51, lower = better quality)
                    // "-pix_fmt".to_string(), "yuv420p".to_string(), // Pixel format for compatibility
                ],
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| JimakuError::Config(format!("Failed to read config file: {}", e)))?;

        Ok(toml::from_str(&content)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| JimakuError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| JimakuError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_compiled_in_layout() {
        let config = Config::default();

        assert_eq!(config.input_dir, PathBuf::from("videos"));
        assert_eq!(config.output_dir, PathBuf::from("videos_translated"));
        assert_eq!(config.transcriber.binary_path, "whisper-ctranslate2");
        assert_eq!(config.transcriber.model, "large-v3");
        assert_eq!(config.transcriber.device, "cpu");
        assert_eq!(config.transcriber.compute_type, "int8");
        assert!(config.transcriber.language.is_none());
        assert_eq!(config.media.binary_path, "ffmpeg");
        assert!(config.media.subtitle_options.is_empty());
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.transcriber.model = "base".to_string();
        config.transcriber.language = Some("ja".to_string());
        config.media.subtitle_options = vec!["-crf".to_string(), "23".to_string()];
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.input_dir, PathBuf::from("videos"));
        assert_eq!(loaded.transcriber.model, "base");
        assert_eq!(loaded.transcriber.language.as_deref(), Some("ja"));
        assert_eq!(loaded.media.subtitle_options, vec!["-crf", "23"]);
    }

    #[test]
    fn missing_language_deserializes_as_auto_detect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::default().save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert!(loaded.transcriber.language.is_none());
    }

    #[test]
    fn rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        let result = Config::from_file(&path);
        assert!(matches!(result, Err(JimakuError::Toml(_))));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = Config::from_file("definitely/not/here/config.toml");
        assert!(matches!(result, Err(JimakuError::Config(_))));
    }
}
