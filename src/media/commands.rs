use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::error::{JimakuError, Result};

/// Abstract media processing command representation
#[derive(Debug, Clone)]
pub struct MediaCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
}

impl MediaCommand {
    /// Create a new media processing command
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    /// Set video codec
    pub fn video_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:v").arg(codec)
    }

    /// Set audio codec
    pub fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:a").arg(codec)
    }

    /// Copy audio stream
    pub fn copy_audio(self) -> Self {
        self.audio_codec("copy")
    }

    /// Disable video
    pub fn no_video(self) -> Self {
        self.arg("-vn")
    }

    /// Set audio sample rate
    pub fn audio_sample_rate(self, rate: u32) -> Self {
        self.arg("-ar").arg(rate.to_string())
    }

    /// Set audio channels
    pub fn audio_channels(self, channels: u32) -> Self {
        self.arg("-ac").arg(channels.to_string())
    }

    /// Add a filter graph
    pub fn filter_complex<S: Into<String>>(self, filter: S) -> Self {
        self.arg("-filter_complex").arg(filter)
    }

    /// Map a stream into the output
    pub fn map_stream<S: Into<String>>(self, stream: S) -> Self {
        self.arg("-map").arg(stream)
    }

    /// Execute the command
    pub async fn execute(&self) -> Result<()> {
        debug!("Executing media processing command: {} {:?}", self.binary_path, self.args);

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| JimakuError::Media(format!("Failed to execute media processor: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(JimakuError::Media(format!(
                "{} failed: {}",
                self.description,
                stderr
            )));
        }

        Ok(())
    }
}

/// Builder for the workflow's media processing operations
pub struct MediaCommandBuilder {
    binary_path: String,
}

impl MediaCommandBuilder {
    /// Create a new command builder
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Build audio extraction command (mono 16kHz 16-bit PCM WAV)
    pub fn extract_audio<P: AsRef<Path>>(&self, media_path: P, audio_path: P) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Audio extraction")
            .input(media_path)
            .no_video()
            .audio_codec("pcm_s16le")
            .audio_sample_rate(16000)
            .audio_channels(1)
            .overwrite()
            .output(audio_path)
    }

    /// Build the subtitle burn-in command.
    ///
    /// Subtitles are rendered into the video stream of the first input; the
    /// audio track comes from the second input unchanged.
    pub fn mux_subtitles<P: AsRef<Path>>(
        &self,
        video_path: P,
        subtitle_path: P,
        audio_path: P,
        output_path: P,
        additional_options: &[String],
    ) -> MediaCommand {
        let mut cmd = MediaCommand::new(&self.binary_path, "Subtitle mux")
            .overwrite()
            .input(video_path)
            .input(audio_path)
            .filter_complex(format!("[0:v]subtitles={}[sub]", subtitle_path.as_ref().display()))
            .map_stream("[sub]")
            .map_stream("1:a")
            .video_codec("libx264")
            .copy_audio();

        // Add user-specified additional options
        for option in additional_options {
            cmd = cmd.arg(option);
        }

        cmd.output(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_audio_builds_pcm_wav_args() {
        let builder = MediaCommandBuilder::new("ffmpeg");

        let cmd = builder.extract_audio(Path::new("show-audio.mp4"), Path::new("audio.wav"));

        assert_eq!(cmd.binary_path, "ffmpeg");
        assert_eq!(
            cmd.args,
            vec![
                "-i", "show-audio.mp4", "-vn", "-c:a", "pcm_s16le", "-ar", "16000", "-ac", "1",
                "-y", "audio.wav",
            ]
        );
    }

    #[test]
    fn mux_builds_two_input_filter_graph() {
        let builder = MediaCommandBuilder::new("ffmpeg");

        let cmd = builder.mux_subtitles(
            Path::new("show.mp4"),
            Path::new("captions.srt"),
            Path::new("show-audio.mp4"),
            Path::new("out/show.mp4"),
            &[],
        );

        assert_eq!(
            cmd.args,
            vec![
                "-y", "-i", "show.mp4", "-i", "show-audio.mp4",
                "-filter_complex", "[0:v]subtitles=captions.srt[sub]",
                "-map", "[sub]", "-map", "1:a",
                "-c:v", "libx264", "-c:a", "copy",
                "out/show.mp4",
            ]
        );
    }

    #[test]
    fn mux_appends_additional_options_before_output() {
        let builder = MediaCommandBuilder::new("ffmpeg");
        let options = vec!["-crf".to_string(), "23".to_string()];

        let cmd = builder.mux_subtitles(
            Path::new("a.mp4"),
            Path::new("a.srt"),
            Path::new("a-audio.mp4"),
            Path::new("out.mp4"),
            &options,
        );

        let len = cmd.args.len();
        assert_eq!(&cmd.args[len - 3..], ["-crf", "23", "out.mp4"]);
    }

    #[test]
    fn execute_surfaces_spawn_failure() {
        let cmd = MediaCommand::new("definitely-not-a-real-binary", "Spawn test").arg("-version");

        let result = tokio_test::block_on(cmd.execute());
        assert!(matches!(result, Err(JimakuError::Media(_))));
    }
}
