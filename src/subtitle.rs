use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::error::Result;
use crate::transcribe::TranscriptSegment;

/// Write transcript segments as an SRT subtitle file.
///
/// Cues are numbered from 1 in segment order. Each cue's text is trimmed and
/// terminated with one blank line.
pub async fn write_srt<P: AsRef<Path>>(segments: &[TranscriptSegment], output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Writing SRT file: {}", output_path.display());

    let mut srt_content = String::new();

    for (index, segment) in segments.iter().enumerate() {
        let start_time = format_srt_time(segment.start);
        let end_time = format_srt_time(segment.end);

        srt_content.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            start_time,
            end_time,
            segment.text.trim()
        ));
    }

    fs::write(output_path, srt_content).await?;

    info!("SRT file written ({} cues)", segments.len());
    Ok(())
}

/// Format time in seconds to SRT time format (HH:MM:SS,mmm).
///
/// The value is scaled to whole milliseconds and truncated before splitting,
/// so sub-millisecond remainders never round a cue into the next unit.
fn format_srt_time(seconds: f64) -> String {
    let total_milliseconds = (seconds * 1000.0) as u64;
    let hours = total_milliseconds / 3_600_000;
    let minutes = (total_milliseconds % 3_600_000) / 60_000;
    let secs = (total_milliseconds % 60_000) / 1_000;
    let millis = total_milliseconds % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JimakuError;

    #[test]
    fn test_format_srt_time() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(65.123), "00:01:05,123");
        assert_eq!(format_srt_time(3661.234), "01:01:01,234");
        assert_eq!(format_srt_time(3661.500), "01:01:01,500");
    }

    #[test]
    fn test_format_srt_time_truncates() {
        // Sub-millisecond parts are dropped, never rounded up
        assert_eq!(format_srt_time(59.9999), "00:00:59,999");
        assert_eq!(format_srt_time(1.9996), "00:00:01,999");
    }

    #[tokio::test]
    async fn writes_numbered_cues_with_blank_separators() {
        let segments = vec![
            TranscriptSegment {
                start: 0.0,
                end: 1.5,
                text: "  Hello there.  ".to_string(),
            },
            TranscriptSegment {
                start: 1.5,
                end: 3.0,
                text: "General Kenobi.".to_string(),
            },
        ];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("captions.srt");

        write_srt(&segments, &path).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            content,
            "1\n00:00:00,000 --> 00:00:01,500\nHello there.\n\n\
             2\n00:00:01,500 --> 00:00:03,000\nGeneral Kenobi.\n\n"
        );
    }

    #[tokio::test]
    async fn empty_transcript_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("captions.srt");

        write_srt(&[], &path).await.unwrap();

        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "");
    }

    #[tokio::test]
    async fn unwritable_path_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-subdir").join("captions.srt");
        let segments = vec![TranscriptSegment {
            start: 0.0,
            end: 1.0,
            text: "hi".to_string(),
        }];

        let result = write_srt(&segments, &path).await;
        assert!(matches!(result, Err(JimakuError::Io(_))));
    }
}
