// Video/audio file pairing
//
// Downloaded media arrives as two files sharing a base name: a video track
// such as "Movie Night (1080p60).mp4" and an audio track named
// "Movie Night-audio.mp4". Scanning a directory groups them into pairs the
// workflow can process.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Filename suffix marking audio-only tracks
const AUDIO_SUFFIX: &str = "-audio.mp4";
/// Only this extension participates in pairing
const MEDIA_EXTENSION: &str = ".mp4";

/// A video/audio file set grouped under one derived base name.
#[derive(Debug, Clone)]
pub struct VideoAudioPair {
    pub base_name: String,
    pub video: Option<PathBuf>,
    pub audio: Option<PathBuf>,
}

impl VideoAudioPair {
    /// Only pairs with both tracks present are processable.
    pub fn is_complete(&self) -> bool {
        self.video.is_some() && self.audio.is_some()
    }
}

/// Scan the top level of `dir` and group `.mp4` files into pairs.
///
/// Audio tracks are recognized by the `-audio.mp4` suffix. Every other
/// `.mp4` entry fills the video slot of the pair named by its stem minus
/// any trailing ` (quality)` qualifier. Malformed names never error; they
/// just fail to pair. Entries are visited in sorted filename order, so when
/// two video names derive the same base the later one wins the slot
/// deterministically.
pub fn scan_pairs(dir: &Path) -> BTreeMap<String, VideoAudioPair> {
    let mut pairs: BTreeMap<String, VideoAudioPair> = BTreeMap::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if !file_name.ends_with(MEDIA_EXTENSION) {
            continue;
        }

        let path = entry.path().to_path_buf();
        if let Some(base) = file_name.strip_suffix(AUDIO_SUFFIX) {
            let pair = slot(&mut pairs, base);
            if pair.audio.is_some() {
                debug!("Duplicate audio track for {}, replacing", base);
            }
            pair.audio = Some(path);
        } else {
            let stem = file_name.strip_suffix(MEDIA_EXTENSION).unwrap_or(file_name);
            let base = stem.split_once(" (").map(|(b, _)| b).unwrap_or(stem);

            let pair = slot(&mut pairs, base);
            if pair.video.is_some() {
                debug!("Duplicate video track for {}, replacing", base);
            }
            pair.video = Some(path);
        }
    }

    pairs
}

fn slot<'a>(pairs: &'a mut BTreeMap<String, VideoAudioPair>, base: &str) -> &'a mut VideoAudioPair {
    pairs.entry(base.to_string()).or_insert_with(|| VideoAudioPair {
        base_name: base.to_string(),
        video: None,
        audio: None,
    })
}
