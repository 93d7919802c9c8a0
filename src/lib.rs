//! Jimaku - Batch Subtitle Burn-In Workflow
//!
//! An automated workflow for turning paired video/audio downloads into
//! subtitled videos using a faster-whisper CLI and ffmpeg.

pub mod cli;
pub mod config;
pub mod workflow;
pub mod pairing;
pub mod progress;
pub mod transcribe;
pub mod subtitle;
pub mod media;
pub mod error;
