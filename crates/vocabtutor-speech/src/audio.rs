//! Playback of encoded audio returned by remote synthesis.

use std::io::Write;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::SynthesisError;

/// Something that can play an encoded audio clip.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Play `audio`, encoded as `encoding` (e.g. "MP3").
    async fn play(&self, audio: Vec<u8>, encoding: &str) -> Result<(), SynthesisError>;
}

/// Plays audio by writing it to a temp file and running an external player.
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
}

impl CommandPlayer {
    pub fn new(program: &str, args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            args,
        }
    }
}

fn file_suffix(encoding: &str) -> &'static str {
    match encoding.to_ascii_uppercase().as_str() {
        "OGG_OPUS" => ".ogg",
        "LINEAR16" => ".wav",
        _ => ".mp3",
    }
}

#[async_trait]
impl AudioPlayer for CommandPlayer {
    async fn play(&self, audio: Vec<u8>, encoding: &str) -> Result<(), SynthesisError> {
        let mut file = tempfile::Builder::new()
            .prefix("vocabtutor-")
            .suffix(file_suffix(encoding))
            .tempfile()
            .map_err(|e| SynthesisError::Playback(format!("failed to create temp file: {e}")))?;
        file.write_all(&audio)
            .map_err(|e| SynthesisError::Playback(format!("failed to write audio: {e}")))?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(file.path())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| SynthesisError::EngineUnavailable(format!("{}: {e}", self.program)))?;

        if !status.success() {
            return Err(SynthesisError::Playback(format!(
                "{} exited with {status}",
                self.program
            )));
        }
        Ok(())
    }
}
