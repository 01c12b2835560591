//! FFmpeg command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Builder for FFmpeg commands.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input file path
    input: PathBuf,
    /// Optional second input (e.g. an overlay image)
    second_input: Option<PathBuf>,
    /// Output file path
    output: PathBuf,
    /// Input arguments (before -i)
    input_args: Vec<String>,
    /// Output arguments (after -i)
    output_args: Vec<String>,
    /// Whether to overwrite output
    overwrite: bool,
    /// Log level
    log_level: String,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            second_input: None,
            output: output.as_ref().to_path_buf(),
            input_args: Vec::new(),
            output_args: Vec::new(),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Add a second input file (placed after the primary input).
    pub fn second_input(mut self, input: impl AsRef<Path>) -> Self {
        self.second_input = Some(input.as_ref().to_path_buf());
        self
    }

    /// Add an input argument (before the primary -i).
    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Add multiple input arguments.
    pub fn input_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add output arguments (after -i).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Add multiple output arguments.
    pub fn output_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set filter complex.
    pub fn filter_complex(self, filter: impl Into<String>) -> Self {
        self.output_arg("-filter_complex").output_arg(filter)
    }

    /// Set log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        // Overwrite flag
        if self.overwrite {
            args.push("-y".to_string());
        }

        // Log level
        args.push("-v".to_string());
        args.push(self.log_level.clone());

        // Input args
        args.extend(self.input_args.clone());

        // Input file
        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());

        // Second input file
        if let Some(ref second) = self.second_input {
            args.push("-i".to_string());
            args.push(second.to_string_lossy().to_string());
        }

        // Output args
        args.extend(self.output_args.clone());

        // Output file
        args.push(self.output.to_string_lossy().to_string());

        args
    }

    /// Run the command, blocking until FFmpeg exits.
    ///
    /// Stderr is captured in full and attached to the error on a non-zero
    /// exit status. The child handle is reaped on every exit path.
    pub async fn run(&self) -> MediaResult<()> {
        // Check FFmpeg exists
        which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

        let args = self.build_args();
        debug!("Running FFmpeg: ffmpeg {}", args.join(" "));

        let output = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                MediaError::ffmpeg_failed(format!("Failed to spawn FFmpeg: {}", e), None, None)
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaError::ffmpeg_failed(
                "FFmpeg exited with non-zero status",
                Some(stderr.into_owned()),
                output.status.code(),
            ));
        }

        Ok(())
    }
}

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Check if FFprobe is available.
pub fn check_ffprobe() -> MediaResult<PathBuf> {
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder() {
        let cmd = FfmpegCommand::new("input.mp4", "output.mp4")
            .input_args(["-hwaccel", "cuda"])
            .second_input("watermark.png")
            .filter_complex("[0:v][1:v]overlay=0:0")
            .output_args(["-c:a", "aac"]);

        let args = cmd.build_args();
        assert_eq!(args[0], "-y");
        assert!(args.contains(&"-hwaccel".to_string()));
        assert!(args.contains(&"-filter_complex".to_string()));
        assert_eq!(args.last().unwrap(), "output.mp4");

        // hwaccel hint must precede the primary input
        let hw = args.iter().position(|a| a == "-hwaccel").unwrap();
        let input = args.iter().position(|a| a == "input.mp4").unwrap();
        assert!(hw < input);

        // both inputs present, in order
        let wm = args.iter().position(|a| a == "watermark.png").unwrap();
        assert!(input < wm);
    }

    #[test]
    fn test_filter_complex_after_inputs() {
        let cmd = FfmpegCommand::new("in.mp4", "out.mp4")
            .second_input("wm.png")
            .filter_complex("[0:v][1:v]overlay=10:10");

        let args = cmd.build_args();
        let wm = args.iter().position(|a| a == "wm.png").unwrap();
        let fc = args.iter().position(|a| a == "-filter_complex").unwrap();
        assert!(wm < fc);
    }
}
