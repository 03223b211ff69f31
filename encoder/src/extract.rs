use anyhow::{bail, ensure, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

pub fn is_on_path(tool: &str) -> bool {
    Command::new(tool)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Samples `video` at `fps` into `out_dir/outNNNN.jpg`, returning the frames
/// in playback order.
pub fn extract_frames(video: &Path, fps: u32, out_dir: &Path) -> Result<Vec<PathBuf>> {
    ensure!(
        video.is_file(),
        "Couldn't find video: {}",
        video.display()
    );

    let pattern = out_dir.join("out%04d.jpg");

    debug!(video = %video.display(), fps, "running ffmpeg");

    let output = Command::new("ffmpeg")
        .args(["-loglevel", "error", "-y", "-i"])
        .arg(video)
        .arg("-vf")
        .arg(format!("fps={}", fps))
        .arg(&pattern)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .context("Couldn't run ffmpeg; is it installed and on PATH?")?;

    if !output.status.success() {
        bail!(
            "ffmpeg failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let frames = list_frames(out_dir, "jpg")?;

    ensure!(!frames.is_empty(), "No frames generated from {}", video.display());

    Ok(frames)
}

pub fn list_frames(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(format!("*.{}", extension));

    let mut frames = glob::glob(&pattern.to_string_lossy())
        .context("Couldn't find frames")?
        .collect::<Result<Vec<_>, _>>()
        .context("Couldn't find frame")?;

    frames.sort();

    Ok(frames)
}
