mod cli;
mod convert;
mod extract;
mod manifest;
mod play;

use anyhow::{bail, ensure, Context, Result};
use apple_codec::{replay, AnimationSequence, FrameKind, HostBinding, LuaScript, Params, Source};
use clap::Parser;
use cli::{Cli, Command, ConverterChoice, EncodeArgs};
use convert::Converter;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let Cli { cmd } = Cli::parse();

    match cmd {
        Command::Encode(args) => encode(args),
        Command::Play(args) => play::run(args),
    }
}

fn encode(args: EncodeArgs) -> Result<()> {
    let params = Params::new(args.width, args.height, args.fps)?;

    info!(
        video = %args.video.display(),
        fps = args.fps,
        resolution = %format!("{}x{}", args.width, args.height),
        origin = %format!("({}, {})", args.start_x, args.start_y),
        converter = ?args.converter,
        "settings"
    );

    if args.converter == ConverterChoice::Jp2a && !extract::is_on_path("jp2a") {
        bail!("jp2a was not found on PATH; install it or pass `--converter builtin`");
    }

    for dir in [&args.tmp_frames_dir, &args.out_frames_dir, &args.out_lua_dir] {
        recreate_dir(dir)?;
    }

    info!("[1/4] Extracting frames");
    let images = extract::extract_frames(&args.video, args.fps, &args.tmp_frames_dir)?;

    info!(frames = images.len(), "[2/4] Converting frames");
    let converter = Converter::new(args.converter, &params);
    let report = convert::convert_all(&converter, &images, &args.out_frames_dir);

    for (image, err) in &report.failures {
        warn!(frame = %image.display(), "Couldn't convert frame: {:#}", err);
    }

    ensure!(!report.converted.is_empty(), "No frame could be converted");

    info!("[3/4] Encoding {}", manifest::SCRIPT_NAME);
    let source = Source::from_dir(&args.out_frames_dir, &params)?;
    info!(frames = source.len(), "Loaded grids");

    let (stats, sequence) = apple_codec::encode(&params, source.grids().cloned())?;
    verify_replay(&source, &sequence)?;

    let binding = HostBinding {
        origin_x: args.start_x,
        origin_y: args.start_y,
        alive_cell: args.alive_cell,
        dead_cell: args.dead_cell,
        identity: args.city_name,
        variant: args.city_seed,
        ready_message: args.ready_message,
    };

    let script = LuaScript::new(binding, sequence);

    info!("[4/4] Writing artifacts");
    let artifacts = manifest::write_artifacts(&args.out_lua_dir, &script, &args.id)?;

    info!(manifest = %artifacts.manifest.display(), "Wrote manifest");

    info!(
        full = stats.count(FrameKind::Full),
        delta = stats.count(FrameKind::Delta),
        changes = stats.changes,
        "Generated {} with {} frames (Size: {:.2} MB)",
        artifacts.script.display(),
        stats.frames,
        artifacts.script_bytes as f64 / (1024.0 * 1024.0)
    );

    if stats.frames < images.len() {
        warn!(
            "Encoded {} frames out of {}; {} failed to convert",
            stats.frames,
            images.len(),
            report.failures.len()
        );
    }

    Ok(())
}

/// Decodes `sequence` again and checks every frame against the grid it came
/// from.
fn verify_replay(source: &Source, sequence: &AnimationSequence) -> Result<()> {
    let replayed = replay(sequence);

    ensure!(
        replayed.len() == source.len(),
        "Encoded animation has {} frames, expected {}",
        replayed.len(),
        source.len()
    );

    for ((path, grid), decoded) in source.paths().zip(source.grids()).zip(&replayed) {
        ensure!(
            grid == decoded,
            "Encoded animation doesn't replay frame: {}",
            path.display()
        );
    }

    Ok(())
}

fn recreate_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("Couldn't clear directory: {}", dir.display()))?;
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Couldn't create directory: {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn source(frames: &[&str]) -> (tempfile::TempDir, Params, Source) {
        let dir = tempfile::tempdir().unwrap();
        let params = Params::new(4, 2, 30).unwrap();

        for (idx, frame) in frames.iter().enumerate() {
            fs::write(dir.path().join(format!("out{:04}.txt", idx + 1)), frame).unwrap();
        }

        let source = Source::from_dir(dir.path(), &params).unwrap();

        (dir, params, source)
    }

    #[test]
    fn verify_replay_accepts_faithful_encoding() {
        let (_dir, params, source) = source(&["0000\n0000\n", "1000\n0000\n", "1111\n1111\n"]);
        let (_, sequence) = apple_codec::encode(&params, source.grids().cloned()).unwrap();

        verify_replay(&source, &sequence).unwrap();
    }

    #[test]
    fn verify_replay_names_the_mismatching_frame() {
        let (_dir, params, source) = source(&["0000\n0000\n", "1000\n0000\n"]);
        let blank = apple_codec::PixelGrid::new(params.width(), params.height());
        let (_, sequence) = apple_codec::encode(&params, [blank.clone(), blank]).unwrap();

        let err = verify_replay(&source, &sequence).unwrap_err();

        assert!(err.to_string().contains("out0002.txt"), "{}", err);
    }

    #[test]
    fn verify_replay_rejects_missing_frames() {
        let (_dir, params, source) = source(&["0000\n0000\n", "0000\n0000\n"]);
        let (_, sequence) = apple_codec::encode(&params, source.grids().take(1).cloned()).unwrap();

        let err = verify_replay(&source, &sequence).unwrap_err();

        assert!(err.to_string().contains("has 1 frames, expected 2"), "{}", err);
    }
}
