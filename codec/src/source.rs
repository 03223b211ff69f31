use crate::*;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Text grids loaded from a directory, one `.txt` file per frame, ordered by
/// file name.
pub struct Source {
    frames: Vec<(PathBuf, PixelGrid)>,
}

impl Source {
    pub fn from_dir(path: impl AsRef<Path>, params: &Params) -> anyhow::Result<Self> {
        let pattern = path.as_ref().join("*.txt");
        let paths = glob::glob(&pattern.to_string_lossy()).context("Couldn't find frames")?;

        let frames = paths.enumerate().map(|(idx, frame)| {
            let path = frame.context("Couldn't find frame")?;

            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Couldn't read frame: {}", path.display()))?;

            let grid = PixelGrid::parse(params, idx, &text)
                .with_context(|| format!("Couldn't parse frame: {}", path.display()))?;

            Ok((path, grid))
        });

        Ok(Self {
            frames: frames.collect::<anyhow::Result<_>>()?,
        })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.frames.iter().map(|(path, _)| path.as_path())
    }

    pub fn grids(&self) -> impl Iterator<Item = &PixelGrid> {
        self.frames.iter().map(|(_, grid)| grid)
    }
}
