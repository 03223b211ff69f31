use crate::cli::ConverterChoice;
use anyhow::{bail, Context, Result};
use apple_codec::Params;
use image::{imageops, imageops::FilterType, Pixel, RgbImage};
use indicatif::ParallelProgressIterator;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Turns one raster frame into a `0`/`1` text grid.
#[derive(Clone, Copy, Debug)]
pub struct Converter {
    choice: ConverterChoice,
    width: usize,
    height: usize,
}

/// Outcome of a conversion batch; failed frames don't stop the others.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub converted: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, anyhow::Error)>,
}

impl Converter {
    pub fn new(choice: ConverterChoice, params: &Params) -> Self {
        Self {
            choice,
            width: params.width(),
            height: params.height(),
        }
    }

    pub fn convert(&self, image: &Path, out_dir: &Path) -> Result<PathBuf> {
        let name = image
            .file_stem()
            .with_context(|| format!("Frame has no file name: {}", image.display()))?;

        let out = out_dir.join(name).with_extension("txt");

        let result = match self.choice {
            ConverterChoice::Jp2a => self.run_jp2a(image, &out),
            ConverterChoice::Builtin => self.run_builtin(image, &out),
        };

        if result.is_err() {
            // Never leave a half-written grid behind for the encoder to pick up.
            let _ = std::fs::remove_file(&out);
        }

        result.map(|()| out)
    }

    fn run_jp2a(&self, image: &Path, out: &Path) -> Result<()> {
        let output = Command::new("jp2a")
            .arg(image)
            .arg(format!("--width={}", self.width))
            .arg(format!("--height={}", self.height))
            .arg("--chars=01")
            .arg(format!("--output={}", out.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .context("Couldn't run jp2a; is it installed and on PATH?")?;

        if !output.status.success() {
            bail!(
                "jp2a failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(())
    }

    fn run_builtin(&self, image: &Path, out: &Path) -> Result<()> {
        let img = image::open(image)
            .with_context(|| format!("Couldn't decode frame: {}", image.display()))?
            .to_rgb8();

        std::fs::write(out, self.grid_text(&img))
            .with_context(|| format!("Couldn't write frame: {}", out.display()))
    }

    /// Scales `img` to the grid and marks cells at least half-bright as alive.
    pub fn grid_text(&self, img: &RgbImage) -> String {
        let img = imageops::resize(
            img,
            self.width as u32,
            self.height as u32,
            FilterType::Triangle,
        );

        let mut text = String::with_capacity((self.width + 1) * self.height);

        for y in 0..img.height() {
            for x in 0..img.width() {
                let p = {
                    let p = img.get_pixel(x, y);
                    let r = p.channels()[0] as f32;
                    let g = p.channels()[1] as f32;
                    let b = p.channels()[2] as f32;

                    (r + g + b) / 3.0 / 255.0
                };

                text.push(if p >= 0.5 { '1' } else { '0' });
            }

            writeln!(text).unwrap();
        }

        text
    }
}

/// Converts every frame in parallel; order of `converted` follows `images`.
pub fn convert_all(converter: &Converter, images: &[PathBuf], out_dir: &Path) -> ConversionReport {
    let results: Vec<_> = images
        .par_iter()
        .progress_count(images.len() as u64)
        .map(|image| (image, converter.convert(image, out_dir)))
        .collect();

    let mut report = ConversionReport::default();

    for (image, result) in results {
        match result {
            Ok(grid) => report.converted.push(grid),
            Err(err) => report.failures.push((image.clone(), err)),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn converter(width: usize, height: usize) -> Converter {
        Converter::new(
            ConverterChoice::Builtin,
            &Params::new(width, height, 30).unwrap(),
        )
    }

    #[test]
    fn thresholds_at_half_brightness() {
        let img = RgbImage::from_fn(4, 1, |x, _| match x {
            0 => Rgb([0, 0, 0]),
            1 => Rgb([255, 255, 255]),
            2 => Rgb([255, 0, 255]),
            _ => Rgb([100, 100, 100]),
        });

        assert_eq!(converter(4, 1).grid_text(&img), "0110\n");
    }

    #[test]
    fn scales_to_the_grid() {
        let img = RgbImage::from_fn(40, 20, |x, _| {
            if x < 20 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });

        assert_eq!(converter(4, 2).grid_text(&img), "1100\n1100\n");
    }

    #[test]
    fn batch_keeps_going_after_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("out0001.png");
        let bad = dir.path().join("out0002.png");

        RgbImage::from_pixel(8, 8, Rgb([255, 255, 255]))
            .save(&good)
            .unwrap();
        std::fs::write(&bad, b"not a png").unwrap();

        let out_dir = dir.path().join("ascii");
        std::fs::create_dir(&out_dir).unwrap();

        let report = convert_all(&converter(2, 2), &[good, bad.clone()], &out_dir);

        assert_eq!(report.converted, vec![out_dir.join("out0001.txt")]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, bad);
        assert!(!out_dir.join("out0002.txt").exists());
        assert_eq!(
            std::fs::read_to_string(out_dir.join("out0001.txt")).unwrap(),
            "11\n11\n"
        );
    }
}
