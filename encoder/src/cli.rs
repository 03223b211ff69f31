use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "apple-encoder", version, about = "Bad Apple, but it's a TheoTown city")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Turn a video into `render.lua` + `entry_point.json` (requires `ffmpeg`).
    Encode(EncodeArgs),
    /// Replay a generated `render.lua` in the terminal.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// Path to the input video file.
    #[arg(long, default_value = "bad_apple.mp4")]
    pub video: PathBuf,

    /// Frames per second to sample the video at.
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Width of the grid, in cells.
    #[arg(long, default_value_t = 64)]
    pub width: usize,

    /// Height of the grid, in cells.
    #[arg(long, default_value_t = 64)]
    pub height: usize,

    /// World X coordinate of the grid's bottom-left cell.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub start_x: i64,

    /// World Y coordinate of the grid's bottom-left cell.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub start_y: i64,

    /// Directory for the extracted JPG frames.
    #[arg(long, default_value = "frames-jpg")]
    pub tmp_frames_dir: PathBuf,

    /// Directory for the converted text frames.
    #[arg(long, default_value = "frames-ascii")]
    pub out_frames_dir: PathBuf,

    /// Directory for `render.lua` and `entry_point.json`.
    #[arg(long, default_value = "bad_apple")]
    pub out_lua_dir: PathBuf,

    /// How extracted frames become text grids.
    #[arg(long, value_enum, default_value_t = ConverterChoice::Jp2a)]
    pub converter: ConverterChoice,

    /// City name the script waits for before playing.
    #[arg(long, default_value = "Bad Apple")]
    pub city_name: String,

    /// City seed the script waits for before playing.
    #[arg(long, default_value = "flat")]
    pub city_seed: String,

    /// Ground tile for alive cells.
    #[arg(long, default_value = "$asphalt04")]
    pub alive_cell: String,

    /// Ground tile for dead cells.
    #[arg(long, default_value = "$asphalt01")]
    pub dead_cell: String,

    /// Toast shown once playback starts.
    #[arg(long, default_value = "Bad Apple!!")]
    pub ready_message: String,

    /// Plugin id written to the manifest.
    #[arg(long, default_value = "$badapple")]
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct PlayArgs {
    /// A `render.lua` produced by `encode`.
    pub script: PathBuf,

    /// Redraws per second; playback speed follows the script's FPS regardless.
    #[arg(long, default_value_t = 60)]
    pub refresh: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConverterChoice {
    /// Shell out to `jp2a --chars=01`.
    Jp2a,
    /// Threshold the frames in-process.
    Builtin,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn encode_defaults_match_the_classic_setup() {
        let Cli { cmd } = Cli::parse_from(["apple-encoder", "encode"]);
        let Command::Encode(args) = cmd else {
            panic!("expected encode");
        };

        assert_eq!(args.fps, 30);
        assert_eq!((args.width, args.height), (64, 64));
        assert_eq!(args.out_lua_dir, PathBuf::from("bad_apple"));
        assert_eq!(args.converter, ConverterChoice::Jp2a);
        assert_eq!(args.id, "$badapple");
    }

    #[test]
    fn accepts_negative_origin() {
        let Cli { cmd } = Cli::parse_from([
            "apple-encoder",
            "encode",
            "--start-x",
            "-40",
            "--start-y=-2",
            "--converter",
            "builtin",
        ]);
        let Command::Encode(args) = cmd else {
            panic!("expected encode");
        };

        assert_eq!((args.start_x, args.start_y), (-40, -2));
        assert_eq!(args.converter, ConverterChoice::Builtin);
    }
}
