use crate::cli::PlayArgs;
use anyhow::{ensure, Context, Result};
use apple_codec::{ActivationContext, Host, HostBinding, LuaScript, Player, Status};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::info;

/// A terminal standing in for the game: cells are drawn as block characters.
struct TerminalHost {
    started: Instant,
    binding: HostBinding,
    width: usize,
    height: usize,
    cells: Vec<bool>,
    dirty: bool,
}

impl TerminalHost {
    fn new(binding: HostBinding, width: usize, height: usize) -> Self {
        Self {
            started: Instant::now(),
            binding,
            width,
            height,
            cells: vec![false; width * height],
            dirty: true,
        }
    }

    fn render(&mut self, out: &mut impl Write) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let mut frame = String::with_capacity((self.width * 2 + 1) * self.height + 8);
        frame.push_str("\x1b[H");

        // Row 0 is the bottom one.
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                frame.push_str(if self.cells[y * self.width + x] {
                    "██"
                } else {
                    "  "
                });
            }

            frame.push('\n');
        }

        out.write_all(frame.as_bytes())?;
        out.flush()?;

        self.dirty = false;
        Ok(())
    }
}

impl Host for TerminalHost {
    fn activation_context(&self) -> ActivationContext {
        ActivationContext {
            identity: self.binding.identity.clone(),
            variant: self.binding.variant.clone(),
        }
    }

    fn clock_now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn render_cell(&mut self, alive: bool, x: i64, y: i64) {
        let x = x - self.binding.origin_x;
        let y = y - self.binding.origin_y;

        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
            if x < self.width && y < self.height {
                self.cells[y * self.width + x] = alive;
                self.dirty = true;
            }
        }
    }

    fn notify_ready(&mut self, message: &str) {
        info!("{}", message);
    }
}

pub fn run(args: PlayArgs) -> Result<()> {
    ensure!(args.refresh > 0, "--refresh must be non-zero");

    let src = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Couldn't read script: {}", args.script.display()))?;

    let script = LuaScript::parse(&src)
        .with_context(|| format!("Couldn't parse script: {}", args.script.display()))?;

    let params = *script.sequence.params();
    let mut host = TerminalHost::new(script.binding.clone(), params.width(), params.height());
    let mut player = Player::from_script(script);
    let period = Duration::from_secs_f64(1.0 / args.refresh as f64);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    write!(out, "\x1b[2J")?;

    if !player.on_activate(&mut host) {
        return Ok(());
    }

    while player.status() == Status::Running {
        host.render(&mut out)?;
        std::thread::sleep(period);
        player.on_tick(&mut host);
    }

    host.render(&mut out)?;

    info!(
        frames = player.state().frame_index(),
        seconds = player.sequence().duration(),
        "done"
    );

    Ok(())
}
