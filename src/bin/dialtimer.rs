//! `dialtimer`: a radial kitchen timer in the terminal.
//!
//! ```text
//! dialtimer 25          # twenty-five minute countdown
//! dialtimer 1:30 -f     # ninety seconds, fullscreen
//! dialtimer             # stopwatch
//! ```

use bubbletea_dialtimer::alarm::{self, Bell};
use bubbletea_dialtimer::config::{
    with_dial_size, with_duration, with_frame_rate, with_fullscreen, with_live_step,
    without_help, TimerOption, DEFAULT_DIAL_SIZE, DEFAULT_FPS,
};
use bubbletea_dialtimer::format::parse_duration;
use bubbletea_dialtimer::timer::{self, AlarmMsg, TimeoutMsg};
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, MouseMotion, Msg, Program};
use clap::Parser;
use log::{info, LevelFilter};
use once_cell::sync::OnceCell;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Countdown length: minutes (`25`), `MM:SS` or `:SS`. Omit for a stopwatch.
    #[arg(value_parser = parse_duration)]
    duration: Option<Duration>,

    /// Redraws per second while running
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Seconds added or removed per wheel notch while running
    #[arg(long, default_value_t = 60)]
    live_step: u64,

    /// Dial width in columns
    #[arg(long, default_value_t = DEFAULT_DIAL_SIZE.0)]
    width: usize,

    /// Dial height in rows
    #[arg(long, default_value_t = DEFAULT_DIAL_SIZE.1)]
    height: usize,

    /// Fill the terminal with the dial
    #[arg(short, long)]
    fullscreen: bool,

    /// Hide the key help
    #[arg(long)]
    no_help: bool,

    /// Bells per alarm, 0 to silence
    #[arg(long, default_value_t = 3)]
    bell_repeat: usize,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn timer_options(&self) -> Vec<TimerOption> {
        let mut opts = vec![
            with_frame_rate(self.fps),
            with_live_step(Duration::from_secs(self.live_step)),
            with_dial_size(self.width, self.height),
        ];
        if let Some(d) = self.duration {
            opts.push(with_duration(d));
        }
        if self.fullscreen {
            opts.push(with_fullscreen());
        }
        if self.no_help {
            opts.push(without_help());
        }
        opts
    }
}

// `Model::init` takes no arguments, so the parsed command line is parked here.
static ARGS: OnceCell<Args> = OnceCell::new();

struct App {
    timer: timer::Model,
    bell: Bell<io::Stdout>,
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let (opts, repeat) = match ARGS.get() {
            Some(args) => (args.timer_options(), args.bell_repeat),
            None => (Vec::new(), 1),
        };
        let timer = timer::new(&opts);
        let cmd = timer.init();
        let app = Self {
            timer,
            bell: Bell::stdout().with_repeat(repeat),
        };
        (app, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(alarm_msg) = msg.downcast_ref::<AlarmMsg>() {
            if alarm_msg.id == self.timer.id() {
                alarm::sound(&mut self.bell);
            }
            return None;
        }
        if let Some(timeout) = msg.downcast_ref::<TimeoutMsg>() {
            if timeout.id == self.timer.id() {
                info!("stopwatch stopped at the hour");
            }
            return None;
        }
        self.timer.update(msg)
    }

    fn view(&self) -> String {
        self.timer.view()
    }
}

fn init_logging(path: Option<&PathBuf>) -> io::Result<()> {
    // The terminal belongs to the UI, so logs only go to a file.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;
    info!("starting with {:?}", args);
    let _ = ARGS.set(args);

    let program = Program::<App>::builder()
        .signal_handler(true)
        .mouse_motion(MouseMotion::Cell)
        .build()?;
    program.run().await?;
    Ok(())
}
