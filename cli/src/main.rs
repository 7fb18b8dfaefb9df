use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use rand::RngExt;

mod command;
mod config;
mod render;
mod session;

use command::{Command, CommandError, HELP};
use config::{FileConfig, Overrides, Settings};
use session::{Session, Step};

#[derive(Parser, Debug)]
#[command(version, about = "Clear the grid without hitting a mine", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of columns
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,

    /// Number of rows
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,

    /// Fraction of cells holding a mine
    #[arg(short, long)]
    density: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .with_ansi(wants_color(&io::stderr()))
        .init();

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(
        file,
        Overrides {
            width: args.width,
            height: args.height,
            density: args.density,
        },
    );
    log::debug!("settings: {:?}", settings);

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut session = Session::new(settings, seed).context("Could not start a game")?;

    run(&mut session, io::stdin().lock(), io::stdout().lock())
}

/// Color codes only when a person is reading the stream.
fn wants_color(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}

fn run(session: &mut Session, input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
    draw(session, &mut out)?;
    writeln!(out, "{}", HELP)?;

    for line in input.lines() {
        let line = line.context("Could not read input")?;

        let step = match line.parse::<Command>() {
            Ok(command) => session.apply(command).map_err(CommandError::from),
            Err(err) => Err(err),
        };

        match step {
            Ok(Step::Redraw) => draw(session, &mut out)?,
            Ok(Step::Unchanged) => {}
            Ok(Step::ShowHelp) => writeln!(out, "{}", HELP)?,
            Ok(Step::Quit) => break,
            Err(err) => writeln!(out, "{}", err)?,
        }
        out.flush()?;
    }

    Ok(())
}

fn draw(session: &Session, out: &mut impl Write) -> io::Result<()> {
    write!(
        out,
        "{}",
        render::render(&session.observe(), session.elapsed_secs())
    )?;
    if let Some(banner) = render::banner(session.status()) {
        writeln!(out, "{}  (n for a new game)", banner)?;
    }
    out.flush()
}
