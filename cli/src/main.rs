use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minesweep_core::{CellCount, GameConfig};
use rand::Rng;
use std::io::{self, BufRead, Write};

use command::{Command, HELP};
use game::Session;

mod command;
mod game;
mod render;

/// Play minesweeper in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Number of rows
    #[arg(short, long, default_value_t = 9, value_parser = clap::value_parser!(u8).range(1..))]
    rows: u8,

    /// Number of columns
    #[arg(short, long, default_value_t = 9, value_parser = clap::value_parser!(u8).range(1..))]
    columns: u8,

    /// Share of tiles hiding a mine, in percent (1-99)
    #[arg(short, long, default_value_t = 15.0)]
    density: f32,

    /// Exact number of mines, overrides the density
    #[arg(short, long, conflicts_with = "density")]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let size = (self.rows, self.columns);
        Ok(match self.mines {
            Some(mines) => GameConfig::new(size, mines)
                .with_context(|| format!("{mines} mines do not fit a {}x{} board", size.0, size.1))?,
            None => GameConfig::from_density(size, self.density),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.game_config()?;
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("seed: {}", seed);

    let mut session = Session::new(config, seed);
    let mut out = io::stdout().lock();
    print_session(&mut out, &session)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read from stdin")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        log::trace!("command: {:?}", command);

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::NewGame => session.restart(),
            Command::Reveal(coords) | Command::Mark(coords) => {
                let mark = matches!(command, Command::Mark(_));
                if let Err(err) = session.play(coords, mark) {
                    eprintln!("{err}");
                    continue;
                }
            }
        }
        print_session(&mut out, &session)?;
    }

    Ok(())
}

fn print_session(out: &mut impl Write, session: &Session) -> io::Result<()> {
    write!(out, "{}", session.display())?;
    writeln!(out, "{}", session.status_line())?;
    out.flush()
}
