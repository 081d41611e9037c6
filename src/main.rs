use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use std::io::{stdin, stdout, BufReader, Write};
use std::time::Instant;

use connect4_negamax::arena::{self, ArenaConfig};
use connect4_negamax::player::{Computer, Human};
use connect4_negamax::session::Session;
use connect4_negamax::*;

mod display;

/// Connect Four against a negamax opponent
#[derive(Parser)]
#[command(name = "connect4")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer (default)
    Play(PlayArgs),
    /// Play two search depths against each other from every two-move opening
    Arena(ArenaArgs),
}

#[derive(Args, Clone)]
struct BoardArgs {
    /// Number of columns
    #[arg(long, default_value_t = WIDTH)]
    width: usize,
    /// Number of rows
    #[arg(long, default_value_t = HEIGHT)]
    height: usize,
    /// Discs in a line needed to win
    #[arg(long, default_value_t = WIN_LENGTH)]
    win_length: usize,
}

impl Default for BoardArgs {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            win_length: WIN_LENGTH,
        }
    }
}

#[derive(Args, Clone)]
struct EngineArgs {
    /// How leaf positions are scored
    #[arg(long, value_enum, default_value_t = EvaluationArg::Coarse)]
    evaluation: EvaluationArg,
    /// Search every branch instead of using alpha-beta pruning
    #[arg(long)]
    no_pruning: bool,
}

impl Default for EngineArgs {
    fn default() -> Self {
        Self {
            evaluation: EvaluationArg::Coarse,
            no_pruning: false,
        }
    }
}

impl EngineArgs {
    fn engine(&self, depth: u32) -> Result<Negamax> {
        Ok(Negamax::new(depth)?
            .with_pruning(!self.no_pruning)
            .with_evaluation(self.evaluation.into()))
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum EvaluationArg {
    /// A loss scores -100, everything else 0
    Coarse,
    /// Prefer quicker wins and slower losses
    DepthAware,
}

impl From<EvaluationArg> for Evaluation {
    fn from(arg: EvaluationArg) -> Self {
        match arg {
            EvaluationArg::Coarse => Evaluation::Coarse,
            EvaluationArg::DepthAware => Evaluation::DepthAware,
        }
    }
}

#[derive(Args, Clone, Default)]
struct PlayArgs {
    #[command(flatten)]
    board: BoardArgs,
    #[command(flatten)]
    engine: EngineArgs,
    /// easy, medium or hard
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,
    /// Search depth, overrides the difficulty
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    depth: Option<u32>,
    /// Let the computer make the first move
    #[arg(long)]
    computer_first: bool,
}

#[derive(Args, Clone)]
struct ArenaArgs {
    #[command(flatten)]
    board: BoardArgs,
    #[command(flatten)]
    engine: EngineArgs,
    /// Search depth of player 1
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    first: u32,
    /// Search depth of player 2
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    second: u32,
}

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Warn).env().init()?;
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Arena(args)) => run_arena(&args),
        Some(Commands::Play(args)) => play(&args),
        None => play(&PlayArgs::default()),
    }
}

fn play(args: &PlayArgs) -> Result<()> {
    let state = GameState::with_win_length(args.board.width, args.board.height, args.board.win_length)?;
    let engine = args
        .engine
        .engine(args.depth.unwrap_or_else(|| args.difficulty.depth()))?;

    let human = Box::new(Human::new("You", BufReader::new(stdin()), stdout()));
    let computer = Box::new(Computer::new("AI", engine));
    let mut session = if args.computer_first {
        Session::new(state, computer, human)
    } else {
        Session::new(state, human, computer)
    };

    println!("Welcome to Connect {}\n", args.board.win_length);

    loop {
        display::draw(session.state())?;
        println!("{}", session.status_message());

        while session.state().outcome().is_none() {
            let spinner = if session.player(session.state().current_player()).is_computer() {
                let spinner = ProgressBar::new_spinner();
                spinner.set_message("AI is thinking...");
                spinner.enable_steady_tick(100);
                Some(spinner)
            } else {
                None
            };

            let turn = session.play_turn()?;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
                println!("AI played column {}", turn.column + 1);
            }
            display::draw(session.state())?;
            println!("{}", session.status_message());
        }

        if !ask_yes_no("Play again? y/n: ")? {
            break;
        }
        if let Some(difficulty) = ask_difficulty()? {
            session.set_difficulty(difficulty);
        }
        session.reset();
    }
    Ok(())
}

fn ask_yes_no(prompt: &str) -> Result<bool> {
    loop {
        print!("{}", prompt);
        stdout().flush().expect("failed to flush to stdout!");

        let mut buffer = String::new();
        if stdin().read_line(&mut buffer)? == 0 {
            return Ok(false);
        }
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

/// Blank input keeps the current difficulty
fn ask_difficulty() -> Result<Option<Difficulty>> {
    loop {
        print!("Difficulty (easy/medium/hard, blank to keep): ");
        stdout().flush().expect("failed to flush to stdout!");

        let mut buffer = String::new();
        stdin().read_line(&mut buffer)?;
        if buffer.trim().is_empty() {
            return Ok(None);
        }
        match buffer.parse::<Difficulty>() {
            Ok(difficulty) => return Ok(Some(difficulty)),
            Err(err) => println!("{}", err),
        }
    }
}

fn run_arena(args: &ArenaArgs) -> Result<()> {
    let config = ArenaConfig {
        width: args.board.width,
        height: args.board.height,
        win_length: args.board.win_length,
        first: args.engine.engine(args.first)?,
        second: args.engine.engine(args.second)?,
    };

    let start = Instant::now();
    let progress = ProgressBar::new(arena::openings(config.width).len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing openings: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );
    let report = arena::run(&config, Some(&progress))?;
    progress.finish();

    println!(
        "Depth {} (player 1) vs depth {} (player 2), {} games in {}",
        args.first,
        args.second,
        report.games.len(),
        HumanDuration(start.elapsed())
    );
    println!("Player 1 wins: {}", report.first_wins);
    println!("Player 2 wins: {}", report.second_wins);
    println!("Draws: {}", report.draws);
    Ok(())
}
