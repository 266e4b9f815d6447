mod render;
mod script;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use board::column::Column;
use board::engine::EngineCore;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::script::{Replay, parse_line};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("line {line}: invalid event: {source}")]
    Parse { line: usize, source: serde_json::Error },
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "orderboard", about = "Restaurant order board: replay UI events and print the board")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a newline-delimited JSON event log and print the final board.
    Replay(ReplayArgs),
    /// List the board columns, left to right.
    Columns,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long, env = "ORDERBOARD_INPUT", default_value = "-", help = "Input file path, or - for stdin")]
    input: String,

    #[arg(long, env = "ORDERBOARD_FORMAT", value_enum, default_value_t = Format::Text)]
    format: Format,

    #[arg(long, default_value_t = false, help = "Print every emitted action as a JSON line")]
    actions: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(args) => run_replay(&args),
        Command::Columns => {
            for column in Column::ALL {
                println!("{column}");
            }
            Ok(())
        }
    }
}

fn run_replay(args: &ReplayArgs) -> Result<(), CliError> {
    let read_err = |source| CliError::Read { path: args.input.clone(), source };
    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&args.input).map_err(read_err)?))
    };

    let mut replay = Replay::new(EngineCore::new());
    let mut events = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(read_err)?;
        let Some(event) = parse_line(&line).map_err(|source| CliError::Parse { line: idx + 1, source })? else {
            continue;
        };
        events += 1;
        for action in replay.apply(event) {
            if args.actions {
                println!("{}", serde_json::to_string(&action)?);
            }
        }
    }

    if let Some(selection) = replay.selection() {
        tracing::warn!(id = %selection.id(), "script ended with an edit still open; it was never submitted");
    }

    let snapshot = replay.core().snapshot();
    tracing::info!(events, orders = replay.core().store.len(), "replay finished");

    match args.format {
        Format::Text => print!("{}", render::render_text(&snapshot)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
    }
    Ok(())
}
