//! Command-line front end: argument parsing, file opening, and rendering of
//! predictions and errors. All numeric work lives in the library.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use knn::{Config, Engine, Error, Prediction, Task};

// sysexits-style codes.
const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_IOERR: u8 = 74;

/// k-nearest-neighbor classification and regression over a comma-separated
/// table.
///
/// Queries are read from stdin in the same column order as FILE, minus the
/// label column, one query per line.
#[derive(Parser, Debug)]
#[command(name = "knn", version, about)]
struct Cli {
    /// Classify data read from stdin.
    #[arg(
        short = 'c',
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "regression"
    )]
    classification: bool,

    /// Predict the dependent variable in the label column; requires
    /// --label-column.
    #[arg(
        short = 'r',
        long,
        action = ArgAction::SetTrue,
        requires = "label_column"
    )]
    regression: bool,

    /// Column number to use as the label, 0-indexed. Inferred from the data
    /// when omitted; required for regression and for tables with no
    /// non-numeric column.
    #[arg(short = 'l', long = "label-column")]
    label_column: Option<usize>,

    /// Number of nearest neighbors per query.
    #[arg(short = 'k', long = "k-nearest", default_value_t = 5)]
    k: usize,

    /// Number of worker threads for the distance pass.
    #[arg(short = 't', long, default_value_t = 4)]
    threads: usize,

    /// Comma-separated value file in which the first row may be a header.
    /// At most one column may be non-numeric; that column is the label.
    file: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.k == 0 {
        eprintln!("-k/--k-nearest must be at least 1");
        return ExitCode::from(EX_USAGE);
    }
    if cli.threads == 0 {
        eprintln!("-t/--threads must be at least 1");
        return ExitCode::from(EX_USAGE);
    }

    let task = if cli.regression {
        Task::Regression
    } else {
        Task::Classification
    };
    let config = Config {
        task,
        label_column: cli.label_column,
        k: cli.k,
        thread_count: cli.threads,
        training_file: cli.file,
    };

    let file = match File::open(&config.training_file) {
        Ok(file) => file,
        Err(err) => {
            eprintln!(
                "file '{}' does not exist or could not be opened: {err}",
                config.training_file.display()
            );
            return ExitCode::from(EX_IOERR);
        }
    };
    let mut reader = BufReader::new(file);

    let engine = match Engine::from_reader(&config, &mut reader) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("{}: {err}", config.training_file.display());
            return ExitCode::from(exit_code(&err));
        }
    };

    println!("Training data parsed");
    println!("Reading input queries in same format as input file, one query per line");
    println!("Use Ctrl-D to end queries");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = engine.run(stdin.lock(), |line_no, outcome| match outcome {
        Ok(Prediction::Label(label)) => {
            let _ = writeln!(out, "Predicted data point classification: {label}");
        }
        Ok(Prediction::Value(value)) => {
            let _ = writeln!(out, "Predicted output feature: {value}");
        }
        Err(err) => eprintln!("query line {line_no}: {err}"),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &Error) -> u8 {
    match err {
        Error::Io(_) => EX_IOERR,
        _ => EX_DATAERR,
    }
}
