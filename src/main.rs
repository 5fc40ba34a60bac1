use std::{
    fs,
    io::{self, BufRead},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use decalc::{
    Calculator,
    history::{self, History},
    util::num::to_plain_string,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// decalc evaluates arithmetic expressions in arbitrary-precision decimal
/// arithmetic.
///
/// Expressions given on the command line are evaluated in order on one
/// calculator, so `ANS` refers to the previous result. With no expressions
/// and no file, one expression is read per line from standard input.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expressions to evaluate, for example `"SQRT(2) * 3"`.
    expressions: Vec<String>,

    /// Evaluates one expression per non-blank line of a file.
    #[arg(short, long, conflicts_with = "expressions")]
    file: Option<PathBuf>,

    /// History file to record evaluations in.
    #[arg(long, env = "DECALC_HISTORY")]
    history: Option<PathBuf>,

    /// Does not record evaluations.
    #[arg(long, conflicts_with_all = ["show_history", "clear_history"])]
    no_history: bool,

    /// Prints the stored history before evaluating anything.
    #[arg(long)]
    show_history: bool,

    /// Empties the stored history before evaluating anything.
    #[arg(long)]
    clear_history: bool,
}

fn main() -> ExitCode {
    // Respects RUST_LOG.
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr))
                                  .with(EnvFilter::from_default_env())
                                  .init();

    match run(Args::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let mut history = if args.no_history {
        None
    } else {
        let path = args.history.clone().unwrap_or_else(history::default_path);
        Some(History::load(&path).with_context(|| format!("failed to load history from {}", path.display()))?)
    };

    if let Some(history) = history.as_mut() {
        if args.clear_history {
            history.clear().context("failed to clear history")?;
        }
        if args.show_history {
            for entry in history.entries() {
                println!("{entry}");
            }
        }
    }

    let maintenance_only = args.clear_history || args.show_history;
    let lines: Vec<String> = if let Some(path) = &args.file {
        fs::read_to_string(path).with_context(|| format!("failed to read input file {}", path.display()))?
                                .lines()
                                .map(str::to_string)
                                .collect()
    } else if !args.expressions.is_empty() {
        args.expressions
    } else if maintenance_only {
        Vec::new()
    } else {
        io::stdin().lock()
                   .lines()
                   .collect::<io::Result<_>>()
                   .context("failed to read standard input")?
    };

    let mut calculator = Calculator::new();
    let failed = evaluate_lines(&mut calculator, history.as_mut(), &lines);

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Evaluates each non-blank line in order, printing results and errors.
///
/// A line that fails to evaluate or to be recorded is reported on stderr and
/// the remaining lines still run.
///
/// # Returns
/// `true` if any line failed.
fn evaluate_lines(calculator: &mut Calculator, mut history: Option<&mut History>, lines: &[String]) -> bool {
    let mut failed = false;

    for source in lines.iter().map(|line| line.trim()).filter(|line| !line.is_empty()) {
        match calculator.evaluate(source) {
            Ok(value) => {
                println!("{}", to_plain_string(&value));
                if let Some(history) = history.as_deref_mut()
                   && let Err(err) = history.append(source, value)
                {
                    eprintln!("{source}: failed to record history: {err}");
                    failed = true;
                }
            },
            Err(err) => {
                eprintln!("{source}: {err}");
                failed = true;
            },
        }
    }
    failed
}
