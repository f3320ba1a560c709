use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use lang::{
    compile_source, errors::diagnostics::Errors, interpreter::interpreter::StdoutSink,
    interpreter::value::Value, lexer::lexer::tokenize, run_source,
};

#[derive(Parser)]
#[command(version, about = "Lexer, type checker and interpreter for a small typed language")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log phase timings (-v), details (-vv) or everything (-vvv) to stderr
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Check a file and run one of its functions
    Run {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Function to call
        #[arg(short, long, default_value = "main")]
        entry: String,

        /// Argument for the entry function, in order (`42`, `1.5`, `true`, `"text"`)
        #[arg(long = "arg", value_name = "VALUE")]
        arguments: Vec<Value>,
    },
    /// Lex, parse and type check a file without running it
    Check {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Print the tokens of a file
    Tokens {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &Path) -> anyhow::Result<(String, String)> {
    let source =
        read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok((source, file_name))
}

fn report(errors: &Errors, file_name: &str) -> anyhow::Error {
    eprint!("{}", errors);
    let stage = if errors.has_runtime_errors() {
        "failed while running"
    } else {
        "failed to compile"
    };
    anyhow!("{} {} ({} error(s))", file_name, stage, errors.len())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let start = Instant::now();

    match args.command {
        Command::Run {
            input,
            entry,
            arguments,
        } => {
            let (source, file_name) = read_source(&input)?;
            let mut output = StdoutSink;

            match run_source(&source, &file_name, &entry, arguments, &mut output) {
                Ok(Value::Void) => info!(entry = %entry, "run finished"),
                Ok(value) => println!("{}", value),
                Err(errors) => return Err(report(&errors, &file_name)),
            }
        }
        Command::Check { input } => {
            let (source, file_name) = read_source(&input)?;

            match compile_source(&source, &file_name) {
                Ok(checked) => println!(
                    "{}: ok ({} functions, {} globals)",
                    file_name,
                    checked.program().functions.len(),
                    checked.program().globals.len()
                ),
                Err(errors) => return Err(report(&errors, &file_name)),
            }
        }
        Command::Tokens { input } => {
            let (source, file_name) = read_source(&input)?;

            match tokenize(&source) {
                Ok(tokens) => {
                    for token in tokens.iter() {
                        println!("{}", token.debug());
                    }
                }
                Err(lex_errors) => {
                    let mut errors = Errors::new();
                    for error in lex_errors.iter() {
                        errors.report(error, &file_name, &source);
                    }
                    return Err(report(&errors, &file_name));
                }
            }
        }
    }

    info!(elapsed = ?start.elapsed(), "done");
    Ok(())
}
