mod compare;
mod config;
mod example_runner;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::example_runner::{Mode, RunOptions};

const SUBCOMMANDS: &[&str] = &["run", "list", "compare", "help"];

#[derive(Parser)]
#[command(
    name = "docex",
    version,
    about = "Build and run the code examples embedded in a README"
)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (default: ./docex.toml, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build and run the examples of a README
    Run(RunArgs),

    /// List the examples of a README and their block kinds
    List(ListArgs),

    /// Compare compile time, binary size and runtime of benchmark executables
    Compare(CompareArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// C compiler, exported as CC to build commands
    #[arg(short = 'c', long)]
    c_compiler: Option<String>,

    /// C++ compiler, exported as CXX to build commands
    #[arg(short = 'x', long)]
    cxx_compiler: Option<String>,

    /// Path to the README.md file
    #[arg(short, long)]
    readme: Option<PathBuf>,

    /// Run only the example with this name
    #[arg(short, long)]
    name: Option<String>,

    /// Working directory created for each example (must not exist)
    #[arg(long)]
    workdir: Option<String>,

    /// Assemble the examples without building them
    #[arg(long, conflicts_with = "show")]
    check: bool,

    /// Print the assembled examples without building them
    #[arg(long)]
    show: bool,
}

#[derive(clap::Args)]
struct ListArgs {
    /// Path to the README.md file
    #[arg(short, long)]
    readme: Option<PathBuf>,
}

#[derive(clap::Args)]
struct CompareArgs {
    /// The benchmark executables to run
    #[arg(short, long, num_args = 1.., required = true)]
    executables: Vec<String>,

    /// The displayed names of the benchmarks
    #[arg(short, long, num_args = 1.., required = true)]
    names: Vec<String>,

    /// Force recompilation and report compile times
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    clean: bool,
}

fn main() {
    // Backwards compatibility: without a subcommand, `docex -c .. -x .. -r ..`
    // behaves like `docex run -c .. -x .. -r ..`.
    let mut args: Vec<String> = std::env::args().collect();
    inject_default_subcommand(&mut args);

    let cli = Cli::parse_from(&args);
    init_logging(cli.verbose);

    let file_config = match config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    let exit_code = match cli.command {
        Command::Run(run_args) => {
            let settings = match file_config.resolve(
                run_args.c_compiler,
                run_args.cxx_compiler,
                run_args.readme,
                run_args.workdir,
            ) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("error: {}", e);
                    process::exit(2);
                }
            };
            let mode = if run_args.check {
                Mode::Check
            } else if run_args.show {
                Mode::Show
            } else {
                Mode::Execute
            };
            let options = RunOptions {
                name: run_args.name.as_deref(),
                mode,
                no_color: cli.no_color,
            };
            example_runner::run_examples(&settings, &options)
        }
        Command::List(list_args) => match file_config.readme(list_args.readme) {
            Ok(readme) => example_runner::list_examples(&readme, cli.no_color),
            Err(e) => {
                eprintln!("error: {}", e);
                2
            }
        },
        Command::Compare(compare_args) => compare::run_compare(
            &compare_args.executables,
            &compare_args.names,
            compare_args.clean,
        ),
    };
    process::exit(exit_code);
}

/// Insert `run` before the first argument that is neither a global flag nor
/// a subcommand.
fn inject_default_subcommand(args: &mut Vec<String>) {
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-color" | "--verbose" => i += 1,
            "--config" => i += 2,
            a if a.starts_with("--config=") => i += 1,
            a if a.len() > 1 && a.starts_with('-') && a[1..].chars().all(|c| c == 'v') => i += 1,
            _ => break,
        }
    }
    match args.get(i).map(String::as_str) {
        None | Some("-h" | "--help" | "-V" | "--version") => {}
        Some(first) if SUBCOMMANDS.contains(&first) => {}
        Some(_) => args.insert(i, "run".to_string()),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
