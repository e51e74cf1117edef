//! Compare compile time, binary size and runtime of benchmark executables.
//!
//! Each executable is built with `make <exe>` and run as `./<exe>`; its
//! output must report `average runtime: <seconds>`. Ratios are printed
//! relative to the first executable.

use std::path::Path;
use std::process::Command;
use std::time::Instant;

use tracing::debug;

const RUNTIME_MARKER: &str = "average runtime:";

fn make(args: &[&str]) -> Result<(), String> {
    debug!(?args, "invoking make");
    let status = Command::new("make")
        .args(args)
        .status()
        .map_err(|e| format!("cannot run make: {}", e))?;
    if !status.success() {
        return Err(format!("make {} failed ({})", args.join(" "), status));
    }
    Ok(())
}

fn compile(exe: &str) -> Result<f64, String> {
    println!("Compiling {}", exe);
    let start = Instant::now();
    make(&[exe])?;
    let delta = start.elapsed().as_secs_f64();
    println!("Compilation took {:.2} seconds", delta);
    Ok(delta)
}

fn binary_size(exe: &str) -> Result<f64, String> {
    std::fs::metadata(exe)
        .map(|m| m.len() as f64)
        .map_err(|e| format!("cannot stat '{}': {}", exe, e))
}

fn run(exe: &str) -> Result<f64, String> {
    println!("Running {}", exe);
    let program = Path::new(".").join(exe);
    let output = Command::new(&program)
        .output()
        .map_err(|e| format!("cannot run '{}': {}", program.display(), e))?;
    if !output.status.success() {
        return Err(format!("'{}' failed ({})", program.display(), output.status));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    println!("{}", stdout);
    parse_average_runtime(&stdout)
        .ok_or_else(|| format!("'{}' did not report '{}'", exe, RUNTIME_MARKER))
}

/// The number following `average runtime:` on the same line.
fn parse_average_runtime(output: &str) -> Option<f64> {
    let (_, rest) = output.split_once(RUNTIME_MARKER)?;
    rest.lines().next()?.trim().parse().ok()
}

fn print_ratios(title: &str, names: &[String], values: &[f64]) {
    println!("{}", title);
    for (name, value) in names.iter().zip(values).skip(1) {
        println!(" -- {}/{}: {:.2}", name, names[0], value / values[0]);
    }
}

fn compare(executables: &[String], names: &[String], clean: bool) -> Result<(), String> {
    if executables.len() != names.len() {
        return Err("number of executables and names don't match".to_string());
    }

    if clean {
        make(&["clean"])?;
    }

    // Compile times are only reported after a clean build.
    let compile_times = executables
        .iter()
        .map(|exe| compile(exe))
        .collect::<Result<Vec<_>, _>>()?;
    let runtimes = executables
        .iter()
        .map(|exe| run(exe))
        .collect::<Result<Vec<_>, _>>()?;
    let sizes = executables
        .iter()
        .map(|exe| binary_size(exe))
        .collect::<Result<Vec<_>, _>>()?;

    if clean {
        print_ratios("Compile time ratios:", names, &compile_times);
    }
    print_ratios("Binary size ratios:", names, &sizes);
    print_ratios("Runtime ratios:", names, &runtimes);
    Ok(())
}

/// Returns exit code: 0 = success, 1 = error.
pub fn run_compare(executables: &[String], names: &[String], clean: bool) -> i32 {
    match compare(executables, names, clean) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {}", e);
            1
        }
    }
}
