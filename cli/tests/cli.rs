//! End-to-end tests for the `docex` binary. Every README used here builds
//! its examples with plain shell commands, so no compiler is needed.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn docex(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_docex"))
        .args(args)
        .arg("--no-color")
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run docex")
}

/// Run docex with `bin` searched first on PATH.
fn docex_with_path(dir: &Path, bin: &Path, args: &[&str]) -> Output {
    let path = format!(
        "{}:{}",
        bin.display(),
        std::env::var("PATH").unwrap_or_default()
    );
    Command::new(env!("CARGO_BIN_EXE_docex"))
        .args(args)
        .arg("--no-color")
        .current_dir(dir)
        .env("PATH", path)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run docex")
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// A temp dir with a no-op `make` in `bin/` and one benchmark script per
/// `(name, output)` pair.
fn with_benchmarks(benchmarks: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("bin")).unwrap();
    write_script(&dir.path().join("bin/make"), "exit 0");
    for (name, output) in benchmarks {
        write_script(&dir.path().join(name), &format!("echo '{}'", output));
    }
    dir
}

fn with_readme(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), content).unwrap();
    dir
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

const PASSING: &str = "\
# Example project

```cpp xpress-hello-main
int main() { return 0; }
```

```bash xpress-hello-bash
test -f CMakeLists.txt && test -f my_app.cpp && echo hello-built
```

Reconfiguring must work too:

```bash xpress-config-bash
echo configured >> ../configured.txt
```

```text
not an example
```
";

#[test]
fn runs_every_example() {
    let dir = with_readme(PASSING);
    let out = docex(dir.path(), &["run", "-c", "cc", "-x", "c++", "-r", "README.md"]);

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let err = stderr(&out);
    assert!(err.contains("Running readme code 'hello'"));
    assert!(err.contains("Running readme code 'config'"));
    assert!(err.contains("example result: ok. 2 passed, 0 failed"));
    assert!(stdout(&out).contains("hello-built"));
    assert_eq!(
        fs::read_to_string(dir.path().join("configured.txt")).unwrap(),
        "configured\nconfigured\n"
    );
    assert!(!dir.path().join("_tmp").exists());
}

#[test]
fn subcommand_is_optional() {
    let dir = with_readme(PASSING);
    let out = docex(dir.path(), &["-c", "cc", "-x", "c++", "-r", "README.md", "-n", "hello"]);

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let err = stderr(&out);
    assert!(err.contains("Running readme code 'hello'"));
    assert!(!err.contains("Running readme code 'config'"));
    assert!(!dir.path().join("configured.txt").exists());
}

#[test]
fn first_failure_stops_the_run() {
    let dir = with_readme(
        "\
```bash xpress-broken-bash
exit 4
```
```bash xpress-later-bash
touch ../later-ran
```
",
    );
    let out = docex(dir.path(), &["run", "-c", "cc", "-x", "c++", "-r", "README.md"]);

    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("FAIL  broken"));
    assert!(err.contains("external tool error: build commands failed"));
    assert!(err.contains("0 passed, 1 failed, 1 not run"));
    assert!(!dir.path().join("later-ran").exists());
    assert!(!dir.path().join("_tmp").exists());
}

#[test]
fn unterminated_fence_is_reported() {
    let dir = with_readme("Intro\n\n```cpp xpress-open-snippet\nint x = 1;\n");
    let out = docex(dir.path(), &["run", "-c", "cc", "-x", "c++", "-r", "README.md"]);

    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("unterminated code block in example 'open'"));
    assert!(err.contains("README.md"));
    assert!(!dir.path().join("_tmp").exists());
}

#[test]
fn duplicate_blocks_are_reported() {
    let dir = with_readme(
        "```bash xpress-dup-bash\necho a\n```\n```bash xpress-dup-bash\necho b\n```\n",
    );
    let out = docex(dir.path(), &["run", "-c", "cc", "-x", "c++", "-r", "README.md"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("example 'dup' has more than one 'bash' block"));
}

#[test]
fn stale_workdir_aborts() {
    let dir = with_readme(PASSING);
    fs::create_dir(dir.path().join("scratch")).unwrap();
    let out = docex(
        dir.path(),
        &["run", "-c", "cc", "-x", "c++", "-r", "README.md", "--workdir", "scratch"],
    );

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("environment error: working directory 'scratch' already exists"));
    assert!(dir.path().join("scratch").exists());
}

#[test]
fn check_mode_builds_nothing() {
    let dir = with_readme("```bash xpress-side-bash\ntouch ../side-effect\n```\n");
    let out = docex(
        dir.path(),
        &["run", "-c", "cc", "-x", "c++", "-r", "README.md", "--check"],
    );

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert!(stderr(&out).contains("PASS  side"));
    assert!(!dir.path().join("side-effect").exists());
}

#[test]
fn show_prints_assembled_application() {
    let dir = with_readme("```cpp xpress-foo-snippet\nint x = 1 + 1;\n```\n");
    let out = docex(
        dir.path(),
        &["run", "-c", "cc", "-x", "c++", "-r", "README.md", "--show"],
    );

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let shown = stdout(&out);
    assert!(shown.contains("Application {"));
    assert!(shown.contains("name: \"my_app\""));
    assert!(shown.contains("Snippet finished"));
}

#[test]
fn unknown_name_fails() {
    let dir = with_readme(PASSING);
    let out = docex(
        dir.path(),
        &["run", "-c", "cc", "-x", "c++", "-r", "README.md", "-n", "missing"],
    );

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("no example named 'missing'"));
}

#[test]
fn list_prints_examples_and_kinds() {
    let dir = with_readme(PASSING);
    let out = docex(dir.path(), &["list", "-r", "README.md"]);

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "hello: main, bash\nconfig: bash\n");
}

#[test]
fn config_file_supplies_settings() {
    let dir = with_readme(
        "```bash xpress-env-bash\ntest \"$CC\" = from-config && test \"$CXX\" = from-config++\n```\n",
    );
    fs::write(
        dir.path().join("docex.toml"),
        "[toolchain]\nc_compiler = \"from-config\"\ncxx_compiler = \"from-config++\"\n\n[run]\nreadme = \"README.md\"\nworkdir = \"work\"\n",
    )
    .unwrap();

    let out = docex(dir.path(), &["run"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert!(!dir.path().join("work").exists());
}

#[test]
fn flags_override_config_file() {
    let dir = with_readme("```bash xpress-env-bash\ntest \"$CC\" = from-flag\n```\n");
    fs::write(
        dir.path().join("settings.toml"),
        "[toolchain]\nc_compiler = \"from-config\"\ncxx_compiler = \"from-config++\"\n",
    )
    .unwrap();

    let out = docex(
        dir.path(),
        &["--config", "settings.toml", "run", "-c", "from-flag", "-r", "README.md"],
    );
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
}

#[test]
fn missing_compiler_is_a_usage_error() {
    let dir = with_readme(PASSING);
    let out = docex(dir.path(), &["run", "-r", "README.md"]);

    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("missing C compiler"));
}

#[test]
fn compare_rejects_mismatched_names() {
    let dir = TempDir::new().unwrap();
    let out = docex(dir.path(), &["compare", "-e", "a", "b", "-n", "only-a", "--clean", "false"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("number of executables and names don't match"));
}

#[test]
fn list_without_examples_fails() {
    let dir = with_readme("# Nothing to build\n\n```text\nplain\n```\n");
    let out = docex(dir.path(), &["list", "-r", "README.md"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("no examples found in README.md"));
}

#[test]
fn compare_prints_ratios() {
    let dir = with_benchmarks(&[("a", "average runtime: 2.0"), ("b", "average runtime: 1.0")]);
    let out = docex_with_path(
        dir.path(),
        &dir.path().join("bin"),
        &["compare", "-e", "a", "b", "-n", "A", "B"],
    );

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let printed = stdout(&out);
    assert!(printed.contains("Compiling a"));
    assert!(printed.contains("Compile time ratios:\n -- B/A: "));
    assert!(printed.contains("Binary size ratios:\n -- B/A: 1.00\n"));
    assert!(printed.contains("Runtime ratios:\n -- B/A: 0.50\n"));
}

#[test]
fn compare_without_clean_skips_compile_ratios() {
    let dir = with_benchmarks(&[("a", "average runtime: 3.0"), ("b", "average runtime: 6.0")]);
    let out = docex_with_path(
        dir.path(),
        &dir.path().join("bin"),
        &["compare", "-e", "a", "b", "-n", "A", "B", "--clean", "false"],
    );

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let printed = stdout(&out);
    assert!(!printed.contains("Compile time ratios:"));
    assert!(printed.contains("Runtime ratios:\n -- B/A: 2.00\n"));
}

#[test]
fn compare_requires_runtime_report() {
    let dir = with_benchmarks(&[("a", "average runtime: 2.0"), ("c", "nothing")]);
    let out = docex_with_path(
        dir.path(),
        &dir.path().join("bin"),
        &["compare", "-e", "a", "c", "-n", "A", "C"],
    );

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("error: 'c' did not report 'average runtime:'"));
}
