use std::path::Path;

use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use docex::AssembleError;
use docex::parser::Parser;
use runner::Driver;

use crate::config::RunSettings;

/// How `run` treats each selected example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Build and run it.
    Execute,
    /// Assemble it only.
    Check,
    /// Print the assembled application.
    Show,
}

pub struct RunOptions<'a> {
    /// Run only the example with this identifier.
    pub name: Option<&'a str>,
    pub mode: Mode,
    pub no_color: bool,
}

fn pass_label(no_color: bool) -> &'static str {
    if no_color { "PASS" } else { "\x1b[32mPASS\x1b[0m" }
}

fn fail_label(no_color: bool) -> &'static str {
    if no_color { "FAIL" } else { "\x1b[31mFAIL\x1b[0m" }
}

fn bold(s: &str, no_color: bool) -> String {
    if no_color {
        s.to_string()
    } else {
        format!("\x1b[1m{}\x1b[0m", s)
    }
}

/// Source of one README, registered for diagnostics.
struct Document {
    files: SimpleFiles<String, String>,
    parser: Parser,
}

fn load_document(path: &Path) -> Result<Document, String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    let mut files = SimpleFiles::new();
    let file_id = files.add(path.display().to_string(), source.clone());
    Ok(Document {
        files,
        parser: Parser::new(source, file_id),
    })
}

fn emit_assemble_error(doc: &Document, error: &AssembleError, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    let diagnostic = error.to_diagnostic(doc.parser.file_id());
    let _ = term::emit_to_write_style(&mut writer.lock(), &config, &doc.files, &diagnostic);
}

fn print_summary(passed: usize, failed: usize, not_run: usize, no_color: bool) {
    eprintln!();
    if failed == 0 {
        let ok = if no_color { "ok" } else { "\x1b[32mok\x1b[0m" };
        eprintln!("example result: {}. {} passed, 0 failed", ok, passed);
    } else {
        let failed_label = if no_color {
            "FAILED"
        } else {
            "\x1b[31mFAILED\x1b[0m"
        };
        eprintln!(
            "example result: {}. {} passed, {} failed, {} not run",
            failed_label, passed, failed, not_run
        );
    }
}

/// Build and run every selected example of the README, in document order.
/// Stops at the first failure. Returns exit code: 0 = all pass, 1 = failure.
pub fn run_examples(settings: &RunSettings, options: &RunOptions) -> i32 {
    let doc = match load_document(&settings.readme) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("error: {}", e);
            return 1;
        }
    };

    let names: Vec<String> = doc
        .parser
        .example_names()
        .into_iter()
        .filter(|name| options.name.is_none_or(|wanted| wanted == name))
        .collect();

    if names.is_empty() {
        match options.name {
            Some(wanted) => eprintln!(
                "no example named '{}' in {}",
                wanted,
                settings.readme.display()
            ),
            None => eprintln!("no examples found in {}", settings.readme.display()),
        }
        return 1;
    }

    let driver = Driver::new(settings.toolchain.clone()).workdir_name(settings.workdir.as_str());
    let no_color = options.no_color;
    let mut passed = 0usize;

    for (index, name) in names.iter().enumerate() {
        eprintln!();
        eprintln!("{}", bold(&format!("Running readme code '{}'", name), no_color));
        tracing::info!(example = %name, "assembling example");

        let app = match doc.parser.assemble(name) {
            Ok(app) => app,
            Err(error) => {
                eprintln!("  {}  {}", fail_label(no_color), name);
                emit_assemble_error(&doc, &error, no_color);
                print_summary(passed, 1, names.len() - index - 1, no_color);
                return 1;
            }
        };

        match options.mode {
            Mode::Show => {
                println!("{:#?}", app);
                continue;
            }
            Mode::Check => {}
            Mode::Execute => {
                let mut stdout = std::io::stdout();
                if let Err(error) = driver.run(&app, &mut stdout) {
                    eprintln!("  {}  {}", fail_label(no_color), name);
                    eprintln!("{}: {}", error.category(), error);
                    print_summary(passed, 1, names.len() - index - 1, no_color);
                    return 1;
                }
            }
        }

        passed += 1;
        eprintln!("  {}  {}", pass_label(no_color), name);
    }

    if options.mode != Mode::Show {
        print_summary(passed, 0, 0, no_color);
    }
    0
}

/// Print each example with the kinds of its blocks.
/// Returns exit code: 0 = every example extracted cleanly, 1 = error or no
/// examples at all.
pub fn list_examples(readme: &Path, no_color: bool) -> i32 {
    let doc = match load_document(readme) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("error: {}", e);
            return 1;
        }
    };

    let names = doc.parser.example_names();
    if names.is_empty() {
        eprintln!("no examples found in {}", readme.display());
        return 1;
    }

    for name in &names {
        match doc.parser.blocks(name) {
            Ok(blocks) => {
                let kinds: Vec<String> = blocks.iter().map(|b| b.kind.to_string()).collect();
                println!("{}: {}", name, kinds.join(", "));
            }
            Err(error) => {
                emit_assemble_error(&doc, &error, no_color);
                return 1;
            }
        }
    }
    0
}
