use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use docex::Application;
use tracing::info;

use crate::error::DriverError;
use crate::toolchain::Toolchain;
use crate::workdir::WorkDir;

/// Working directory name used when none is configured.
pub const DEFAULT_WORKDIR: &str = "_tmp";

/// File the build configuration is written to.
pub const BUILD_CONFIG_FILE: &str = "CMakeLists.txt";

/// Materializes assembled applications and runs their build commands.
#[derive(Debug, Clone)]
pub struct Driver {
    toolchain: Toolchain,
    /// Directory the working directory is created in. Empty means the
    /// current directory.
    root: PathBuf,
    workdir_name: String,
}

impl Driver {
    pub fn new(toolchain: Toolchain) -> Self {
        Driver {
            toolchain,
            root: PathBuf::new(),
            workdir_name: DEFAULT_WORKDIR.to_string(),
        }
    }

    pub fn in_dir(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn workdir_name(mut self, name: impl Into<String>) -> Self {
        self.workdir_name = name.into();
        self
    }

    pub fn workdir_path(&self) -> PathBuf {
        self.root.join(&self.workdir_name)
    }

    /// Build and run `app` in a fresh working directory.
    ///
    /// The commands, build configuration and source in use are echoed to
    /// `output`. The working directory is removed on every exit path.
    pub fn run(&self, app: &Application, output: &mut dyn Write) -> Result<(), DriverError> {
        let workdir = WorkDir::create(self.workdir_path())?;

        echo(output, "build commands", &app.build_commands)?;

        if app.is_commands_only() {
            // Nothing to generate: run the commands twice to check that
            // re-running them (e.g. reconfiguring) works too.
            self.invoke(&app.build_commands, workdir.path())?;
            self.invoke(&app.build_commands, workdir.path())?;
            return Ok(());
        }

        let config = app.build_config_or_default();
        echo(output, "build configuration", &config)?;
        workdir.write(BUILD_CONFIG_FILE, &config)?;

        if let Some(source) = &app.main_source {
            echo(output, "main file", source)?;
            workdir.write(&app.source_file_name(), source)?;
        }

        self.invoke(&app.build_commands, workdir.path())
    }

    fn invoke(&self, commands: &str, dir: &Path) -> Result<(), DriverError> {
        info!(dir = %dir.display(), cc = %self.toolchain.c_compiler, cxx = %self.toolchain.cxx_compiler, "running build commands");
        let status = Command::new("sh")
            .arg("-c")
            .arg(commands)
            .current_dir(dir)
            .envs(self.toolchain.env())
            .status()
            .map_err(|source| DriverError::Spawn {
                commands: commands.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(DriverError::CommandFailed {
                commands: commands.to_string(),
                status,
            });
        }
        Ok(())
    }
}

fn echo(output: &mut dyn Write, what: &str, text: &str) -> Result<(), DriverError> {
    writeln!(output, "Using the following {}:\n{}", what, text)
        .map_err(|e| DriverError::io("cannot write driver output", e))
}
