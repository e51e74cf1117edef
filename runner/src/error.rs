use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use docex::ErrorCategory;

#[derive(Debug)]
pub enum DriverError {
    /// The working directory is left over from another run.
    WorkDirExists(PathBuf),
    Io { context: String, source: io::Error },
    /// The shell could not be started.
    Spawn { commands: String, source: io::Error },
    CommandFailed { commands: String, status: ExitStatus },
}

impl DriverError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        DriverError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DriverError::WorkDirExists(_) | DriverError::Io { .. } => ErrorCategory::Environment,
            DriverError::Spawn { .. } | DriverError::CommandFailed { .. } => {
                ErrorCategory::ExternalTool
            }
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::WorkDirExists(path) => write!(
                f,
                "working directory '{}' already exists; remove it or pick another",
                path.display()
            ),
            DriverError::Io { context, source } => write!(f, "{}: {}", context, source),
            DriverError::Spawn { source, .. } => {
                write!(f, "cannot start shell for build commands: {}", source)
            }
            DriverError::CommandFailed { commands, status } => {
                write!(f, "build commands failed ({})", status)?;
                for line in commands.lines().filter(|l| !l.trim().is_empty()) {
                    write!(f, "\n  | {}", line)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Io { source, .. } | DriverError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}
