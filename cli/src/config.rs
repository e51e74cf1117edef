use std::path::{Path, PathBuf};

use serde::Deserialize;

use runner::{DEFAULT_WORKDIR, Toolchain};

/// Read from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "docex.toml";

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub toolchain: ToolchainSection,

    #[serde(default)]
    pub run: RunSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolchainSection {
    /// Exported as `CC` to build commands.
    #[serde(default)]
    pub c_compiler: Option<String>,

    /// Exported as `CXX` to build commands.
    #[serde(default)]
    pub cxx_compiler: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunSection {
    /// Documentation file to take the examples from.
    #[serde(default)]
    pub readme: Option<PathBuf>,

    /// Working directory created for each example.
    #[serde(default)]
    pub workdir: Option<String>,
}

/// Everything one `run` needs, after flags have been merged over the file.
#[derive(Debug)]
pub struct RunSettings {
    pub toolchain: Toolchain,
    pub readme: PathBuf,
    pub workdir: String,
}

/// Load the config file. A missing default file is an empty config; a
/// missing explicit one is an error.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig, String> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.is_file() {
                return Ok(FileConfig::default());
            }
            path
        }
    };
    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("TOML parse error in '{}': {}", path.display(), e))
}

impl FileConfig {
    /// The documentation file: the flag if given, else the file's value.
    pub fn readme(&self, flag: Option<PathBuf>) -> Result<PathBuf, String> {
        flag.or_else(|| self.run.readme.clone())
            .ok_or_else(|| "missing README path: pass -r/--readme or set run.readme".to_string())
    }

    pub fn resolve(
        self,
        c_compiler: Option<String>,
        cxx_compiler: Option<String>,
        readme: Option<PathBuf>,
        workdir: Option<String>,
    ) -> Result<RunSettings, String> {
        let readme = self.readme(readme)?;
        let c_compiler = c_compiler.or(self.toolchain.c_compiler).ok_or_else(|| {
            "missing C compiler: pass -c/--c-compiler or set toolchain.c_compiler".to_string()
        })?;
        let cxx_compiler = cxx_compiler.or(self.toolchain.cxx_compiler).ok_or_else(|| {
            "missing C++ compiler: pass -x/--cxx-compiler or set toolchain.cxx_compiler".to_string()
        })?;
        let workdir = workdir
            .or(self.run.workdir)
            .unwrap_or_else(|| DEFAULT_WORKDIR.to_string());

        Ok(RunSettings {
            toolchain: Toolchain::new(c_compiler, cxx_compiler),
            readme,
            workdir,
        })
    }
}
