use std::borrow::Cow;
use std::collections::HashMap;

use tracing::debug;

use crate::block::{BlockKind, CodeBlock};
use crate::error::AssembleError;
use crate::parser::Parser;
use crate::templates::{self, DEFAULT_APP_NAME};

/// Marker that introduces the build target in a CMake configuration.
const TARGET_DECLARATION: &str = "add_executable(";

/// A fully assembled example, ready to be written to disk and built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// Executable name; also the stem of the main source file.
    pub name: String,
    /// Build configuration from the document. `None` means the default
    /// template is used at materialization time.
    pub build_config: Option<String>,
    /// Program source, either given verbatim or generated from a snippet.
    pub main_source: Option<String>,
    /// Shell commands that build and run the example. Never empty.
    pub build_commands: String,
}

impl Application {
    /// Assemble example `name` from a whole documentation file.
    pub fn from_document(source: &str, name: &str) -> Result<Self, AssembleError> {
        Parser::new(source.to_string(), 0).assemble(name)
    }

    /// Fold the blocks of one example into an application, filling gaps with
    /// defaults.
    pub fn from_blocks(example: &str, blocks: Vec<CodeBlock>) -> Result<Self, AssembleError> {
        let mut by_kind: HashMap<BlockKind, CodeBlock> = HashMap::new();
        for block in blocks {
            if let Some(first) = by_kind.get(&block.kind) {
                return Err(AssembleError::DuplicateKind {
                    example: example.to_string(),
                    kind: block.kind,
                    first: first.span.clone(),
                    second: block.span,
                });
            }
            by_kind.insert(block.kind, block);
        }

        if let (Some(main), Some(snippet)) = (
            by_kind.get(&BlockKind::MainProgram),
            by_kind.get(&BlockKind::Snippet),
        ) {
            return Err(AssembleError::MainAndSnippet {
                example: example.to_string(),
                main: main.span.clone(),
                snippet: snippet.span.clone(),
            });
        }

        let config = by_kind.remove(&BlockKind::BuildConfig);
        let name = match &config {
            Some(block) => build_target(&block.content)
                .ok_or_else(|| AssembleError::MissingBuildTarget {
                    example: example.to_string(),
                    span: block.span.clone(),
                })?
                .to_string(),
            None => DEFAULT_APP_NAME.to_string(),
        };

        let main_source = match (
            by_kind.remove(&BlockKind::MainProgram),
            by_kind.remove(&BlockKind::Snippet),
        ) {
            (Some(main), _) => Some(main.content),
            (None, Some(snippet)) => Some(templates::wrap_snippet(&snippet.content)),
            (None, None) => None,
        };

        let build_commands = match by_kind.remove(&BlockKind::ShellCommands) {
            Some(commands) if !commands.content.trim().is_empty() => commands.content,
            _ => templates::default_build_commands(&name),
        };

        debug!(
            example,
            app = %name,
            has_config = config.is_some(),
            has_main = main_source.is_some(),
            "assembled application"
        );

        Ok(Application {
            name,
            build_config: config.map(|block| block.content),
            main_source,
            build_commands,
        })
    }

    /// The build configuration to write: the document's own, or the default
    /// template for this application's name.
    pub fn build_config_or_default(&self) -> Cow<'_, str> {
        match &self.build_config {
            Some(config) => Cow::Borrowed(config.as_str()),
            None => Cow::Owned(templates::default_build_config(&self.name)),
        }
    }

    pub fn source_file_name(&self) -> String {
        format!("{}.cpp", self.name)
    }

    /// True when the example consists of build commands only, with no
    /// project to generate.
    pub fn is_commands_only(&self) -> bool {
        self.build_config.is_none() && self.main_source.is_none()
    }
}

/// The first target named by an `add_executable(` declaration.
pub fn build_target(config: &str) -> Option<&str> {
    let (_, rest) = config.split_once(TARGET_DECLARATION)?;
    let rest = rest.trim_start();
    let end = rest
        .find(|c: char| c.is_whitespace() || c == ')')
        .unwrap_or(rest.len());
    let target = &rest[..end];
    if target.is_empty() { None } else { Some(target) }
}
