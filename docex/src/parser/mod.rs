pub mod extract;
pub mod scanner;

pub use extract::extract_block;
pub use scanner::Fence;

use tracing::debug;

use crate::application::Application;
use crate::block::CodeBlock;
use crate::error::AssembleError;

/// Parser entry point over one documentation file.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// The source file ID (for error reporting with codespan-reporting).
    pub fn file_id(&self) -> usize {
        self.file_id
    }

    /// Every fence opener in the document, including ones outside any example.
    pub fn fences(&self) -> Vec<Fence> {
        scanner::scan(&self.source)
    }

    /// Distinct example identifiers, in order of first appearance.
    pub fn example_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for fence in self.fences() {
            if let Some(name) = fence.example {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Extract every block of example `name`, in document order.
    pub fn blocks(&self, name: &str) -> Result<Vec<CodeBlock>, AssembleError> {
        let blocks = self
            .fences()
            .iter()
            .filter(|fence| fence.example.as_deref() == Some(name))
            .map(|fence| extract_block(&self.source, fence, name))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(example = name, count = blocks.len(), "extracted code blocks");
        Ok(blocks)
    }

    /// Assemble example `name` into a buildable application.
    pub fn assemble(&self, name: &str) -> Result<Application, AssembleError> {
        Application::from_blocks(name, self.blocks(name)?)
    }
}
