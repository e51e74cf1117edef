use std::fmt;
use std::ops::Range;

/// The role a fenced block plays within an example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// A complete program that brings its own `main`.
    MainProgram,
    /// A program fragment, wrapped into the default program template.
    Snippet,
    /// Shell commands that configure, build and run the example.
    ShellCommands,
    /// A CMake build configuration.
    BuildConfig,
}

impl BlockKind {
    pub const ALL: [BlockKind; 4] = [
        BlockKind::MainProgram,
        BlockKind::Snippet,
        BlockKind::ShellCommands,
        BlockKind::BuildConfig,
    ];

    /// Map a kind tag taken from a fence info string to a kind.
    /// Returns `None` for tags that name no known kind.
    pub fn from_tag(tag: &str) -> Option<BlockKind> {
        match tag {
            "main" => Some(BlockKind::MainProgram),
            "snippet" => Some(BlockKind::Snippet),
            "bash" => Some(BlockKind::ShellCommands),
            "cmake" => Some(BlockKind::BuildConfig),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            BlockKind::MainProgram => "main",
            BlockKind::Snippet => "snippet",
            BlockKind::ShellCommands => "bash",
            BlockKind::BuildConfig => "cmake",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One fenced region of the document that belongs to a named example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// The example identifier from the `xpress-<name>-<kind>` marker.
    pub example: String,
    pub kind: BlockKind,
    /// Raw text between the opening fence line and the closing fence.
    pub content: String,
    /// Byte span of the opening fence line, for error reporting.
    pub span: Range<usize>,
}
