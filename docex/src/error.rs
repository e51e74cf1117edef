use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};

use crate::block::BlockKind;

/// Coarse classification of everything that can abort a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The document itself is malformed.
    Parse,
    /// The blocks of one example contradict each other.
    Consistency,
    /// The filesystem is not in the state a run needs.
    Environment,
    /// An invoked build or run command failed.
    ExternalTool,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorCategory::Parse => "parse error",
            ErrorCategory::Consistency => "consistency error",
            ErrorCategory::Environment => "environment error",
            ErrorCategory::ExternalTool => "external tool error",
        })
    }
}

/// Failure to turn the blocks of one example into an [`Application`](crate::Application).
/// Spans are byte ranges of opening fence lines in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    UnterminatedFence {
        example: String,
        span: Range<usize>,
    },
    UnknownKind {
        tag: String,
        span: Range<usize>,
    },
    NameMismatch {
        expected: String,
        found: Option<String>,
        span: Range<usize>,
    },
    MissingBuildTarget {
        example: String,
        span: Range<usize>,
    },
    DuplicateKind {
        example: String,
        kind: BlockKind,
        first: Range<usize>,
        second: Range<usize>,
    },
    MainAndSnippet {
        example: String,
        main: Range<usize>,
        snippet: Range<usize>,
    },
}

impl AssembleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AssembleError::UnterminatedFence { .. }
            | AssembleError::UnknownKind { .. }
            | AssembleError::NameMismatch { .. }
            | AssembleError::MissingBuildTarget { .. } => ErrorCategory::Parse,
            AssembleError::DuplicateKind { .. } | AssembleError::MainAndSnippet { .. } => {
                ErrorCategory::Consistency
            }
        }
    }

    /// The span the error is primarily reported at.
    pub fn span(&self) -> Range<usize> {
        match self {
            AssembleError::UnterminatedFence { span, .. }
            | AssembleError::UnknownKind { span, .. }
            | AssembleError::NameMismatch { span, .. }
            | AssembleError::MissingBuildTarget { span, .. } => span.clone(),
            AssembleError::DuplicateKind { second, .. } => second.clone(),
            AssembleError::MainAndSnippet { snippet, main, .. } => {
                if snippet.start > main.start {
                    snippet.clone()
                } else {
                    main.clone()
                }
            }
        }
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let diagnostic = Diagnostic::error().with_message(self.to_string());
        match self {
            AssembleError::UnterminatedFence { span, .. } => diagnostic
                .with_labels(vec![
                    Label::primary(file_id, span.clone()).with_message("this fence is never closed"),
                ])
                .with_notes(vec!["add a closing ``` line after the block".to_string()]),
            AssembleError::UnknownKind { span, .. } => diagnostic
                .with_labels(vec![Label::primary(file_id, span.clone())])
                .with_notes(vec![format!(
                    "supported kinds are: {}",
                    BlockKind::ALL.map(BlockKind::tag).join(", ")
                )]),
            AssembleError::NameMismatch { span, .. }
            | AssembleError::MissingBuildTarget { span, .. } => {
                diagnostic.with_labels(vec![Label::primary(file_id, span.clone())])
            }
            AssembleError::DuplicateKind { first, second, .. } => diagnostic.with_labels(vec![
                Label::primary(file_id, second.clone()).with_message("duplicate block"),
                Label::secondary(file_id, first.clone()).with_message("first defined here"),
            ]),
            AssembleError::MainAndSnippet { main, snippet, .. } => diagnostic
                .with_labels(vec![
                    Label::primary(file_id, snippet.clone()).with_message("snippet block"),
                    Label::secondary(file_id, main.clone()).with_message("main block"),
                ])
                .with_notes(vec![
                    "a snippet is wrapped into a generated main; use one or the other".to_string(),
                ]),
        }
    }
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssembleError::UnterminatedFence { example, .. } => write!(
                f,
                "unterminated code block in example '{}': no closing fence before end of document",
                example
            ),
            AssembleError::UnknownKind { tag, .. } => {
                write!(f, "unsupported code block kind '{}'", tag)
            }
            AssembleError::NameMismatch {
                expected, found, ..
            } => write!(
                f,
                "code block belongs to example '{}', expected '{}'",
                found.as_deref().unwrap_or("(none)"),
                expected
            ),
            AssembleError::MissingBuildTarget { example, .. } => write!(
                f,
                "build configuration of example '{}' declares no add_executable() target",
                example
            ),
            AssembleError::DuplicateKind { example, kind, .. } => {
                write!(f, "example '{}' has more than one '{}' block", example, kind)
            }
            AssembleError::MainAndSnippet { example, .. } => write!(
                f,
                "example '{}' has both a 'main' and a 'snippet' block",
                example
            ),
        }
    }
}

impl std::error::Error for AssembleError {}
