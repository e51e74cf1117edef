use crate::block::{BlockKind, CodeBlock};
use crate::error::AssembleError;
use crate::parser::scanner::{self, FENCE, Fence};

/// Capture the block opened by `fence` as a [`CodeBlock`] of example `expected`.
///
/// The content is everything after the opening line up to the next closing
/// fence marker, verbatim.
pub fn extract_block(
    source: &str,
    fence: &Fence,
    expected: &str,
) -> Result<CodeBlock, AssembleError> {
    let opener = &source[fence.span.clone()];

    // Re-read the identifier from the text itself rather than trusting the scan.
    let found = scanner::example_name(opener);
    if found != Some(expected) {
        return Err(AssembleError::NameMismatch {
            expected: expected.to_string(),
            found: found.map(str::to_string),
            span: fence.span.clone(),
        });
    }

    let unterminated = || AssembleError::UnterminatedFence {
        example: expected.to_string(),
        span: fence.span.clone(),
    };

    let body_start = fence.span.end + 1;
    let body = source.get(body_start..).ok_or_else(unterminated)?;
    let end = body.find(FENCE).ok_or_else(unterminated)?;

    let kind = BlockKind::from_tag(&fence.tag).ok_or_else(|| AssembleError::UnknownKind {
        tag: fence.tag.clone(),
        span: fence.span.clone(),
    })?;

    Ok(CodeBlock {
        example: expected.to_string(),
        kind,
        content: body[..end].to_string(),
        span: fence.span.clone(),
    })
}
