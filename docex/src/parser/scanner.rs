use std::ops::Range;

/// Opens and closes a fenced region.
pub const FENCE: &str = "```";

/// Marks a fence as part of an example: `xpress-<name>-<kind>`.
pub const EXAMPLE_MARKER: &str = "xpress-";

/// Info-string languages whose `main` / `snippet` roles select a program kind.
const CXX_LANGUAGES: &[&str] = &["cpp", "c++", "cxx", "cc"];

/// A line that opens a fenced region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fence {
    /// Example identifier, if the info string carries the example marker.
    pub example: Option<String>,
    /// Kind tag resolved from the info string. May name no known kind.
    pub tag: String,
    /// Byte span of the whole opening line (without its newline).
    pub span: Range<usize>,
}

/// Scan the document for fence openers, in document order.
pub fn scan(source: &str) -> Vec<Fence> {
    lines_with_offsets(source)
        .filter(|(_, line)| is_fence_opener(line))
        .map(|(start, line)| Fence {
            example: example_name(line).map(str::to_string),
            tag: kind_tag(line).unwrap_or_default().to_string(),
            span: start..start + line.len(),
        })
        .collect()
}

/// Iterate over `\n`-separated lines together with their starting byte offset.
pub fn lines_with_offsets(source: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    source.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, line)
    })
}

/// Text between the opening fence marker and the next marker (or end of line).
/// `None` if the line does not start with a fence.
pub fn info_string(line: &str) -> Option<&str> {
    let rest = line.trim_end_matches('\r').strip_prefix(FENCE)?;
    Some(match rest.find(FENCE) {
        Some(end) => &rest[..end],
        None => rest,
    })
}

/// A fence opener starts with the marker and carries a non-empty info string.
/// Bare closing fences are not openers.
pub fn is_fence_opener(line: &str) -> bool {
    info_string(line).is_some_and(|info| !info.is_empty())
}

/// The example identifier: the text after the first `xpress-` up to the next
/// `-` or whitespace.
pub fn example_name(line: &str) -> Option<&str> {
    let (_, after) = line.split_once(EXAMPLE_MARKER)?;
    let end = after
        .find(|c: char| c == '-' || c.is_whitespace())
        .unwrap_or(after.len());
    let name = &after[..end];
    if name.is_empty() { None } else { Some(name) }
}

/// The role suffix of the marker: the last `-` segment, `main` in both
/// `xpress-hello-main` and `xpress-my-app-main`.
fn role(line: &str) -> Option<&str> {
    let name = example_name(line)?;
    let (_, after) = line.split_once(EXAMPLE_MARKER)?;
    let suffix = after[name.len()..].strip_prefix('-')?;
    let end = suffix.find(char::is_whitespace).unwrap_or(suffix.len());
    let marker = &suffix[..end];
    Some(marker.rsplit_once('-').map_or(marker, |(_, last)| last))
}

/// Resolve the kind tag of a fence opener.
///
/// C++ blocks are told apart by their role: `main` is a complete program and
/// `snippet` a fragment. Every other block is tagged by its language token,
/// so ```` ```bash xpress-hello-bash ```` yields `bash`.
pub fn kind_tag(line: &str) -> Option<&str> {
    let info = info_string(line)?;
    let language = info.split_whitespace().next().unwrap_or("");
    if CXX_LANGUAGES.contains(&language) {
        match role(line) {
            Some("main") => return Some("main"),
            Some("snippet") => return Some("snippet"),
            _ => {}
        }
    }
    Some(language)
}
