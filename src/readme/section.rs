//! Marker-delimited regions and the disclosure blocks inside them.

use crate::error::{ReleaseError, Result};

const DETAILS_OPEN: &str = "<details";
const DETAILS_CLOSE: &str = "</details>";
const SUMMARY_OPEN: &str = "<summary>";
const SUMMARY_CLOSE: &str = "</summary>";

/// Byte span of a marker pair inside a document, markers included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedRegion {
    /// Offset of the first byte of the start marker
    pub start: usize,
    /// Offset just past the end marker
    pub end: usize,
    inner_start: usize,
    inner_end: usize,
}

impl MarkedRegion {
    /// Locate the first start marker and the first end marker after it.
    pub fn find(content: &str, start_marker: &str, end_marker: &str) -> Option<Self> {
        let start = content.find(start_marker)?;
        let inner_start = start + start_marker.len();
        let inner_end = inner_start + content[inner_start..].find(end_marker)?;

        Some(MarkedRegion {
            start,
            end: inner_end + end_marker.len(),
            inner_start,
            inner_end,
        })
    }

    /// Text strictly between the markers, untrimmed
    pub fn inner<'a>(&self, content: &'a str) -> &'a str {
        &content[self.inner_start..self.inner_end]
    }
}

/// The trimmed contents of a marker pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedSection {
    pub start_marker: String,
    pub end_marker: String,
    pub inner_text: String,
}

impl MarkedSection {
    pub fn extract(content: &str, start_marker: &str, end_marker: &str) -> Option<Self> {
        let region = MarkedRegion::find(content, start_marker, end_marker)?;
        Some(MarkedSection {
            start_marker: start_marker.to_string(),
            end_marker: end_marker.to_string(),
            inner_text: region.inner(content).trim().to_string(),
        })
    }

    /// Items list of this section; see [`extract_items`].
    pub fn items(&self, open_tag: &str) -> Result<String> {
        extract_items(&self.inner_text, open_tag)
    }
}

/// Replace the first marker region in `content` with `rendered` between the original markers.
///
/// Returns `None` when the document has no such marker pair.
pub fn splice_region(
    content: &str,
    start_marker: &str,
    end_marker: &str,
    rendered: &str,
) -> Option<String> {
    let region = MarkedRegion::find(content, start_marker, end_marker)?;

    let mut out = String::with_capacity(content.len() + rendered.len());
    out.push_str(&content[..region.start]);
    out.push_str(start_marker);
    out.push('\n');
    out.push_str(rendered);
    out.push('\n');
    out.push_str(end_marker);
    out.push_str(&content[region.end..]);
    Some(out)
}

/// Extract the items text from the disclosure block opened by `open_tag`.
///
/// When `open_tag` does not occur, the whole section is the items text. Otherwise the
/// items run from the end of the block's first `<summary>...</summary>` to the
/// `</details>` that closes the block, skipping over any nested disclosure blocks.
/// Text before the summary is ignored and the summary may span several lines.
///
/// # Errors
/// `PatternMismatch` when the block has no summary or is never closed.
pub fn extract_items(section: &str, open_tag: &str) -> Result<String> {
    let Some(tag_at) = section.find(open_tag) else {
        return Ok(section.trim().to_string());
    };
    let after = &section[tag_at + open_tag.len()..];

    let block_end = close_position(after);
    let body = &after[..block_end.unwrap_or(after.len())];

    let Some(summary_at) = body.find(SUMMARY_OPEN) else {
        return Err(ReleaseError::pattern_mismatch(format!(
            "no <summary> in the disclosure block opened by '{}'",
            open_tag
        )));
    };
    let Some(summary_len) = body[summary_at..].find(SUMMARY_CLOSE) else {
        return Err(ReleaseError::pattern_mismatch(format!(
            "<summary> after '{}' is never closed",
            open_tag
        )));
    };
    let Some(block_end) = block_end else {
        return Err(ReleaseError::pattern_mismatch(format!(
            "disclosure block opened by '{}' is never closed",
            open_tag
        )));
    };

    let items_start = summary_at + summary_len + SUMMARY_CLOSE.len();
    Ok(after[items_start..block_end].trim().to_string())
}

/// Byte offset of the `</details>` closing a block already open at the start of `text`.
///
/// Nested disclosure blocks are skipped by tracking depth.
fn close_position(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut cursor = 0;

    while cursor < text.len() {
        let rest = &text[cursor..];
        let next_open = find_details_open(rest);
        let next_close = rest.find(DETAILS_CLOSE);

        match (next_open, next_close) {
            (Some(open), Some(close)) if open < close => {
                depth += 1;
                cursor += open + DETAILS_OPEN.len();
            }
            (_, Some(close)) => {
                depth -= 1;
                if depth == 0 {
                    return Some(cursor + close);
                }
                cursor += close + DETAILS_CLOSE.len();
            }
            (Some(open), None) => {
                depth += 1;
                cursor += open + DETAILS_OPEN.len();
            }
            (None, None) => break,
        }
    }

    None
}

/// Position of a `<details>` or `<details ...>` opening tag
fn find_details_open(text: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(found) = text[offset..].find(DETAILS_OPEN) {
        let at = offset + found;
        let next = text[at + DETAILS_OPEN.len()..].chars().next();
        if matches!(next, Some('>' | ' ' | '\t' | '\n')) {
            return Some(at);
        }
        offset = at + DETAILS_OPEN.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "<!-- Start [ops] -->";
    const END: &str = "<!-- End [ops] -->";

    #[test]
    fn test_find_region_is_non_greedy() {
        let doc = format!("a {START} one {END} b {START} two {END} c");
        let region = MarkedRegion::find(&doc, START, END).unwrap();
        assert_eq!(region.inner(&doc), " one ");
        assert_eq!(&doc[region.end..], " b <!-- Start [ops] --> two <!-- End [ops] --> c");
    }

    #[test]
    fn test_find_region_missing_end() {
        let doc = format!("{START} dangling");
        assert!(MarkedRegion::find(&doc, START, END).is_none());
    }

    #[test]
    fn test_end_before_start_is_ignored() {
        let doc = format!("{END} x {START} y");
        assert!(MarkedRegion::find(&doc, START, END).is_none());
    }

    #[test]
    fn test_marked_section_trims() {
        let doc = format!("{START}\n\n  body  \n\n{END}");
        let section = MarkedSection::extract(&doc, START, END).unwrap();
        assert_eq!(section.inner_text, "body");
    }

    #[test]
    fn test_splice_replaces_first_only() {
        let doc = format!("head\n{START}\nold\n{END}\nmid\n{START}\nkeep\n{END}\n");
        let out = splice_region(&doc, START, END, "new").unwrap();
        assert_eq!(
            out,
            format!("head\n{START}\nnew\n{END}\nmid\n{START}\nkeep\n{END}\n")
        );
    }

    #[test]
    fn test_splice_without_markers() {
        assert!(splice_region("plain readme", START, END, "x").is_none());
    }

    #[test]
    fn test_items_without_tag_is_whole_section() {
        let items = extract_items("* [a](docs/a.md)\n* [b](docs/b.md)", "<details open>").unwrap();
        assert_eq!(items, "* [a](docs/a.md)\n* [b](docs/b.md)");
    }

    #[test]
    fn test_items_inside_details() {
        let section = "## Available Resources and Operations\n\n\
<details open>\n<summary>Available methods</summary>\n\n\
### [data](docs/sdks/data/README.md)\n\n\
* [list](docs/sdks/data/README.md#list)\n\n\
</details>";
        let items = extract_items(section, "<details open>").unwrap();
        assert_eq!(
            items,
            "### [data](docs/sdks/data/README.md)\n\n* [list](docs/sdks/data/README.md#list)"
        );
    }

    #[test]
    fn test_items_skip_nested_details() {
        let section = "<details>\n<summary>Fns</summary>\n\
- outer\n<details>\n<summary>inner</summary>\n- nested\n</details>\n- after\n</details>\ntrailing";
        let items = extract_items(section, "<details>").unwrap();
        assert_eq!(
            items,
            "- outer\n<details>\n<summary>inner</summary>\n- nested\n</details>\n- after"
        );
    }

    #[test]
    fn test_items_close_on_same_line() {
        let section = "<details>\n<summary>Fns</summary>\n- only</details>";
        assert_eq!(extract_items(section, "<details>").unwrap(), "- only");
    }

    #[test]
    fn test_plain_details_tag_does_not_match_open_variant() {
        // "<details>" is not the same tag as "<details open>"
        let section = "<details open>\n<summary>x</summary>\n- a\n</details>";
        let items = extract_items(section, "<details>").unwrap();
        assert_eq!(items, section);
    }

    #[test]
    fn test_items_missing_summary() {
        let section = "<details>\n- a\n</details>";
        let err = extract_items(section, "<details>").unwrap_err();
        assert!(matches!(err, ReleaseError::PatternMismatch(_)));
    }

    #[test]
    fn test_items_with_text_before_summary() {
        let section = "<details open>\nPick a package:\n\n<summary>Available methods</summary>\n\n* [list](docs/list.md)\n</details>";
        let items = extract_items(section, "<details open>").unwrap();
        assert_eq!(items, "* [list](docs/list.md)");
    }

    #[test]
    fn test_items_with_multiline_summary() {
        let section = "<details>\n<summary>\nAvailable standalone functions\n</summary>\n\n- [`dataHealthCheck`](docs/sdks/health/README.md)\n\n</details>";
        let items = extract_items(section, "<details>").unwrap();
        assert_eq!(items, "- [`dataHealthCheck`](docs/sdks/health/README.md)");
    }

    #[test]
    fn test_items_summary_after_close_is_mismatch() {
        let section = "<details>\n- a\n</details>\n<summary>late</summary>";
        let err = extract_items(section, "<details>").unwrap_err();
        assert!(matches!(err, ReleaseError::PatternMismatch(_)));
    }

    #[test]
    fn test_items_unclosed_summary() {
        let section = "<details>\n<summary>x\n- a\n</details>";
        let err = extract_items(section, "<details>").unwrap_err();
        assert!(err.to_string().contains("<summary>"));
    }

    #[test]
    fn test_items_unterminated() {
        let section = "<details>\n<summary>x</summary>\n- a\n";
        let err = extract_items(section, "<details>").unwrap_err();
        assert!(err.to_string().contains("never closed"));
    }

    #[test]
    fn test_items_empty_block() {
        let section = "<details>\n<summary>x</summary>\n\n</details>";
        assert_eq!(extract_items(section, "<details>").unwrap(), "");
    }

    #[test]
    fn test_details_open_detection() {
        assert_eq!(find_details_open("x <details open>"), Some(2));
        assert_eq!(find_details_open("<details>"), Some(0));
        assert_eq!(find_details_open("<detailsfoo>"), None);
        assert_eq!(find_details_open("</details>"), None);
    }
}
