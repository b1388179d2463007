/// Single-pass line grammar for the parts of markdown the engine cares about.
///
/// ```text
/// heading   := indent{0,3} '#'{1,6} (' ' | '\t')+ text
/// fence     := indent{0,3} ('```' | '~~~') ...      toggles code-block state
/// code-span := '`' [^`]+ '`' (ws text)?              leads the heading text
/// ```
///
/// Lines inside a fenced code block are never headings, so shell comments in
/// examples (`# install`) do not leak into titles or method listings.
use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(#{1,6})[ \t]+(.+?)[ \t]*$").expect("valid regex"));
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})").expect("valid regex"));
static CODE_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^`([^`]+)`(?:[ \t]|$)").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Number of leading `#`, 1 through 6.
    pub depth: usize,
    pub text: &'a str,
}

impl<'a> Heading<'a> {
    /// The code span that opens the heading text, e.g. `` `logoutMember` `` in
    /// `` `logoutMember` - ends the session ``.
    pub fn code_span(&self) -> Option<&'a str> {
        let caps = CODE_SPAN_RE.captures(self.text)?;
        let token = caps.get(1)?.as_str().trim();
        (!token.is_empty()).then_some(token)
    }
}

/// Iterates headings in document order, skipping fenced code blocks.
pub fn headings(content: &str) -> Headings<'_> {
    Headings {
        lines: content.lines(),
        open_fence: None,
    }
}

pub struct Headings<'a> {
    lines: std::str::Lines<'a>,
    /// Fence character and run length of the currently open code block.
    open_fence: Option<(char, usize)>,
}

impl<'a> Iterator for Headings<'a> {
    type Item = Heading<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if let Some(caps) = FENCE_RE.captures(line) {
                let run = &caps[1];
                let fence_char = run.chars().next().unwrap_or('`');
                let fence_len = run.len();
                match self.open_fence {
                    None => self.open_fence = Some((fence_char, fence_len)),
                    Some((open_char, open_len)) if open_char == fence_char && fence_len >= open_len => {
                        self.open_fence = None;
                    }
                    Some(_) => {}
                }
                continue;
            }

            if self.open_fence.is_some() {
                continue;
            }

            if let Some(caps) = HEADING_RE.captures(line) {
                let (Some(hashes), Some(text)) = (caps.get(1), caps.get(2)) else {
                    continue;
                };
                return Some(Heading {
                    depth: hashes.as_str().len(),
                    text: text.as_str(),
                });
            }
        }
        None
    }
}

/// Text of the first level-1 heading.
pub fn first_title(content: &str) -> Option<&str> {
    headings(content).find(|h| h.depth == 1).map(|h| h.text)
}
