//! Locates `#[rule] pub fn [< $f _name >](...) {` headers.
//!
//! The header opening is found with a regex; the parameter block is then
//! walked by a small scanner that tracks bracket nesting and skips comments,
//! so generic arguments such as `Option<BytesN<32>>` and nested parentheses
//! never end the block early. The same walk splits the block at top-level
//! commas.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static HEADER_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\[rule\]\s+pub fn \[< \$f _(\w+) >\]\(").expect("header pattern is valid")
});

/// A header whose parameter block scanned cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Logical rule name (the part after `$f _`)
    pub name: String,
    /// From `#[rule]` through the opening `{` of the body
    pub span: Range<usize>,
    /// 1-based line of `#[rule]`
    pub line: usize,
    /// Top-level parameter fragments, comments removed, whitespace collapsed
    pub fragments: Vec<String>,
}

/// A header opening whose block or body brace could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedHeader {
    pub name: String,
    pub line: usize,
    pub reason: String,
    /// The recognised opening, `#[rule]` through `(`
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanItem {
    Header(HeaderMatch),
    Malformed(MalformedHeader),
}

/// Scan `text` for rule headers in order of appearance.
///
/// Headers never overlap: scanning resumes after the end of each
/// recognised header, or after the opening of a malformed one.
pub fn scan_headers(text: &str) -> Vec<ScanItem> {
    let mut items = Vec::new();
    let mut lines = LineCounter::new(text);
    let mut pos = 0;

    while let Some(caps) = HEADER_OPEN.captures_at(text, pos) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let line = lines.line_at(whole.start());
        let name = name.as_str().to_string();

        match scan_block(text, whole.end()).and_then(|block| {
            find_body_brace(text, block.close).map(|brace_end| (block, brace_end))
        }) {
            Ok((block, brace_end)) => {
                items.push(ScanItem::Header(HeaderMatch {
                    name,
                    span: whole.start()..brace_end,
                    line,
                    fragments: block.fragments,
                }));
                pos = brace_end;
            }
            Err(reason) => {
                items.push(ScanItem::Malformed(MalformedHeader {
                    name,
                    line,
                    reason,
                    span: whole.range(),
                }));
                pos = whole.end();
            }
        }
    }

    items
}

/// Result of walking one parameter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockScan {
    /// Byte index of the `)` closing the block
    pub close: usize,
    pub fragments: Vec<String>,
}

/// Walk a parameter block starting just after its opening `(`.
pub fn scan_block(text: &str, start: usize) -> Result<BlockScan, String> {
    let bytes = text.as_bytes();
    let mut closers: Vec<u8> = Vec::new();
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match (b, next) {
            (b'/', Some(b'/')) => {
                i = text[i..].find('\n').map_or(bytes.len(), |off| i + off);
                current.push(' ');
                continue;
            }
            (b'/', Some(b'*')) => {
                i = skip_block_comment(text, i)?;
                current.push(' ');
                continue;
            }
            (b'"', _) => {
                let end = skip_string(text, i)?;
                current.push_str(&text[i..end]);
                i = end;
                continue;
            }
            (b'-', Some(b'>')) => {
                current.push_str("->");
                i += 2;
                continue;
            }
            (b'(', _) | (b'[', _) | (b'{', _) | (b'<', _) => {
                closers.push(closer_for(b));
            }
            (b')', _) if closers.is_empty() => {
                push_fragment(&mut fragments, &current);
                return Ok(BlockScan {
                    close: i,
                    fragments,
                });
            }
            (b')', _) | (b']', _) | (b'}', _) | (b'>', _) => {
                if closers.pop() != Some(b) {
                    return Err(format!(
                        "unbalanced `{}` in parameter list",
                        char::from(b)
                    ));
                }
            }
            (b',', _) if closers.is_empty() => {
                push_fragment(&mut fragments, &current);
                current.clear();
                i += 1;
                continue;
            }
            _ => {}
        }

        // Copy the whole UTF-8 sequence starting at `i`
        let ch_len = text[i..].chars().next().map_or(1, char::len_utf8);
        current.push_str(&text[i..i + ch_len]);
        i += ch_len;
    }

    Err("parameter list is never closed".to_string())
}

fn closer_for(open: u8) -> u8 {
    match open {
        b'(' => b')',
        b'[' => b']',
        b'{' => b'}',
        _ => b'>',
    }
}

fn push_fragment(fragments: &mut Vec<String>, raw: &str) {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !collapsed.is_empty() {
        fragments.push(collapsed);
    }
}

/// Returns the index just past the comment; block comments nest.
fn skip_block_comment(text: &str, start: usize) -> Result<usize, String> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = start;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'/', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => i += 1,
        }
    }
    Err("block comment is never closed".to_string())
}

fn skip_string(text: &str, start: usize) -> Result<usize, String> {
    let bytes = text.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Ok(i + 1),
            _ => i += 1,
        }
    }
    Err("string literal is never closed".to_string())
}

/// After the closing `)`, only whitespace may precede the body's `{`.
fn find_body_brace(text: &str, close: usize) -> Result<usize, String> {
    let rest = &text[close + 1..];
    let trimmed = rest.trim_start();
    if trimmed.starts_with('{') {
        Ok(close + 1 + (rest.len() - trimmed.len()) + 1)
    } else {
        Err("expected `{` after the parameter list".to_string())
    }
}

/// Converts byte offsets to 1-based line numbers for increasing offsets.
struct LineCounter<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        self.line += self.text[self.offset..offset].matches('\n').count();
        self.offset = offset;
        self.line
    }
}
