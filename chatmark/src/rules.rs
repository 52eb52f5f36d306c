//! Ordered rule tables for the two markup dialects
//!
//! A dialect is an ordered list of `(TokenKind, Pattern)` pairs. For a given
//! input position the first rule whose pattern matches wins, so rule order is
//! the dialect's disambiguation policy and part of its public contract.
//!
//! Patterns are anchored regexes where the grammar allows it. Constructs the
//! regex engine cannot express (backreferenced code fences, lookahead-guarded
//! emphasis, list and paragraph boundaries) use hand-written scanners that
//! return the same `RuleMatch` shape.

use once_cell::sync::Lazy;
use regex::Regex;

/// Which rule table to parse with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Permissive markdown: headings, lists, tables, HTML passthrough,
    /// reference links, autolinks, shortcode emojis.
    Standard,
    /// Constrained chat markdown: code, blockquote and the simple inline
    /// wrappers only.
    Chat,
}

/// Token vocabulary shared by both dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    NewLine,
    Space,
    LineBreak,
    FencedCode,
    InlineCode,
    Heading,
    UnderlineHeading,
    HorizontalRule,
    Blockquote,
    List,
    Html,
    NpTable,
    Definition,
    Table,
    Paragraph,
    Escape,
    Image,
    AutoLink,
    Emoji,
    Url,
    Link,
    ReferenceLink,
    IdLink,
    Tag,
    Bold,
    Italic,
    Strikethrough,
    Highlight,
    Underline,
    Spoiler,
    Subscript,
    Superscript,
    InlineText,
    Text,
}

/// A successful prefix match. `groups[0]` is the whole match; further entries
/// mirror regex capture groups.
#[derive(Debug, Clone)]
pub struct RuleMatch {
    pub end: usize,
    pub groups: Vec<Option<String>>,
}

impl RuleMatch {
    pub fn group(&self, index: usize) -> &str {
        self.groups
            .get(index)
            .and_then(|g| g.as_deref())
            .unwrap_or("")
    }

    pub fn has_group(&self, index: usize) -> bool {
        matches!(self.groups.get(index), Some(Some(s)) if !s.is_empty())
    }
}

/// A prefix matcher: compiled regex or custom scanner.
pub enum Pattern {
    Regex(Regex),
    Scan(fn(&str) -> Option<RuleMatch>),
}

impl Pattern {
    pub fn matches(&self, input: &str) -> Option<RuleMatch> {
        match self {
            Pattern::Regex(re) => re.captures(input).map(|caps| RuleMatch {
                end: caps.get(0).map_or(0, |m| m.end()),
                groups: caps
                    .iter()
                    .map(|g| g.map(|m| m.as_str().to_string()))
                    .collect(),
            }),
            Pattern::Scan(scan) => scan(input),
        }
    }
}

/// One entry of a dialect's rule table.
pub struct Rule {
    pub kind: TokenKind,
    pub pattern: Pattern,
    /// Only tried when parsing at the top of the document, never inside an
    /// inline recursion.
    pub block_level_only: bool,
}

fn rule(kind: TokenKind, pattern: &str) -> Rule {
    Rule {
        kind,
        pattern: Pattern::Regex(Regex::new(pattern).unwrap()),
        block_level_only: false,
    }
}

fn block_rule(kind: TokenKind, pattern: &str) -> Rule {
    Rule {
        kind,
        pattern: Pattern::Regex(Regex::new(pattern).unwrap()),
        block_level_only: true,
    }
}

fn scan_rule(kind: TokenKind, scan: fn(&str) -> Option<RuleMatch>) -> Rule {
    Rule {
        kind,
        pattern: Pattern::Scan(scan),
        block_level_only: false,
    }
}

/// Look up the ordered rule table for a dialect. Tables are built once per
/// process and immutable afterwards.
pub fn rules(dialect: Dialect) -> &'static [Rule] {
    match dialect {
        Dialect::Standard => &STANDARD_RULES,
        Dialect::Chat => &CHAT_RULES,
    }
}

const DEF_PATTERN: &str =
    r#"^ *\[([^\]]+)\]: *<?([^\s>]+)>?(?: +["(]([^\n]+)[")])? *(?:\n+|$)"#;
const HEADING_PATTERN: &str = r"^ *(#{1,6}) *([^\n]+?) *#* *(?:\n+|$)";
const LHEADING_PATTERN: &str = r"^([^\n]+)\n *([=-]){2,} *(?:\n+|$)";
const HR_PATTERN: &str = r"^( *[-*_]){3,} *(?:\n+|$)";

pub(crate) static DEF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(DEF_PATTERN).unwrap());
static HR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(HR_PATTERN).unwrap());
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(HEADING_PATTERN).unwrap());
static LHEADING_INTERRUPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\n]+)\n *([=|-]){2,} *(?:\n+|$)").unwrap());
static HR_AHEAD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[-*_] *){3,}(?:\n+|$)").unwrap());
static LIST_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( *)((?:[*+-]|\d+\.)) ").unwrap());
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([*+-]|\d+\.) ").unwrap());
pub(crate) static EMOJI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":-\)|:-\(|8-\)|;\)|:wink:|:cry:|:laughing:|:yum:").unwrap());

static STANDARD_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        rule(TokenKind::NewLine, r"^\n+"),
        rule(TokenKind::Space, r"^\n+"),
        scan_rule(TokenKind::LineBreak, scan_line_break),
        scan_rule(TokenKind::FencedCode, scan_fenced_code),
        scan_rule(TokenKind::InlineCode, scan_inline_code),
        rule(TokenKind::Heading, HEADING_PATTERN),
        rule(TokenKind::UnderlineHeading, LHEADING_PATTERN),
        rule(TokenKind::HorizontalRule, HR_PATTERN),
        scan_rule(TokenKind::Blockquote, scan_blockquote),
        scan_rule(TokenKind::List, scan_list),
        scan_rule(TokenKind::Html, scan_html_block),
        block_rule(
            TokenKind::NpTable,
            r"^ *(\S.*\|.*)\n *([-:]+ *\|[-| :]*)\n((?:.*\|.*(?:\n|$))*)\n*",
        ),
        block_rule(TokenKind::Definition, DEF_PATTERN),
        block_rule(
            TokenKind::Table,
            r"^ *\|(.+)\n *\|( *[-:]+[-| :]*)\n((?: *\|.*(?:\n|$))*)\n*",
        ),
        Rule {
            kind: TokenKind::Paragraph,
            pattern: Pattern::Scan(scan_paragraph),
            block_level_only: true,
        },
        rule(TokenKind::Escape, r"^\\([\\`*{}\[\]()#+\-.!_>~|])"),
        rule(
            TokenKind::Image,
            r#"^!\[(.*)\]\((.*?)\s*(?:"(.*[^"])")?\s*\)"#,
        ),
        rule(TokenKind::AutoLink, r"^<([^ >]+(@|:/)[^ >]+)>"),
        scan_rule(TokenKind::Emoji, scan_emoji),
        rule(TokenKind::Url, r#"^(https?://[^\s<]+[^<.,:;"')\]\s])"#),
        rule(TokenKind::Link, r"^\[([^\]]*)\]\(([^)]*)\)"),
        rule(
            TokenKind::ReferenceLink,
            r"^!?\[((?:\[[^\]]*\]|[^\[\]])*)\]\s*\[([^\]]*)\]",
        ),
        rule(TokenKind::IdLink, r#"^\[(.*)\]:\s*(\S*)\s*(?:"(.*[^"])")?\s*"#),
        rule(TokenKind::Tag, r#"^<!--(?s:.*?)-->|^</?\w+[^'">]*?>"#),
        scan_rule(TokenKind::Bold, scan_bold),
        scan_rule(TokenKind::Italic, scan_italic),
        rule(TokenKind::Strikethrough, r"^~~(\S|\S(?s:.*?)\S)~~"),
        rule(TokenKind::Highlight, r"^==(\S|\S(?s:.*?)\S)=="),
        rule(TokenKind::Underline, r"^\+\+(\S|\S(?s:.*?)\S)\+\+"),
        rule(TokenKind::Subscript, r"^~(\S|\S(?s:.*?)\S)~"),
        rule(TokenKind::Superscript, r"^\^(\S|\S(?s:.*?)\S)\^"),
        scan_rule(TokenKind::InlineText, scan_inline_text_standard),
        rule(TokenKind::Text, r"^[^\n]+"),
    ]
});

static CHAT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        rule(TokenKind::NewLine, r"^\n+"),
        scan_rule(TokenKind::FencedCode, scan_fenced_code),
        scan_rule(TokenKind::InlineCode, scan_inline_code),
        rule(TokenKind::Blockquote, r"^(> ?.+\n*)+ ?"),
        rule(
            TokenKind::Image,
            r#"^!\[(.*)\]\((.*?)\s*(?:"(.*[^"])")?\s*\)"#,
        ),
        rule(TokenKind::Link, r"^\[([^\]]*)\]\(([^)]*)\)"),
        rule(TokenKind::Bold, r"^\*\*(.*)\*\*"),
        rule(TokenKind::Strikethrough, r"^~~(\S|\S(?s:.*?)\S)~~"),
        rule(TokenKind::Italic, r"^__(.*)__"),
        rule(TokenKind::Underline, r"^_(.*)_"),
        rule(TokenKind::Spoiler, r"^\|\|(.*)\|\|"),
        scan_rule(TokenKind::InlineText, scan_inline_text_chat),
        rule(TokenKind::Text, r"^[^\n]+"),
    ]
});

/// Shortcode to emoji substitution table. Consumed by the standard dialect's
/// emoji rule, which rewrites the remaining input in place.
pub fn emoji_for(shortcode: &str) -> &str {
    match shortcode {
        ":-)" => "\u{1F603}",
        ":-(" => "\u{1F626}",
        "8-)" => "\u{1F60E}",
        ";)" | ":wink:" => "\u{1F609}",
        ":cry:" => "\u{1F622}",
        ":laughing:" => "\u{1F606}",
        ":yum:" => "\u{1F60B}",
        other => other,
    }
}

pub(crate) fn replace_emoji_shortcodes(input: &str) -> String {
    EMOJI_RE
        .replace_all(input, |caps: &regex::Captures| {
            emoji_for(caps.get(0).map_or("", |m| m.as_str())).to_string()
        })
        .into_owned()
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn whole(input: &str, end: usize) -> Option<String> {
    Some(input[..end].to_string())
}

// Two or more trailing spaces before a newline, unless only whitespace
// follows.
fn scan_line_break(input: &str) -> Option<RuleMatch> {
    let bytes = input.as_bytes();
    let mut n = 0;
    while n < bytes.len() && bytes[n] == b' ' {
        n += 1;
    }
    if n < 2 || n >= bytes.len() || bytes[n] != b'\n' {
        return None;
    }
    let rest = &input[n + 1..];
    if rest.chars().all(char::is_whitespace) {
        return None;
    }
    let end = n + 1;
    Some(RuleMatch {
        end,
        groups: vec![whole(input, end)],
    })
}

// ``` or ~~~ fence with optional language, closed by the same fence string on
// a later line.
fn scan_fenced_code(input: &str) -> Option<RuleMatch> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i >= bytes.len() || (bytes[i] != b'`' && bytes[i] != b'~') {
        return None;
    }
    let fence_char = bytes[i];
    let fence_start = i;
    while i < bytes.len() && bytes[i] == fence_char {
        i += 1;
    }
    let fence = &input[fence_start..i];
    if fence.len() < 3 {
        return None;
    }
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    let lang_start = i;
    let lang_len = input[lang_start..]
        .find(|c: char| c.is_whitespace())
        .unwrap_or(input.len() - lang_start);
    let language = if lang_len > 0 {
        Some(input[lang_start..lang_start + lang_len].to_string())
    } else {
        None
    };
    i = lang_start + lang_len;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i >= bytes.len() || bytes[i] != b'\n' {
        return None;
    }
    let body_start = i + 1;
    let rest = &input[body_start..];
    let mut search = 0;
    while let Some(found) = rest[search..].find(fence) {
        let k = search + found;
        let mut j = body_start + k + fence.len();
        while j < bytes.len() && bytes[j] == b' ' {
            j += 1;
        }
        let tail_end = if j == bytes.len() {
            Some(j)
        } else if bytes[j] == b'\n' {
            let mut e = j;
            while e < bytes.len() && bytes[e] == b'\n' {
                e += 1;
            }
            Some(e)
        } else {
            None
        };
        if let Some(end) = tail_end {
            if k > 0 {
                let region = &rest[..k];
                let trimmed = region.trim_end();
                let content = if trimmed.is_empty() {
                    let first = region.chars().next().map_or(0, char::len_utf8);
                    &region[..first]
                } else {
                    trimmed
                };
                if !content.is_empty() {
                    return Some(RuleMatch {
                        end,
                        groups: vec![
                            whole(input, end),
                            Some(fence.to_string()),
                            language,
                            Some(content.to_string()),
                        ],
                    });
                }
            }
        }
        search = k + 1;
    }
    None
}

// `code` spans: the closing run must have exactly as many backticks as the
// opening one, and the content must not collapse to a bare backtick.
fn scan_inline_code(input: &str) -> Option<RuleMatch> {
    let bytes = input.as_bytes();
    if bytes.is_empty() || bytes[0] != b'`' {
        return None;
    }
    let mut open = 0;
    while open < bytes.len() && bytes[open] == b'`' {
        open += 1;
    }
    let mut i = open;
    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < bytes.len() && bytes[i] == b'`' {
            i += 1;
        }
        if i - run_start != open || run_start == open {
            continue;
        }
        let raw = &input[open..run_start];
        let trimmed = raw.trim();
        let content = if trimmed.is_empty() {
            let first = raw.chars().next().map_or(0, char::len_utf8);
            &raw[..first]
        } else {
            trimmed
        };
        if content.is_empty() || content.ends_with('`') {
            continue;
        }
        return Some(RuleMatch {
            end: i,
            groups: vec![
                whole(input, i),
                Some(input[..open].to_string()),
                Some(content.to_string()),
            ],
        });
    }
    None
}

// One or more `> quoted` paragraphs. Continuation lines stay inside the quote
// unless they are reference definitions.
fn scan_blockquote(input: &str) -> Option<RuleMatch> {
    let bytes = input.as_bytes();
    let mut pos = 0;
    let mut matched = false;
    loop {
        let rest = &input[pos..];
        let rest_bytes = rest.as_bytes();
        let mut i = 0;
        while i < rest_bytes.len() && rest_bytes[i] == b' ' {
            i += 1;
        }
        if i >= rest_bytes.len() || rest_bytes[i] != b'>' {
            break;
        }
        let line_end = rest.find('\n').unwrap_or(rest.len());
        if line_end < i + 2 {
            break;
        }
        pos += line_end;
        loop {
            let rest = &input[pos..];
            if !rest.starts_with('\n') {
                break;
            }
            let line = &rest[1..];
            let line_end = line.find('\n').unwrap_or(line.len());
            if line_end == 0 || DEF_RE.is_match(line) {
                break;
            }
            pos += 1 + line_end;
        }
        while pos < bytes.len() && bytes[pos] == b'\n' {
            pos += 1;
        }
        matched = true;
    }
    if !matched {
        return None;
    }
    Some(RuleMatch {
        end: pos,
        groups: vec![whole(input, pos)],
    })
}

fn is_item_start(text: &str, indent: &str) -> bool {
    text.strip_prefix(indent)
        .map_or(false, |rest| BULLET_RE.is_match(rest))
}

// A bulleted or numbered block. Ends at a horizontal rule, a reference
// definition, a blank line not followed by further list content, or the end
// of input.
fn scan_list(input: &str) -> Option<RuleMatch> {
    let caps = LIST_START_RE.captures(input)?;
    let indent = caps.get(1).map_or("", |m| m.as_str()).to_string();
    let bullet = caps.get(2).map_or("", |m| m.as_str()).to_string();
    let body_start = caps.get(0).map_or(0, |m| m.end());
    if body_start >= input.len() {
        return None;
    }
    let bytes = input.as_bytes();
    let len = input.len();
    let mut p = body_start;
    let end = loop {
        let Some(off) = input[p..].find('\n') else {
            break len;
        };
        let run = p + off;
        let mut k = 0;
        while run + k < len && bytes[run + k] == b'\n' {
            k += 1;
        }
        let run_end = run + k;
        if run == body_start {
            // the first body character cannot also start the terminator
            if k < 2 {
                p = run_end;
                continue;
            }
            k -= 1;
        }
        let after = &input[run_end..];
        let hr_hit = HR_AHEAD_RE.is_match(after)
            || (!indent.is_empty()
                && after
                    .strip_prefix(indent.as_str())
                    .map_or(false, |r| HR_AHEAD_RE.is_match(r)));
        if hr_hit || DEF_RE.is_match(after) {
            break run_end;
        }
        if k >= 2 {
            let continues = after.starts_with(' ') || is_item_start(after, &indent);
            if !continues || k >= 3 {
                break run_end;
            }
        }
        p = run_end;
    };
    Some(RuleMatch {
        end,
        groups: vec![whole(input, end), Some(indent), Some(bullet)],
    })
}

// Tags that never open an HTML block; their markup is handled inline.
const INLINE_TAGS: [&str; 29] = [
    "a", "em", "strong", "small", "s", "cite", "q", "dfn", "abbr", "data", "time", "code", "var",
    "samp", "kbd", "sub", "sup", "i", "b", "u", "mark", "ruby", "rt", "rp", "bdi", "bdo", "span",
    "br", "wbr",
];
const INLINE_TAGS_EXTRA: [&str; 3] = ["ins", "del", "img"];

fn is_inline_tag(name: &str) -> bool {
    INLINE_TAGS.contains(&name) || INLINE_TAGS_EXTRA.contains(&name)
}

fn email_ahead(s: &str) -> bool {
    for ch in s.chars() {
        if ch == '@' {
            return true;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' || ch.is_whitespace() {
            return false;
        }
    }
    false
}

// `<tagname` that would open an HTML block: a non-inline tag that is not a
// URL scheme or an email address.
fn html_open_ahead(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('<') else {
        return false;
    };
    let name_len = rest.bytes().take_while(|b| is_word_byte(*b)).count();
    if name_len == 0 {
        return false;
    }
    let name = &rest[..name_len];
    let after = &rest[name_len..];
    !is_inline_tag(name) && !after.starts_with(":/") && !email_ahead(after)
}

// Block tail: the markup must be followed by a blank line or the end of
// input; a single interior newline is left for the next rule.
fn html_tail(bytes: &[u8], mut j: usize) -> Option<usize> {
    while j < bytes.len() && bytes[j] == b' ' {
        j += 1;
    }
    if j == bytes.len() {
        return Some(j);
    }
    if bytes[j] != b'\n' {
        return None;
    }
    let mut e = j;
    while e < bytes.len() && bytes[e] == b'\n' {
        e += 1;
    }
    if e - j >= 2 || e == bytes.len() {
        Some(e)
    } else {
        Some(j)
    }
}

// HTML comment, a paired non-inline tag, or a lone opening tag, standing on
// its own as a block.
fn scan_html_block(input: &str) -> Option<RuleMatch> {
    let bytes = input.as_bytes();
    let mut lead = 0;
    while lead < bytes.len() && bytes[lead] == b' ' {
        lead += 1;
    }
    let rest = &input[lead..];
    let rest_bytes = rest.as_bytes();
    if rest.starts_with("<!--") {
        let mut search = 4;
        while let Some(found) = rest[search..].find("-->") {
            let after = search + found + 3;
            if let Some(tail) = html_tail(rest_bytes, after) {
                let end = lead + tail;
                return Some(RuleMatch {
                    end,
                    groups: vec![whole(input, end), None],
                });
            }
            search = after;
        }
        return None;
    }
    if !rest.starts_with('<') {
        return None;
    }
    let name_len = rest[1..].bytes().take_while(|b| is_word_byte(*b)).count();
    if name_len == 0 {
        return None;
    }
    let name = rest[1..1 + name_len].to_string();
    let after_name = &rest[1 + name_len..];
    if is_inline_tag(&name) || after_name.starts_with(":/") || email_ahead(after_name) {
        return None;
    }
    // paired form first, like the alternation order of the grammar
    let close = format!("</{name}>");
    let mut search = 1 + name_len;
    while let Some(found) = rest[search..].find(close.as_str()) {
        let close_start = search + found;
        if close_start > 1 + name_len {
            let after = close_start + close.len();
            if let Some(tail) = html_tail(rest_bytes, after) {
                let end = lead + tail;
                return Some(RuleMatch {
                    end,
                    groups: vec![whole(input, end), Some(name)],
                });
            }
        }
        search = close_start + 1;
    }
    // lone opening tag: everything up to the first `>` with no quotes between
    let mut j = 1 + name_len;
    while j < rest_bytes.len() {
        match rest_bytes[j] {
            b'>' => {
                let tail = html_tail(rest_bytes, j + 1)?;
                let end = lead + tail;
                return Some(RuleMatch {
                    end,
                    groups: vec![whole(input, end), None],
                });
            }
            b'\'' | b'"' => return None,
            _ => j += 1,
        }
    }
    None
}

fn paragraph_interrupt(next: &str) -> bool {
    scan_fenced_code(next).is_some()
        || scan_list(next).is_some()
        || HR_RE.is_match(next)
        || HEADING_RE.is_match(next)
        || LHEADING_INTERRUPT_RE.is_match(next)
        || scan_blockquote(next).is_some()
        || html_open_ahead(next)
        || DEF_RE.is_match(next)
}

// Consecutive non-empty lines until a blank line or a construct that
// interrupts a paragraph. Trailing newlines are consumed but kept out of the
// captured text.
fn scan_paragraph(input: &str) -> Option<RuleMatch> {
    if input.is_empty() || input.starts_with('\n') {
        return None;
    }
    let bytes = input.as_bytes();
    let len = input.len();
    let mut p = 0;
    loop {
        let line_len = input[p..].find('\n').unwrap_or(len - p);
        if line_len == 0 {
            break;
        }
        p += line_len;
        if p == len {
            break;
        }
        if paragraph_interrupt(&input[p + 1..]) {
            break;
        }
        p += 1;
    }
    if p == 0 {
        return None;
    }
    let text = input[..p].to_string();
    let mut end = p;
    while end < len && bytes[end] == b'\n' {
        end += 1;
    }
    Some(RuleMatch {
        end,
        groups: vec![whole(input, end), Some(text)],
    })
}

// `__strong__` or `**strong**`, closed by the first delimiter pair not
// followed by a third marker.
fn scan_bold(input: &str) -> Option<RuleMatch> {
    let bytes = input.as_bytes();
    let (marker, group_idx) = if input.starts_with("__") {
        (b'_', 1)
    } else if input.starts_with("**") {
        (b'*', 2)
    } else {
        return None;
    };
    let len = bytes.len();
    let mut i = 3;
    while i + 2 <= len {
        if bytes[i] == marker
            && bytes[i + 1] == marker
            && (i + 2 == len || bytes[i + 2] != marker)
        {
            let mut groups = vec![whole(input, i + 2), None, None];
            groups[group_idx] = Some(input[2..i].to_string());
            return Some(RuleMatch {
                end: i + 2,
                groups,
            });
        }
        i += 1;
    }
    None
}

// `_emphasis_` (closed at a word boundary) or `*emphasis*` (not followed by
// another star).
fn scan_italic(input: &str) -> Option<RuleMatch> {
    let bytes = input.as_bytes();
    let (marker, group_idx) = match bytes.first() {
        Some(b'_') => (b'_', 1),
        Some(b'*') => (b'*', 2),
        _ => return None,
    };
    let len = bytes.len();
    let mut i = 2;
    while i < len {
        if bytes[i] == marker {
            let closes = if marker == b'_' {
                i + 1 == len || !is_word_byte(bytes[i + 1])
            } else {
                i + 1 == len || bytes[i + 1] != b'*'
            };
            if closes {
                let mut groups = vec![whole(input, i + 1), None, None];
                groups[group_idx] = Some(input[1..i].to_string());
                return Some(RuleMatch {
                    end: i + 1,
                    groups,
                });
            }
        }
        i += 1;
    }
    None
}

fn inline_text_end(input: &str, chat: bool) -> usize {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut iter = input.char_indices();
    iter.next();
    for (i, ch) in iter {
        let stop = match ch {
            '\\' | '<' | '!' | '[' | '_' | '*' | '`' | '~' | '^' => true,
            '>' | '|' => chat,
            'h' => input[i..].starts_with("http://") || input[i..].starts_with("https://"),
            ' ' => {
                let mut j = i;
                while j < len && bytes[j] == b' ' {
                    j += 1;
                }
                j - i >= 2 && j < len && bytes[j] == b'\n'
            }
            _ => false,
        };
        if stop {
            return i;
        }
    }
    len
}

// Plain text up to the next character that could begin inline markup. Always
// consumes at least one character of non-empty input, which keeps the parser
// total.
fn scan_inline_text_standard(input: &str) -> Option<RuleMatch> {
    if input.is_empty() {
        return None;
    }
    let end = inline_text_end(input, false);
    Some(RuleMatch {
        end,
        groups: vec![whole(input, end)],
    })
}

fn scan_inline_text_chat(input: &str) -> Option<RuleMatch> {
    if input.is_empty() {
        return None;
    }
    let end = inline_text_end(input, true);
    Some(RuleMatch {
        end,
        groups: vec![whole(input, end)],
    })
}

// The emoji rule consumes nothing itself; the parser substitutes shortcodes
// in the remaining input and re-enters the match loop.
fn scan_emoji(input: &str) -> Option<RuleMatch> {
    if EMOJI_RE.is_match(input) {
        Some(RuleMatch {
            end: 0,
            groups: Vec::new(),
        })
    } else {
        None
    }
}
