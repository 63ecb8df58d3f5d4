//! The recursive-descent grammar.
//!
//! Every sub-parser here is total: it either returns a node and the number
//! of bytes it consumed, or it returns `None`/fails without touching the
//! cursor. There is no backtracking mid-construct — alternatives always
//! peek (via `rest.starts_with(..)` or similar) before committing, so a
//! failed alternative never needs to undo partial work.

use crate::config::Config;
use crate::error::Error;
use crate::node::Node;

mod comment;
mod format;
mod header;
mod html;
mod link;
mod list;
mod ref_tag;
mod table;
mod template;
mod text;

/// Which alternatives are reachable from a given parsing context.
///
/// Formatting (bold/italic/bold-italic) is always reachable — it is gated
/// by [`Ctx::forbid_bold`]/[`Ctx::forbid_italic`] instead, since those
/// flags vary per-construct rather than per-context.
#[derive(Clone, Copy, Debug)]
struct Allow {
    template: bool,
    header: bool,
    comment: bool,
    nowiki: bool,
    table: bool,
    list: bool,
    link: bool,
    ref_tag: bool,
    html: bool,
}

impl Allow {
    const ALL: Self = Self {
        template: true,
        header: true,
        comment: true,
        nowiki: true,
        table: true,
        list: true,
        link: true,
        ref_tag: true,
        html: true,
    };
}

/// A parsing context: which alternatives apply, which characters stop a
/// plain-text run outright, and whether we're inside a bold/italic span
/// that can't directly nest another of the same kind.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ctx {
    allow: Allow,
    /// Characters that end a text run with zero further lookahead and, if
    /// encountered where no other alternative matches either, end the
    /// enclosing construct rather than being swallowed as text.
    hard_delimiters: &'static [char],
    forbid_bold: bool,
    forbid_italic: bool,
}

impl Ctx {
    /// The top-level document context: every alternative is reachable, and
    /// nothing is an unconditional stop character.
    pub(crate) fn top_level() -> Self {
        Self {
            allow: Allow::ALL,
            hard_delimiters: &[],
            forbid_bold: false,
            forbid_italic: false,
        }
    }

    /// The body of a container HTML tag or `<ref>`. Tables, headers,
    /// comments, and lists are not attempted inside tag bodies.
    fn html_body() -> Self {
        Self {
            allow: Allow {
                table: false,
                header: false,
                comment: false,
                list: false,
                ..Allow::ALL
            },
            hard_delimiters: &[],
            forbid_bold: false,
            forbid_italic: false,
        }
    }

    /// A template argument value. Only formatting, templates, links,
    /// comments, and HTML tags are recognised; `|`, `}`, and `\n`
    /// unconditionally end the argument.
    fn template_value() -> Self {
        Self {
            allow: Allow {
                table: false,
                header: false,
                list: false,
                nowiki: false,
                ref_tag: false,
                ..Allow::ALL
            },
            hard_delimiters: &['|', '}', '\n'],
            forbid_bold: false,
            forbid_italic: false,
        }
    }

    /// The single line of inline content following a list marker. `\n`
    /// unconditionally ends the item.
    fn list_item_line() -> Self {
        Self {
            allow: Allow {
                header: false,
                table: false,
                list: false,
                ..Allow::ALL
            },
            hard_delimiters: &['\n'],
            forbid_bold: false,
            forbid_italic: false,
        }
    }

    /// A table cell's content, re-entering the full top-level alternative
    /// set but with `|` and `\n` as unconditional stops.
    fn table_cell() -> Self {
        Self {
            allow: Allow::ALL,
            hard_delimiters: &['|', '\n'],
            forbid_bold: false,
            forbid_italic: false,
        }
    }

    fn entering_bold(self) -> Self {
        Self {
            forbid_bold: true,
            ..self
        }
    }

    fn entering_italic(self) -> Self {
        Self {
            forbid_italic: true,
            ..self
        }
    }

    fn entering_bold_italic(self) -> Self {
        Self {
            forbid_bold: true,
            forbid_italic: true,
            ..self
        }
    }
}

/// Bumps the recursion counter, converting to [`Error`] if the configured
/// cap is exceeded.
fn enter(depth: u32, offset: usize, remainder: &str, config: &Config) -> Result<u32, Error> {
    let next = depth + 1;
    if next > config.max_depth {
        log::warn!(
            "recursion limit ({}) exceeded at byte offset {offset}",
            config.max_depth
        );
        return Err(Error::recursion_limit(config.max_depth, offset, remainder));
    }
    Ok(next)
}

/// True if the bytes just consumed end exactly on a newline, i.e. the
/// following position is the start of a new line.
fn ends_at_line_start(rest: &str, consumed: usize) -> bool {
    rest[..consumed].chars().next_back() == Some('\n')
}

/// Parses a maximal sequence of nodes from `input`, stopping when no
/// alternative (including the plain-text fallback) can make progress.
/// Returns the nodes and the number of bytes consumed, which may be less
/// than `input.len()`.
pub(crate) fn parse_sequence(
    ctx: Ctx,
    input: &str,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<(Vec<Node>, usize), Error> {
    let mut nodes = Vec::new();
    let mut pos = 0;
    let mut at_line_start = true;

    loop {
        let rest = &input[pos..];
        if rest.is_empty() {
            break;
        }
        match try_alternatives(ctx, rest, at_line_start, base_offset + pos, depth, config)? {
            Some((node, consumed)) => {
                at_line_start = ends_at_line_start(rest, consumed);
                pos += consumed;
                nodes.push(node);
            }
            None => break,
        }
    }

    Ok((nodes, pos))
}

/// Tries every alternative in the fixed precedence order, returning the
/// first that matches.
fn try_alternatives(
    ctx: Ctx,
    rest: &str,
    at_line_start: bool,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<Option<(Node, usize)>, Error> {
    if ctx.allow.template && rest.starts_with("{{") {
        if let Some(result) = template::try_template(ctx, rest, base_offset, depth, config)? {
            return Ok(Some(result));
        }
    }

    if ctx.allow.header && at_line_start && rest.starts_with('=') {
        if let Some(result) = header::try_header(ctx, rest, base_offset, depth, config)? {
            return Ok(Some(result));
        }
    }

    if ctx.allow.comment && rest.starts_with("<!--") {
        if let Some(result) = comment::try_comment(rest) {
            return Ok(Some(result));
        }
    }

    if ctx.allow.nowiki && peek_tag_name(rest).is_some_and(|name| name.eq_ignore_ascii_case("nowiki"))
    {
        if let Some(result) = comment::try_nowiki(rest) {
            return Ok(Some(result));
        }
    }

    if ctx.allow.table && rest.starts_with("{|") {
        if let Some(result) = table::try_table(rest, base_offset, depth, config)? {
            return Ok(Some(result));
        }
    }

    if ctx.allow.list && at_line_start && (rest.starts_with('*') || rest.starts_with('#')) {
        if let Some(result) = list::try_list_item(ctx, rest, base_offset, depth, config)? {
            return Ok(Some(result));
        }
    }

    if rest.starts_with('\'') {
        if let Some(result) = format::try_format(ctx, rest, base_offset, depth, config)? {
            return Ok(Some(result));
        }
    }

    if ctx.allow.link && rest.starts_with("[[") {
        if let Some(result) = link::try_link(rest) {
            return Ok(Some(result));
        }
    }

    if ctx.allow.ref_tag && peek_tag_name(rest).is_some_and(|name| name.eq_ignore_ascii_case("ref")) {
        if let Some(result) = ref_tag::try_ref(rest, base_offset, depth, config)? {
            return Ok(Some(result));
        }
    }

    if ctx.allow.html && rest.starts_with('<') {
        if let Some(result) = html::try_html(rest, base_offset, depth, config)? {
            return Ok(Some(result));
        }
    }

    Ok(text::scan_text(ctx, rest))
}

/// If `rest` starts with an opening tag (`<name` or `<name/`...), returns
/// the tag name.
fn peek_tag_name(rest: &str) -> Option<&str> {
    let after = rest.strip_prefix('<')?;
    let end = after
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(after.len());
    (end > 0).then(|| &after[..end])
}
