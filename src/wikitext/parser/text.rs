//! Plain-text scanning: the fallback alternative that is always tried last
//! and is the only one guaranteed to make progress.

use super::Ctx;
use crate::node::Node;

/// Characters that might begin some other construct, and therefore need a
/// lookahead check before being admitted into a text run.
const SOFT_EXCLUSIONS: [char; 7] = ['{', '\'', '[', '=', '<', '*', '#'];

/// Consumes a maximal run of characters that cannot begin any other
/// construct at the current position.
///
/// This never returns `None` unless the very next character is one of
/// `ctx`'s hard delimiters — every other character, including ones that
/// merely look like the start of a construct, is consumed as a last
/// resort so the driver always makes progress.
pub(super) fn scan_text(ctx: Ctx, rest: &str) -> Option<(Node, usize)> {
    let mut end = 0;

    for (index, ch) in rest.char_indices() {
        if ctx.hard_delimiters.contains(&ch) {
            break;
        }
        if SOFT_EXCLUSIONS.contains(&ch) && looks_like_construct_start(&rest[index..]) {
            break;
        }
        end = index + ch.len_utf8();
    }

    if end > 0 {
        return Some((
            Node::Text {
                content: rest[..end].to_string(),
            },
            end,
        ));
    }

    let ch = rest.chars().next()?;
    if ctx.hard_delimiters.contains(&ch) {
        return None;
    }
    let len = ch.len_utf8();
    Some((
        Node::Text {
            content: rest[..len].to_string(),
        },
        len,
    ))
}


/// Two-character lookahead: does `from` (which starts with a soft
/// exclusion character) actually look like the start of another
/// construct?
fn looks_like_construct_start(from: &str) -> bool {
    let mut chars = from.chars();
    let ch = chars.next().expect("caller passed a non-empty slice");
    let next = chars.next();

    match ch {
        '\'' => next == Some('\''),
        '{' => matches!(next, Some('{') | Some('|')),
        '[' => next == Some('['),
        '=' => next == Some('='),
        '<' => {
            if from[1..].starts_with("!--") {
                true
            } else {
                matches!(next, Some(c) if c.is_ascii_alphabetic() || c == '/')
            }
        }
        '*' | '#' => matches!(next, Some(n) if n.is_whitespace() || n == ch),
        _ => false,
    }
}
