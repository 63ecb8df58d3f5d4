//! `*`/`#` list items.

use super::{parse_sequence, Ctx};
use crate::config::Config;
use crate::error::Error;
use crate::node::{ListKind, Node};

pub(super) fn try_list_item(
    ctx: Ctx,
    rest: &str,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<Option<(Node, usize)>, Error> {
    let _ = ctx;
    let marker_len = rest.chars().take_while(|&c| c == '*' || c == '#').count();
    if marker_len == 0 {
        return Ok(None);
    }

    let after_markers = &rest[marker_len..];
    let Some(ws) = after_markers.chars().next() else {
        return Ok(None);
    };
    if ws != ' ' && ws != '\t' {
        return Ok(None);
    }

    // The nesting level is mixed-marker aware (e.g. `*#`); the innermost
    // (last) marker character decides whether the item is ordered.
    let kind = if rest[..marker_len].ends_with('#') {
        ListKind::Ordered
    } else {
        ListKind::Unordered
    };

    let content_start = marker_len + ws.len_utf8();
    let line = &after_markers[ws.len_utf8()..];
    let line_len = line.find('\n').unwrap_or(line.len());
    let content = &line[..line_len];

    let depth = super::enter(depth, base_offset + content_start, content, config)?;
    let (children, _consumed) = parse_sequence(
        Ctx::list_item_line(),
        content,
        base_offset + content_start,
        depth,
        config,
    )?;

    Ok(Some((
        Node::ListItem {
            kind,
            level: marker_len as u32,
            children,
        },
        content_start + line_len,
    )))
}
