//! `==Header==` parsing.

use super::{parse_sequence, Ctx};
use crate::config::Config;
use crate::error::Error;
use crate::node::Node;

pub(super) fn try_header(
    ctx: Ctx,
    rest: &str,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<Option<(Node, usize)>, Error> {
    // The enclosing `ctx` only governed whether we were dispatched here at
    // all; header content is re-parsed fresh, not inheriting it.
    let _ = ctx;
    let line_len = rest.find('\n').unwrap_or(rest.len());
    let line = &rest[..line_len];

    let opener_len = line.chars().take_while(|&c| c == '=').count().min(6);
    if opener_len == 0 {
        return Ok(None);
    }
    let trailing_run = line.chars().rev().take_while(|&c| c == '=').count().min(6);
    if trailing_run == 0 {
        return Ok(None);
    }

    let body_start = if line[opener_len..].starts_with(' ') {
        opener_len + 1
    } else {
        opener_len
    };
    let closer_start = line.len() - trailing_run;
    let body_end = if closer_start > 0 && line[..closer_start].ends_with(' ') {
        closer_start - 1
    } else {
        closer_start
    };
    if body_end < body_start {
        return Ok(None);
    }

    let level = u8::try_from(opener_len).expect("opener_len capped at 6");
    let body = &line[body_start..body_end];

    let depth = super::enter(depth, base_offset + body_start, body, config)?;
    let (children, _consumed) = parse_sequence(
        Ctx::top_level(),
        body,
        base_offset + body_start,
        depth,
        config,
    )?;

    Ok(Some((Node::Header { level, children }, line_len)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_and_body() {
        let (node, consumed) =
            try_header(Ctx::top_level(), "=== Title ===\nnext", 0, 0, &Config::default())
                .unwrap()
                .unwrap();
        assert_eq!(consumed, 13);
        assert_eq!(
            node,
            Node::Header {
                level: 3,
                children: vec![Node::Text {
                    content: "Title".to_string()
                }]
            }
        );
    }

    #[test]
    fn closing_run_need_not_match_opening_length() {
        let (node, _) =
            try_header(Ctx::top_level(), "== Title =", 0, 0, &Config::default())
                .unwrap()
                .unwrap();
        assert_eq!(
            node,
            Node::Header {
                level: 2,
                children: vec![Node::Text {
                    content: "Title".to_string()
                }]
            }
        );
    }

    #[test]
    fn opener_without_closer_fails() {
        let result = try_header(Ctx::top_level(), "== no closer", 0, 0, &Config::default())
            .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn level_is_capped_at_six() {
        let (node, _) =
            try_header(Ctx::top_level(), "======Deep======", 0, 0, &Config::default())
                .unwrap()
                .unwrap();
        assert_eq!(
            node,
            Node::Header {
                level: 6,
                children: vec![Node::Text {
                    content: "Deep".to_string()
                }]
            }
        );
    }
}
