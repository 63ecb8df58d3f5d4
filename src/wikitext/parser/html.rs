//! HTML-like tags: self-closing and container forms, with attributes.

use indexmap::IndexMap;

use super::{ends_at_line_start, try_alternatives, Ctx};
use crate::config::Config;
use crate::error::Error;
use crate::node::Node;

pub(super) fn try_html(
    rest: &str,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<Option<(Node, usize)>, Error> {
    let Some((name, attributes, self_closing, opener_len)) = parse_open_tag(rest) else {
        return Ok(None);
    };
    let tag = name.to_string();

    if self_closing {
        return Ok(Some((
            Node::HtmlTag {
                tag,
                attributes,
                children: Vec::new(),
            },
            opener_len,
        )));
    }

    let body_input = &rest[opener_len..];
    let depth = super::enter(depth, base_offset + opener_len, body_input, config)?;

    // Prefer the container form whenever any closing tag turns up
    // (mismatched names are accepted); fall back to self-closing — this
    // is how the ambiguous `<br>` case resolves either way.
    match parse_until_closing_tag(Ctx::html_body(), body_input, base_offset + opener_len, depth, config)? {
        Some((children, body_len, close_len)) => Ok(Some((
            Node::HtmlTag {
                tag,
                attributes,
                children,
            },
            opener_len + body_len + close_len,
        ))),
        None => Ok(Some((
            Node::HtmlTag {
                tag,
                attributes,
                children: Vec::new(),
            },
            opener_len,
        ))),
    }
}

/// Parses body content up to (and including) the next closing tag of any
/// name. Returns the children, the body length excluding the closer, and
/// the closer's own length.
pub(super) fn parse_until_closing_tag(
    ctx: Ctx,
    input: &str,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<Option<(Vec<Node>, usize, usize)>, Error> {
    let mut nodes = Vec::new();
    let mut pos = 0;
    let mut at_line_start = false;

    loop {
        let rest = &input[pos..];
        if let Some(close_len) = match_closing_tag(rest) {
            return Ok(Some((nodes, pos, close_len)));
        }
        if rest.is_empty() {
            return Ok(None);
        }
        match try_alternatives(ctx, rest, at_line_start, base_offset + pos, depth, config)? {
            Some((node, consumed)) => {
                at_line_start = ends_at_line_start(rest, consumed);
                pos += consumed;
                nodes.push(node);
            }
            None => return Ok(None),
        }
    }
}

fn match_closing_tag(rest: &str) -> Option<usize> {
    let after = rest.strip_prefix("</")?;
    let name_len = after
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(after.len());
    if name_len == 0 {
        return None;
    }
    let after_name = &after[name_len..];
    let gt = after_name.find('>')?;
    if !after_name[..gt].chars().all(char::is_whitespace) {
        return None;
    }
    Some(2 + name_len + gt + 1)
}

/// Parses `<name attr="value" .../>` or `<name attr="value" ...>`,
/// returning the tag name, its attributes, whether it was self-closing,
/// and the total length of the opening tag.
pub(super) fn parse_open_tag(rest: &str) -> Option<(&str, IndexMap<String, String>, bool, usize)> {
    let after = rest.strip_prefix('<')?;
    let name_len = after
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(after.len());
    if name_len == 0 {
        return None;
    }
    let name = &after[..name_len];
    let mut pos = name_len;
    let mut attributes = IndexMap::new();

    loop {
        pos += skip_inline_whitespace(&after[pos..]);
        let tail = &after[pos..];
        if tail.starts_with("/>") {
            return Some((name, attributes, true, 1 + pos + 2));
        }
        if tail.starts_with('>') {
            return Some((name, attributes, false, 1 + pos + 1));
        }
        let (key, value, consumed) = parse_attribute(tail)?;
        if consumed == 0 {
            return None;
        }
        attributes.insert(key, value);
        pos += consumed;
    }
}

fn skip_inline_whitespace(text: &str) -> usize {
    text.chars()
        .take_while(|c| c.is_whitespace() && *c != '\n')
        .map(char::len_utf8)
        .sum()
}

fn parse_attribute(tail: &str) -> Option<(String, String, usize)> {
    let name_len = tail
        .find(|c: char| c.is_whitespace() || c == '=' || c == '>' || c == '/')
        .unwrap_or(tail.len());
    if name_len == 0 {
        return None;
    }
    let name = tail[..name_len].to_string();
    let mut pos = name_len;
    pos += skip_inline_whitespace(&tail[pos..]);

    if !tail[pos..].starts_with('=') {
        return Some((name, String::new(), pos));
    }
    pos += 1;
    pos += skip_inline_whitespace(&tail[pos..]);

    let value_tail = &tail[pos..];
    if let Some(quoted) = value_tail.strip_prefix('"') {
        let end = quoted.find('"')?;
        return Some((name, quoted[..end].to_string(), pos + 1 + end + 1));
    }
    if let Some(quoted) = value_tail.strip_prefix('\'') {
        let end = quoted.find('\'')?;
        return Some((name, quoted[..end].to_string(), pos + 1 + end + 1));
    }
    let end = value_tail
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(value_tail.len());
    if end == 0 {
        return None;
    }
    Some((name, value_tail[..end].to_string(), pos + end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_closing_with_attributes() {
        let (name, attrs, self_closing, len) =
            parse_open_tag(r#"<br class="x" />tail"#).unwrap();
        assert_eq!(name, "br");
        assert!(self_closing);
        assert_eq!(attrs.get("class").map(String::as_str), Some("x"));
        assert_eq!(len, r#"<br class="x" />"#.len());
    }

    #[test]
    fn duplicate_attribute_last_wins() {
        let (_, attrs, _, _) = parse_open_tag(r#"<a href="one" href="two">"#).unwrap();
        assert_eq!(attrs.get("href").map(String::as_str), Some("two"));
    }

    #[test]
    fn container_tag_with_body() {
        let (node, consumed) =
            try_html("<b>inner</b> tail", 0, 0, &Config::default()).unwrap().unwrap();
        assert_eq!(consumed, "<b>inner</b>".len());
        assert_eq!(
            node,
            Node::HtmlTag {
                tag: "b".to_string(),
                attributes: IndexMap::new(),
                children: vec![Node::Text {
                    content: "inner".to_string()
                }]
            }
        );
    }

    #[test]
    fn br_without_closer_is_self_closing() {
        let (node, consumed) = try_html("<br>text", 0, 0, &Config::default()).unwrap().unwrap();
        assert_eq!(consumed, "<br>".len());
        assert_eq!(
            node,
            Node::HtmlTag {
                tag: "br".to_string(),
                attributes: IndexMap::new(),
                children: Vec::new(),
            }
        );
    }

    #[test]
    fn br_prefers_container_when_a_closer_appears() {
        let (node, _) =
            try_html("<br>text</br>", 0, 0, &Config::default()).unwrap().unwrap();
        assert_eq!(
            node,
            Node::HtmlTag {
                tag: "br".to_string(),
                attributes: IndexMap::new(),
                children: vec![Node::Text {
                    content: "text".to_string()
                }]
            }
        );
    }

    #[test]
    fn closing_tag_name_mismatch_is_accepted() {
        let (node, _) =
            try_html("<b>inner</i>", 0, 0, &Config::default()).unwrap().unwrap();
        assert_eq!(
            node,
            Node::HtmlTag {
                tag: "b".to_string(),
                attributes: IndexMap::new(),
                children: vec![Node::Text {
                    content: "inner".to_string()
                }]
            }
        );
    }
}
