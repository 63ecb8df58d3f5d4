//! `<ref>` citation tags. These get a dedicated sub-parser because their
//! attributes (`name`, `group`) drive the node's payload rather than
//! being preserved as a generic attribute map.

use indexmap::IndexMap;

use super::{html, Ctx};
use crate::config::Config;
use crate::error::Error;
use crate::node::Node;

pub(super) fn try_ref(
    rest: &str,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<Option<(Node, usize)>, Error> {
    let Some((tag_name, attributes, self_closing, opener_len)) = html::parse_open_tag(rest) else {
        return Ok(None);
    };
    if !tag_name.eq_ignore_ascii_case("ref") {
        return Ok(None);
    }

    let name = attr(&attributes, "name");
    let group = attr(&attributes, "group");

    if self_closing {
        return Ok(Some((
            Node::Ref {
                name,
                group,
                children: Vec::new(),
            },
            opener_len,
        )));
    }

    let body_input = &rest[opener_len..];
    let depth = super::enter(depth, base_offset + opener_len, body_input, config)?;

    match html::parse_until_closing_tag(
        Ctx::html_body(),
        body_input,
        base_offset + opener_len,
        depth,
        config,
    )? {
        Some((children, body_len, close_len)) => Ok(Some((
            Node::Ref {
                name,
                group,
                children,
            },
            opener_len + body_len + close_len,
        ))),
        None => Ok(Some((
            Node::Ref {
                name,
                group,
                children: Vec::new(),
            },
            opener_len,
        ))),
    }
}

fn attr(attributes: &IndexMap<String, String>, key: &str) -> Option<String> {
    attributes.get(key).map(|value| value.trim().to_string())
}
