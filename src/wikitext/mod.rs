//! Wikitext grammar and tree construction.
//!
//! Parsing is a single pass: [`parse`] dispatches on the first character
//! or two at the current position, tries each alternative in a fixed
//! precedence order (see [`parser`]), and either advances past a
//! produced node or, if nothing matches, stops and returns the
//! unconsumed tail as `remainder`. There is no separate tokenizer and no
//! shared mutable state — recursion happens only where a construct's own
//! body re-enters the driver (header content, tag bodies, table cells).

mod parser;
mod visit;

use crate::config::Config;
use crate::error::Error;
use crate::node::Node;
use crate::Output;

pub use visit::{extract_text, find_headers, find_links, find_templates};

/// Parses `input`, ignoring leading/trailing ASCII whitespace.
///
/// Returns `Err` only when the configured recursion depth is exceeded;
/// every other kind of malformed input is absorbed by the driver and
/// surfaces, at worst, as a non-empty `remainder`.
pub(crate) fn parse(input: &str, config: &Config) -> Result<Output, Error> {
    let trimmed = input.trim_matches(|c: char| c.is_ascii_whitespace());
    let (nodes, consumed) = parser::parse_sequence(
        parser::Ctx::top_level(),
        trimmed,
        0,
        0,
        config,
    )?;
    Ok(Output {
        nodes,
        remainder: trimmed[consumed..].to_string(),
    })
}

/// Concatenates the `content` of all [`Node::Text`] leaves, in
/// left-to-right order. Used by [`visit::extract_text`] and by the tree
/// reconstruction property: modulo whitespace trimmed inside template
/// arguments, this reproduces the original input.
fn dfs_text_content(nodes: &[Node], out: &mut String) {
    for node in nodes {
        if let Node::Text { content } = node {
            out.push_str(content);
        }
        dfs_text_content(node.children(), out);
    }
}

pub(crate) use self::dfs_text_content as collect_text;
