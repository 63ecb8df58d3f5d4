//! HTML comments and `<nowiki>` verbatim regions. Both succeed only if
//! their terminator is present; neither parses its body.

use crate::node::Node;

pub(super) fn try_comment(rest: &str) -> Option<(Node, usize)> {
    let inner = rest.strip_prefix("<!--")?;
    let end = inner.find("-->")?;
    Some((
        Node::Comment {
            content: inner[..end].to_string(),
        },
        4 + end + 3,
    ))
}

pub(super) fn try_nowiki(rest: &str) -> Option<(Node, usize)> {
    let inner = rest.strip_prefix("<nowiki>")?;
    let end = inner.find("</nowiki>")?;
    Some((
        Node::Nowiki {
            content: inner[..end].to_string(),
        },
        8 + end + 9,
    ))
}
