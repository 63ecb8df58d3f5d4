//! Bold/italic precedence resolution.
//!
//! Apostrophe runs of length 5, 3, 2 are matched longest-first, gated by
//! `forbid_bold`/`forbid_italic` so that `bold` never directly contains
//! `bold` and `italic` never directly contains `italic`. A run longer than
//! the opener it resolves to is not fully consumed — the surplus
//! apostrophes are left for the next alternative attempt at the new
//! cursor position, which is a deliberate simplification of pathological
//! inputs like `''''''''x''''''''`.

use super::{ends_at_line_start, try_alternatives, Ctx};
use crate::config::Config;
use crate::error::Error;
use crate::node::Node;

pub(super) fn try_format(
    ctx: Ctx,
    rest: &str,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<Option<(Node, usize)>, Error> {
    let run = rest.chars().take_while(|&c| c == '\'').count();

    if run >= 5 && !ctx.forbid_bold {
        let body_input = &rest[5..];
        if let Some((children, consumed)) = parse_body(
            ctx.entering_bold_italic(),
            is_bold_italic_closer,
            body_input,
            base_offset + 5,
            depth,
            config,
        )? {
            let italic = Node::Italic { children };
            return Ok(Some((
                Node::Bold {
                    children: vec![italic],
                },
                5 + consumed + 5,
            )));
        }
    }

    if run >= 3 && !ctx.forbid_bold {
        let body_input = &rest[3..];
        if let Some((children, consumed)) = parse_body(
            ctx.entering_bold(),
            is_bold_closer,
            body_input,
            base_offset + 3,
            depth,
            config,
        )? {
            return Ok(Some((Node::Bold { children }, 3 + consumed + 3)));
        }
    }

    if run >= 2 && !ctx.forbid_italic {
        let body_input = &rest[2..];
        if let Some((children, consumed)) = parse_body(
            ctx.entering_italic(),
            is_italic_closer,
            body_input,
            base_offset + 2,
            depth,
            config,
        )? {
            return Ok(Some((Node::Italic { children }, 2 + consumed + 2)));
        }
    }

    Ok(None)
}

fn is_bold_italic_closer(rest: &str) -> bool {
    rest.starts_with("'''''")
}

fn is_bold_closer(rest: &str) -> bool {
    rest.starts_with("'''")
}

/// A `''` only closes italic when it is not actually the start of a
/// longer (bold, or bold-italic) run — that's treated as a nested bold
/// instead, per the ambiguity resolution rule.
fn is_italic_closer(rest: &str) -> bool {
    rest.starts_with("''") && !rest.starts_with("'''")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (Node, usize) {
        try_format(Ctx::top_level(), input, 0, 0, &Config::default())
            .unwrap()
            .expect("input should match a formatting alternative")
    }

    #[test]
    fn bold() {
        let (node, consumed) = run("'''BOLD''' words");
        assert_eq!(consumed, 10);
        assert_eq!(
            node,
            Node::Bold {
                children: vec![Node::Text {
                    content: "BOLD".to_string()
                }]
            }
        );
    }

    #[test]
    fn italic() {
        let (node, consumed) = run("''X'' more");
        assert_eq!(consumed, 5);
        assert_eq!(
            node,
            Node::Italic {
                children: vec![Node::Text {
                    content: "X".to_string()
                }]
            }
        );
    }

    #[test]
    fn bold_italic_normalizes_to_bold_of_italic() {
        let (node, consumed) = run("'''''X'''''");
        assert_eq!(consumed, 11);
        assert_eq!(
            node,
            Node::Bold {
                children: vec![Node::Italic {
                    children: vec![Node::Text {
                        content: "X".to_string()
                    }]
                }]
            }
        );
    }

    #[test]
    fn nested_bold_inside_italic() {
        let (node, _) = run("''don't use '''BOLD''' words''");
        assert_eq!(
            node,
            Node::Italic {
                children: vec![
                    Node::Text {
                        content: "don't use ".to_string()
                    },
                    Node::Bold {
                        children: vec![Node::Text {
                            content: "BOLD".to_string()
                        }]
                    },
                    Node::Text {
                        content: " words".to_string()
                    },
                ]
            }
        );
    }

    #[test]
    fn unterminated_run_fails() {
        let result = try_format(Ctx::top_level(), "'''never closes", 0, 0, &Config::default())
            .unwrap();
        assert_eq!(result, None);
    }
}

fn parse_body(
    ctx: Ctx,
    is_closer: impl Fn(&str) -> bool,
    input: &str,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<Option<(Vec<Node>, usize)>, Error> {
    let depth = super::enter(depth, base_offset, input, config)?;
    let mut nodes = Vec::new();
    let mut pos = 0;
    let mut at_line_start = false;

    loop {
        let rest = &input[pos..];
        if is_closer(rest) {
            return Ok(Some((nodes, pos)));
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
