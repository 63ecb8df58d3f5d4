//! `{{name|args...}}` templates.
//!
//! Key-value classification uses a deliberately naive raw-character scan
//! (first of `=`, `|`, `}`, `\n` decides) rather than a structural check —
//! this is what the source grammar does, including its known
//! misclassification of arguments whose nested `{{...}}` calls contain an
//! `=` or `|` before the outer argument's own delimiter.

use super::Ctx;
use crate::config::Config;
use crate::error::Error;
use crate::node::{Arg, ArgPart, ArgValue, Node};

pub(super) fn try_template(
    ctx: Ctx,
    rest: &str,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<Option<(Node, usize)>, Error> {
    let _ = ctx;
    let after = &rest[2..];
    let Some(name_end) = after.find(['|', '\n', '\r', '}']) else {
        return Ok(None);
    };
    let raw_name = &after[..name_end];

    let depth = super::enter(depth, base_offset, rest, config)?;

    match after.as_bytes().get(name_end) {
        Some(b'}') => {
            if !after[name_end..].starts_with("}}") {
                return Ok(None);
            }
            let name = raw_name.trim();
            if name.is_empty() {
                return Ok(None);
            }
            Ok(Some((
                Node::Template {
                    name: name.to_string(),
                    args: Vec::new(),
                },
                2 + name_end + 2,
            )))
        }
        Some(b'|') => {
            let name = raw_name.trim();
            if name.is_empty() {
                return Ok(None);
            }
            let mut pos = 2 + name_end + 1; // past "{{" + name + '|'
            let mut args = Vec::new();

            loop {
                let input = &rest[pos..];
                let (arg, consumed, terminator) =
                    parse_argument(input, base_offset + pos, depth, config)?;
                pos += consumed;
                if let Some(arg) = arg {
                    args.push(arg);
                }
                match terminator {
                    ArgTerminator::NextArg => pos += 1,
                    ArgTerminator::EndTemplate => {
                        pos += 2;
                        return Ok(Some((
                            Node::Template {
                                name: name.to_string(),
                                args,
                            },
                            pos,
                        )));
                    }
                    ArgTerminator::Unterminated => return Ok(None),
                }
            }
        }
        _ => Ok(None),
    }
}

enum ArgTerminator {
    NextArg,
    EndTemplate,
    Unterminated,
}

fn parse_argument(
    input: &str,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<(Option<Arg>, usize, ArgTerminator), Error> {
    let stop = input.find(['=', '|', '}', '\n']);
    let is_named = matches!(stop.map(|i| input.as_bytes()[i]), Some(b'='));

    let (key, value_start) = if is_named {
        let key_end = stop.expect("is_named implies a match");
        (Some(input[..key_end].trim().to_string()), key_end + 1)
    } else {
        (None, 0)
    };

    let value_input = &input[value_start..];
    let (parts, consumed, terminator) = collect_value(
        Ctx::template_value(),
        value_input,
        base_offset + value_start,
        depth,
        config,
    )?;

    let value = finalize_value(parts);
    let arg = if value.is_empty() {
        None
    } else {
        Some(match key {
            Some(key) => Arg::Named(key, value),
            None => Arg::Positional(value),
        })
    };

    Ok((arg, value_start + consumed, terminator))
}

fn collect_value(
    ctx: Ctx,
    input: &str,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<(Vec<ArgPart>, usize, ArgTerminator), Error> {
    let mut parts: Vec<ArgPart> = Vec::new();
    let mut pos = 0;

    loop {
        let rest = &input[pos..];
        if rest.starts_with("}}") {
            return Ok((parts, pos, ArgTerminator::EndTemplate));
        }
        if rest.starts_with('|') {
            return Ok((parts, pos, ArgTerminator::NextArg));
        }
        if rest.is_empty() || rest.starts_with('}') {
            return Ok((parts, pos, ArgTerminator::Unterminated));
        }
        match super::try_alternatives(ctx, rest, false, base_offset + pos, depth, config)? {
            Some((Node::Text { content }, consumed)) => {
                push_text(&mut parts, content);
                pos += consumed;
            }
            Some((node, consumed)) => {
                parts.push(ArgPart::Node(node));
                pos += consumed;
            }
            None => return Ok((parts, pos, ArgTerminator::Unterminated)),
        }
    }
}

fn push_text(parts: &mut Vec<ArgPart>, content: String) {
    if let Some(ArgPart::Text(existing)) = parts.last_mut() {
        existing.push_str(&content);
    } else {
        parts.push(ArgPart::Text(content));
    }
}

fn finalize_value(mut parts: Vec<ArgPart>) -> ArgValue {
    if let Some(ArgPart::Text(text)) = parts.last_mut() {
        let trimmed_len = text.trim_end().len();
        text.truncate(trimmed_len);
        if text.is_empty() {
            parts.pop();
        }
    }
    ArgValue(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_no_args() {
        let (node, consumed) =
            try_template(Ctx::top_level(), "{{Name}} tail", 0, 0, &Config::default())
                .unwrap()
                .unwrap();
        assert_eq!(consumed, "{{Name}}".len());
        assert_eq!(
            node,
            Node::Template {
                name: "Name".to_string(),
                args: Vec::new(),
            }
        );
    }

    #[test]
    fn positional_then_named_argument() {
        let (node, _) =
            try_template(Ctx::top_level(), "{{t|a|k=v}}", 0, 0, &Config::default())
                .unwrap()
                .unwrap();
        assert_eq!(
            node,
            Node::Template {
                name: "t".to_string(),
                args: vec![
                    Arg::Positional(ArgValue(vec![ArgPart::Text("a".to_string())])),
                    Arg::Named(
                        "k".to_string(),
                        ArgValue(vec![ArgPart::Text("v".to_string())])
                    ),
                ],
            }
        );
    }

    #[test]
    fn nested_template_argument_value() {
        let (node, _) =
            try_template(Ctx::top_level(), "{{tt|A {{B}} C|x}}", 0, 0, &Config::default())
                .unwrap()
                .unwrap();
        let Node::Template { name, args } = node else {
            panic!("expected a template node");
        };
        assert_eq!(name, "tt");
        assert_eq!(
            args,
            vec![
                Arg::Positional(ArgValue(vec![
                    ArgPart::Text("A ".to_string()),
                    ArgPart::Node(Node::Template {
                        name: "B".to_string(),
                        args: Vec::new(),
                    }),
                    ArgPart::Text(" C".to_string()),
                ])),
                Arg::Positional(ArgValue(vec![ArgPart::Text("x".to_string())])),
            ]
        );
    }

    #[test]
    fn whitespace_only_argument_is_discarded() {
        let (node, _) =
            try_template(Ctx::top_level(), "{{t|   |b}}", 0, 0, &Config::default())
                .unwrap()
                .unwrap();
        assert_eq!(
            node,
            Node::Template {
                name: "t".to_string(),
                args: vec![Arg::Positional(ArgValue(vec![ArgPart::Text(
                    "b".to_string()
                )]))],
            }
        );
    }

    #[test]
    fn trailing_whitespace_is_trimmed_from_argument_value() {
        let (node, _) =
            try_template(Ctx::top_level(), "{{t|value   }}", 0, 0, &Config::default())
                .unwrap()
                .unwrap();
        assert_eq!(
            node,
            Node::Template {
                name: "t".to_string(),
                args: vec![Arg::Positional(ArgValue(vec![ArgPart::Text(
                    "value".to_string()
                )]))],
            }
        );
    }

    #[test]
    fn unterminated_template_fails() {
        let result = try_template(Ctx::top_level(), "{{t|a", 0, 0, &Config::default()).unwrap();
        assert_eq!(result, None);
    }
}
