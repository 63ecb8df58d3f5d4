//! `[[...]]` links, categories, files, and interlanguage links.
//!
//! Link bodies are not re-parsed as wikitext — target and display are
//! plain, trimmed strings. This is a deliberate simplification over the
//! full grammar.

use crate::node::Node;

pub(super) fn try_link(rest: &str) -> Option<(Node, usize)> {
    let inner = rest.strip_prefix("[[")?;
    let end = find_before_newline(inner, "]]")?;
    let payload = &inner[..end];
    let total = 2 + end + 2;

    let (target_raw, display_raw) = match payload.split_once('|') {
        Some((target, display)) => (target, Some(display)),
        None => (payload, None),
    };
    let target = target_raw.trim();
    let display = display_raw.map(str::trim);

    if let Some(name) = target.strip_prefix("Category:") {
        return Some((
            Node::Category {
                name: name.trim().to_string(),
            },
            total,
        ));
    }

    if let Some(name) = target.strip_prefix("File:") {
        let name = name.trim();
        let parameters = match display {
            Some(d) if d != name => d.split('|').map(|p| p.trim().to_string()).collect(),
            _ => Vec::new(),
        };
        return Some((
            Node::File {
                name: name.to_string(),
                parameters,
            },
            total,
        ));
    }

    if let Some(colon) = target.find(':') {
        let lang = &target[..colon];
        if (2..=3).contains(&lang.len()) && lang.chars().all(|c| c.is_ascii_lowercase()) {
            let title = target[colon + 1..].trim().to_string();
            return Some((
                Node::InterlangLink {
                    lang: lang.to_string(),
                    title,
                },
                total,
            ));
        }
    }

    let display = display.unwrap_or(target).to_string();
    Some((
        Node::Link {
            target: target.to_string(),
            display,
        },
        total,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_link_defaults_display_to_target() {
        let (node, consumed) = try_link("[[Target]] tail").unwrap();
        assert_eq!(consumed, 10);
        assert_eq!(
            node,
            Node::Link {
                target: "Target".to_string(),
                display: "Target".to_string()
            }
        );
    }

    #[test]
    fn link_with_display() {
        let (node, _) = try_link("[[a|b]]").unwrap();
        assert_eq!(
            node,
            Node::Link {
                target: "a".to_string(),
                display: "b".to_string()
            }
        );
    }

    #[test]
    fn category() {
        let (node, _) = try_link("[[Category:C]]").unwrap();
        assert_eq!(
            node,
            Node::Category {
                name: "C".to_string()
            }
        );
    }

    #[test]
    fn file_with_parameters() {
        let (node, _) = try_link("[[File:f.png|40px]]").unwrap();
        assert_eq!(
            node,
            Node::File {
                name: "f.png".to_string(),
                parameters: vec!["40px".to_string()]
            }
        );
    }

    #[test]
    fn interlang_link() {
        let (node, _) = try_link("[[de:X]]").unwrap();
        assert_eq!(
            node,
            Node::InterlangLink {
                lang: "de".to_string(),
                title: "X".to_string()
            }
        );
    }

    #[test]
    fn unterminated_link_fails() {
        assert_eq!(try_link("[[no closer here"), None);
    }

    #[test]
    fn link_cannot_cross_a_newline() {
        assert_eq!(try_link("[[a\nb]]"), None);
    }
}

/// Finds `needle` in `haystack`, but never crosses a newline — a link
/// cannot span multiple lines.
fn find_before_newline(haystack: &str, needle: &str) -> Option<usize> {
    let bound = haystack.find('\n').unwrap_or(haystack.len());
    haystack[..bound].find(needle)
}
