//! Line-oriented table parsing.
//!
//! The body between `{|` and `|}` is captured as one verbatim string and
//! then split into lines — a second pass distinct from the main
//! character-at-a-time grammar. Cell contents re-enter the top-level
//! driver. This is a deliberate simplification: rows cannot span lines,
//! and a nested table's own `|}` is not distinguished from the enclosing
//! one, so nested tables inside cells are not supported.

use super::{parse_sequence, Ctx};
use crate::config::Config;
use crate::error::Error;
use crate::node::{Node, TableCellKind};

pub(super) fn try_table(
    rest: &str,
    base_offset: usize,
    depth: u32,
    config: &Config,
) -> Result<Option<(Node, usize)>, Error> {
    let after = &rest[2..];
    let Some(end) = after.find("|}") else {
        return Ok(None);
    };
    let body = &after[..end];
    let total = 2 + end + 2;

    let mut row_nodes = Vec::new();

    for row in group_rows(body) {
        let row_kind = if row.first().is_some_and(|line| line.starts_with('!')) {
            TableCellKind::Header
        } else {
            TableCellKind::Data
        };

        let mut cell_nodes = Vec::with_capacity(row.len());
        for line in row {
            let content = line
                .strip_prefix('!')
                .or_else(|| line.strip_prefix('|'))
                .unwrap_or(line);
            // The marker/attribute-block separator is conventionally
            // followed by a space for readability; that space is not
            // itself content.
            let content = strip_attribute_block(content).trim();

            let cell_depth = super::enter(depth, base_offset, content, config)?;
            let (children, _consumed) =
                parse_sequence(Ctx::table_cell(), content, base_offset, cell_depth, config)?;
            cell_nodes.push(Node::TableCell {
                kind: row_kind,
                children,
            });
        }
        row_nodes.push(Node::TableRow {
            children: cell_nodes,
        });
    }

    Ok(Some((Node::Table { children: row_nodes }, total)))
}

fn group_rows(body: &str) -> Vec<Vec<&str>> {
    let mut rows = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("|-") {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            continue;
        }
        if trimmed.starts_with("|}") {
            continue;
        }
        if trimmed.starts_with('!') || trimmed.starts_with('|') {
            current.push(trimmed);
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

/// Strips the `" | "`-delimited attribute block, if any. This exists so
/// that a template invocation inside the block (e.g. `{{foo|5px}}`)
/// doesn't get split on its own internal pipe.
fn strip_attribute_block(text: &str) -> &str {
    match text.find(" | ") {
        Some(index) => &text[index + 3..],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_data_rows() {
        let (node, _) = try_table("{|\n! a | b\n|-\n| c\n|}", 0, 0, &Config::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            node,
            Node::Table {
                children: vec![
                    Node::TableRow {
                        children: vec![Node::TableCell {
                            kind: TableCellKind::Header,
                            children: vec![Node::Text {
                                content: "b".to_string()
                            }]
                        }]
                    },
                    Node::TableRow {
                        children: vec![Node::TableCell {
                            kind: TableCellKind::Data,
                            children: vec![Node::Text {
                                content: "c".to_string()
                            }]
                        }]
                    },
                ]
            }
        );
    }

    #[test]
    fn unterminated_table_fails() {
        let result = try_table("{|\n| a\n", 0, 0, &Config::default()).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn attribute_block_stripped_before_space_pipe_space() {
        assert_eq!(strip_attribute_block("style=\"x\" | content"), "content");
        assert_eq!(strip_attribute_block("no attribute block"), "no attribute block");
    }
}
