//! The parsed tree.

use indexmap::IndexMap;

/// A single node in a parsed wikitext tree.
///
/// The node set is closed, so this is a sum type rather than a trait
/// object hierarchy: every variant that can nest carries the same
/// `children` shape, giving callers one universal way to walk the tree
/// regardless of node kind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// A run of plain text, consumed verbatim with no unescaping.
    Text {
        /// The exact source bytes of this run.
        content: String,
    },
    /// A `'''bold'''` span.
    Bold {
        /// Inline content. May contain [`Node::Italic`] but never another
        /// [`Node::Bold`].
        children: Vec<Node>,
    },
    /// A `''italic''` span.
    Italic {
        /// Inline content. May contain [`Node::Bold`] but never another
        /// [`Node::Italic`].
        children: Vec<Node>,
    },
    /// A `==Header==`.
    Header {
        /// Outline level, `1..=6`, taken from the opening `=` run.
        level: u8,
        /// Inline content parsed from between the `=` runs.
        children: Vec<Node>,
    },
    /// A `[[target|display]]` internal link that did not match any of the
    /// more specific link kinds below.
    Link {
        /// The link target, trimmed.
        target: String,
        /// The display text, trimmed. Equals `target` when no `|` was
        /// present.
        display: String,
    },
    /// A `[[Category:name]]` link.
    Category {
        /// The category name, with the `Category:` prefix stripped.
        name: String,
    },
    /// A `[[File:name|params...]]` link.
    File {
        /// The file name, with the `File:` prefix stripped.
        name: String,
        /// The pipe-separated tail of the display segment.
        parameters: Vec<String>,
    },
    /// A `[[lang:title]]` interlanguage link.
    InterlangLink {
        /// The two- or three-letter language code.
        lang: String,
        /// The remainder of the target after the language prefix.
        title: String,
    },
    /// A `{{name|args...}}` template invocation, preserved verbatim rather
    /// than evaluated.
    Template {
        /// The template name, trimmed, never empty.
        name: String,
        /// The argument list, in source order.
        args: Vec<Arg>,
    },
    /// A self-closing or container HTML-like tag.
    HtmlTag {
        /// The tag name, in its original case.
        tag: String,
        /// Attribute map. Insertion order is not meaningful; the last
        /// occurrence of a repeated attribute name wins.
        attributes: IndexMap<String, String>,
        /// Parsed body. Empty for self-closing tags.
        children: Vec<Node>,
    },
    /// An HTML comment, `<!-- ... -->`.
    Comment {
        /// The verbatim content between the delimiters.
        content: String,
    },
    /// A `<nowiki>...</nowiki>` verbatim region.
    Nowiki {
        /// The verbatim content between the tags.
        content: String,
    },
    /// A `<ref>` citation tag.
    Ref {
        /// The `name` attribute, if present.
        name: Option<String>,
        /// The `group` attribute, if present.
        group: Option<String>,
        /// Parsed body. Empty for self-closing refs.
        children: Vec<Node>,
    },
    /// A single `*`/`#` list item line.
    ListItem {
        /// Whether the item was introduced by `*` or `#`.
        kind: ListKind,
        /// Nesting depth, i.e. the number of marker characters.
        level: u32,
        /// Inline content of the line, excluding the trailing newline.
        children: Vec<Node>,
    },
    /// A `{| ... |}` table.
    Table {
        /// The table's rows, in source order.
        children: Vec<Node>,
    },
    /// One row of a table.
    TableRow {
        /// The row's cells, in source order.
        children: Vec<Node>,
    },
    /// One cell of a table row.
    TableCell {
        /// Whether the cell was introduced by `!` or `|`.
        kind: TableCellKind,
        /// Parsed cell content, with any leading attribute block
        /// stripped.
        children: Vec<Node>,
    },
}

impl Node {
    /// The node's children, for variants that have any.
    ///
    /// Leaf variants (`Text`, `Link`, `Category`, `File`,
    /// `InterlangLink`, `Comment`, `Nowiki`) return an empty slice.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Bold { children }
            | Node::Italic { children }
            | Node::Header { children, .. }
            | Node::HtmlTag { children, .. }
            | Node::Ref { children, .. }
            | Node::ListItem { children, .. }
            | Node::Table { children }
            | Node::TableRow { children }
            | Node::TableCell { children, .. } => children,
            Node::Text { .. }
            | Node::Link { .. }
            | Node::Category { .. }
            | Node::File { .. }
            | Node::InterlangLink { .. }
            | Node::Template { .. }
            | Node::Comment { .. }
            | Node::Nowiki { .. } => &[],
        }
    }
}

/// The marker kind of a [`Node::ListItem`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// Introduced by one or more `*`.
    Unordered,
    /// Introduced by one or more `#`.
    Ordered,
}

/// The marker kind of a [`Node::TableCell`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableCellKind {
    /// Introduced by `!`.
    Header,
    /// Introduced by `|`.
    Data,
}

/// A single template argument.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Arg {
    /// An argument with no `name=` prefix.
    Positional(ArgValue),
    /// A `name=value` argument. `name` is trimmed.
    Named(String, ArgValue),
}

impl Arg {
    /// The value carried by this argument, regardless of whether it is
    /// positional or named.
    #[must_use]
    pub fn value(&self) -> &ArgValue {
        match self {
            Arg::Positional(value) | Arg::Named(_, value) => value,
        }
    }
}

/// An argument value: a string, or a sequence mixing plain text with
/// nested nodes.
///
/// This is always stored as a sequence of parts. When the value turned
/// out to be purely textual, it collapses to a single [`ArgPart::Text`]
/// part, which [`ArgValue::as_str`] exposes as a plain `&str`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArgValue(pub Vec<ArgPart>);

impl ArgValue {
    /// Returns the value as a plain string, if it contains exactly one
    /// text part and no nested nodes.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self.0.as_slice() {
            [ArgPart::Text(text)] => Some(text),
            _ => None,
        }
    }

    /// Returns true if the value has no parts at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}


/// One part of an [`ArgValue`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArgPart {
    /// A run of plain text.
    Text(String),
    /// A nested node (template, link, formatting span, etc.).
    Node(Node),
}
