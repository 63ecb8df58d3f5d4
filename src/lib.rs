//! A parser for MediaWiki wikitext.
//!
//! This crate turns a wikitext source string into a tree of [`Node`]s:
//! plain text runs, bold/italic spans, links, templates, tables, and the
//! handful of HTML-like constructs MediaWiki accepts inline. It does not
//! evaluate templates, expand magic words, or render anything — it only
//! builds the tree so a caller can walk it.
//!
//! ```
//! let output = wikitext_rs::parse("Hello {{T|X}} world");
//! assert_eq!(output.nodes.len(), 3);
//! assert!(output.remainder.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod node;
mod wikitext;

pub use config::Config;
pub use error::{Error, RecursionLimitError};
pub use node::{Arg, ArgPart, ArgValue, ListKind, Node, TableCellKind};
pub use wikitext::{extract_text, find_headers, find_links, find_templates};

/// The outcome of a top-level parse.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Output {
    /// The top-level nodes produced, in source order.
    pub nodes: Vec<Node>,
    /// The unconsumed tail of the input, if the driver could not make
    /// further progress. Empty on a fully-consumed parse.
    pub remainder: String,
}

/// Parses `input` as wikitext using the default [`Config`].
///
/// This is permissive: it returns `Ok` whenever at least the leading
/// whitespace of `input` was consumable. `Err` is reserved for
/// implementation-limit failures (recursion depth exceeded).
pub fn parse(input: &str) -> Output {
    match parse_with_config(input, &Config::default()) {
        Ok(output) => output,
        Err(err) => Output {
            nodes: Vec::new(),
            remainder: err.remainder,
        },
    }
}

/// Parses `input` as wikitext, returning an error if the configured
/// recursion depth is exceeded.
pub fn parse_with_config(input: &str, config: &Config) -> Result<Output, Error> {
    wikitext::parse(input, config)
}
