//! Parser configuration.

/// Tunables for a single parse.
///
/// There is no site-specific configuration here (no namespace tables, no
/// interwiki maps, no magic-word lists) — this parser only builds the
/// syntax tree, it does not resolve anything against a wiki's installed
/// configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Maximum recursion depth before the parser gives up and reports
    /// [`crate::RecursionLimitError`].
    ///
    /// Nesting that hits this is almost always pathological input (e.g.
    /// thousands of unbalanced `{{`), not a legitimate document.
    pub max_depth: u32,
}

impl Config {
    /// The default recursion depth cap.
    pub const DEFAULT_MAX_DEPTH: u32 = 256;
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
