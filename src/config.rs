//! Parser configuration

use crate::core::dialect::{Dialect, Hints};
use crate::core::directory::DEFAULT_DIRECTORY_CAPACITY;

/// Default limit for element nesting in XML mode
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Settings for one parse
///
/// ```
/// use tagscan::{Hints, ParserConfig};
///
/// let config = ParserConfig {
///     hints: Hints::HTML | Hints::REMOVE_EMPTY_CONTENT,
///     ..Default::default()
/// };
/// assert_eq!(config.max_depth, tagscan::DEFAULT_MAX_DEPTH);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Mode flags; [`Hints::HTML`] selects the HTML dialect
    pub hints: Hints,
    /// Maximum number of nested open elements followed in XML mode
    pub max_depth: usize,
    /// Maximum directory length in bytes, longer paths are cut
    pub directory_capacity: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            hints: Hints::empty(),
            max_depth: DEFAULT_MAX_DEPTH,
            directory_capacity: DEFAULT_DIRECTORY_CAPACITY,
        }
    }
}

impl ParserConfig {
    /// Default configuration with the given hints
    pub fn with_hints(hints: Hints) -> Self {
        ParserConfig {
            hints,
            ..Default::default()
        }
    }

    /// Default configuration for HTML
    pub fn html() -> Self {
        Self::with_hints(Hints::HTML)
    }

    /// The dialect selected by the hints
    #[inline]
    pub fn dialect(&self) -> Dialect {
        Dialect::from_hints(self.hints)
    }
}
