//! Content filtering over block bodies

use regex::{Regex, RegexBuilder};

use crate::{Block, Result, SnipError};

/// A compiled matcher over whole block bodies.
///
/// User patterns are case-insensitive; literal lookups match exactly.
/// An empty pattern compiles to a filter that passes every block.
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    regex: Option<Regex>,
}

impl ContentFilter {
    /// Compile a user-supplied pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::compile(pattern, pattern, true)
    }

    /// Match `text` as a case-sensitive literal substring; metacharacters
    /// carry no meaning.
    pub fn literal(text: &str) -> Result<Self> {
        Self::compile(&regex::escape(text), text, false)
    }

    fn compile(pattern: &str, original: &str, case_insensitive: bool) -> Result<Self> {
        if pattern.is_empty() {
            return Ok(Self::default());
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .multi_line(true)
            .build()
            .map_err(|source| SnipError::Pattern {
                pattern: original.to_string(),
                source,
            })?;

        Ok(Self { regex: Some(regex) })
    }

    pub fn matches_all(&self) -> bool {
        self.regex.is_none()
    }

    pub fn is_match(&self, body: &str) -> bool {
        self.regex.as_ref().is_none_or(|re| re.is_match(body))
    }

    /// Keep the blocks whose body matches, preserving order.
    pub fn filter(&self, blocks: Vec<Block>) -> Vec<Block> {
        if self.matches_all() {
            return blocks;
        }
        blocks.into_iter().filter(|b| self.is_match(b.body())).collect()
    }
}
