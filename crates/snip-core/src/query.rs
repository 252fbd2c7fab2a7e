//! Typed query values

use crate::{ContentFilter, Result, SnipError};

/// A validated query: a path substring plus a compiled content filter.
#[derive(Debug, Clone)]
pub struct Query {
    path_pattern: String,
    content_pattern: String,
    filter: ContentFilter,
}

impl Query {
    /// Build a query, compiling the content pattern up front.
    ///
    /// Fails with [`SnipError::Usage`] when the path pattern is empty and
    /// with [`SnipError::Pattern`] when the content pattern does not compile.
    pub fn new(
        path_pattern: impl Into<String>,
        content_pattern: impl Into<String>,
    ) -> Result<Self> {
        let path_pattern = path_pattern.into();
        if path_pattern.is_empty() {
            return Err(SnipError::Usage(
                "a file path pattern is required".to_string(),
            ));
        }

        let content_pattern = content_pattern.into();
        let filter = ContentFilter::new(&content_pattern)?;

        Ok(Self {
            path_pattern,
            content_pattern,
            filter,
        })
    }

    pub fn path_pattern(&self) -> &str {
        &self.path_pattern
    }

    pub fn content_pattern(&self) -> &str {
        &self.content_pattern
    }

    pub fn filter(&self) -> &ContentFilter {
        &self.filter
    }
}
