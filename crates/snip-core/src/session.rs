//! Two-phase retrieval: list candidate titles, then resolve a pick to a body
//!
//! Phase 1 walks the corpus, segments every matching file and keeps the
//! blocks passing the content filter. An external [`Selector`] picks one
//! title. Phase 2 re-reads the corpus with the same path pattern and finds
//! the block(s) containing that title. Nothing is cached between phases, so
//! a corpus edited in between can legitimately yield [`SnipError::NotFound`].

use serde::Serialize;

use crate::{
    BODY_SEPARATOR, Block, BlockId, ContentFilter, Corpus, Query, ResolvePolicy, Result,
    SnipError,
};

/// A titled candidate produced by phase 1.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    /// Position in the candidate list
    pub index: usize,
    pub block: Block,
}

impl Candidate {
    pub fn title(&self) -> &str {
        self.block.title()
    }
}

/// The body handed to the output sink, and the blocks it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub body: String,
    pub sources: Vec<BlockId>,
}

/// Result of an interactive pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Picked {
        title: String,
        /// Candidate index, when the selector was asked to report one
        index: Option<usize>,
    },
    Cancelled,
}

/// An interactive single-choice picker over an ordered list of titles.
pub trait Selector {
    /// Present `titles` in order and return the user's choice.
    ///
    /// When `with_index` is set the selector should also report the position
    /// of the chosen title, so duplicate titles can be told apart.
    fn select(&mut self, titles: &[String], with_index: bool) -> Result<Selection>;
}

/// How a session ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The query matched no blocks; the selector was never shown.
    Empty,
    Cancelled,
    Resolved(Resolved),
}

/// Phase 1: every block matching `query`, in traversal then in-file order.
pub fn candidates(corpus: &Corpus, query: &Query) -> Vec<Candidate> {
    let filter = query.filter();
    corpus
        .blocks(query.path_pattern())
        .filter(|block| filter.is_match(block.body()))
        .enumerate()
        .map(|(index, block)| Candidate { index, block })
        .collect()
}

/// Phase 1 projected to titles; duplicates are kept.
pub fn titles(corpus: &Corpus, query: &Query) -> Vec<String> {
    candidates(corpus, query)
        .into_iter()
        .map(|c| c.title().to_string())
        .collect()
}

/// Phase 2: find the blocks whose body contains `title` literally.
///
/// Several matches are joined in traversal order with a blank line between
/// them; none is [`SnipError::NotFound`].
pub fn resolve(corpus: &Corpus, path_pattern: &str, title: &str) -> Result<Resolved> {
    let not_found = || SnipError::NotFound {
        title: title.to_string(),
    };
    if title.trim().is_empty() {
        return Err(not_found());
    }

    let filter = ContentFilter::literal(title)?;
    let matches: Vec<Block> = corpus
        .blocks(path_pattern)
        .filter(|block| filter.is_match(block.body()))
        .collect();

    match matches.len() {
        0 => Err(not_found()),
        1 => {
            tracing::debug!("resolved '{}' to a single block", title);
            Ok(join(matches))
        }
        n => {
            tracing::info!("title '{}' matched {} blocks, concatenating", title, n);
            Ok(join(matches))
        }
    }
}

/// Phase 2 by identity: re-read the block at `id` and check it still carries `title`.
///
/// The file must still be one phase 1 would list for `path_pattern`.
pub fn resolve_block(
    corpus: &Corpus,
    path_pattern: &str,
    id: &BlockId,
    title: &str,
) -> Result<Resolved> {
    let not_found = || SnipError::NotFound {
        title: title.to_string(),
    };

    let block = corpus
        .lookup(path_pattern, &id.path)
        .and_then(|file| file.blocks().into_iter().nth(id.ordinal))
        .filter(|block| block.title() == title)
        .ok_or_else(not_found)?;

    Ok(join(vec![block]))
}

fn join(blocks: Vec<Block>) -> Resolved {
    let body = blocks
        .iter()
        .map(Block::body)
        .collect::<Vec<_>>()
        .join(BODY_SEPARATOR);
    let sources = blocks.into_iter().map(|b| b.id().clone()).collect();
    Resolved { body, sources }
}

/// One titles → select → resolve interaction over a fixed query.
#[derive(Debug, Clone)]
pub struct Session {
    corpus: Corpus,
    query: Query,
    policy: ResolvePolicy,
}

impl Session {
    pub fn new(corpus: Corpus, query: Query) -> Self {
        Self {
            corpus,
            query,
            policy: ResolvePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ResolvePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        candidates(&self.corpus, &self.query)
    }

    pub fn titles(&self) -> Vec<String> {
        titles(&self.corpus, &self.query)
    }

    /// Resolve a title with this session's path pattern.
    pub fn resolve(&self, title: &str) -> Result<Resolved> {
        resolve(&self.corpus, self.query.path_pattern(), title)
    }

    /// Run the full session against `selector`.
    pub fn run(&self, selector: &mut dyn Selector) -> Result<Outcome> {
        let candidates = self.candidates();
        if candidates.is_empty() {
            tracing::info!(
                "no snippets match path '{}' and content '{}'",
                self.query.path_pattern(),
                self.query.content_pattern()
            );
            return Ok(Outcome::Empty);
        }

        let titles: Vec<String> = candidates.iter().map(|c| c.title().to_string()).collect();
        let by_block = self.policy == ResolvePolicy::Block;

        let (title, index) = match selector.select(&titles, by_block)? {
            Selection::Cancelled => return Ok(Outcome::Cancelled),
            Selection::Picked { title, index } => (title, index),
        };

        let resolved = match index.and_then(|i| candidates.get(i)) {
            Some(candidate) if by_block => resolve_block(
                &self.corpus,
                self.query.path_pattern(),
                candidate.block.id(),
                &title,
            )?,
            _ => self.resolve(&title)?,
        };

        Ok(Outcome::Resolved(resolved))
    }
}
