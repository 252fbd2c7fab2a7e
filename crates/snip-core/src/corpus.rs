//! Corpus loading: walk the snippet root and read matching files

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::{Block, Config, DEFAULT_MAX_FILE_SIZE, segment};

/// A snippet file and its raw text.
#[derive(Debug, Clone)]
pub struct SnippetFile {
    pub path: PathBuf,
    pub text: String,
}

impl SnippetFile {
    /// Split the file into blocks.
    pub fn blocks(&self) -> Vec<Block> {
        segment::segment(&self.path, &self.text)
    }
}

/// A directory tree of snippet files, re-read on every query.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    include_hidden: bool,
    respect_gitignore: bool,
    max_file_size: u64,
}

impl Corpus {
    /// Create a corpus rooted at `root` with default walk settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_hidden: false,
            respect_gitignore: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Create a corpus from the root and walk settings in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.root.clone(),
            include_hidden: config.include_hidden,
            respect_gitignore: config.respect_gitignore,
            max_file_size: config.max_file_size,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate regular files whose absolute path contains `path_pattern`.
    ///
    /// Entries are visited in file-name order, so the sequence is stable for
    /// an unchanged tree. Unreadable directories are logged and skipped.
    pub fn enumerate<'a>(&self, path_pattern: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        let root = match self.root.canonicalize() {
            Ok(root) => Some(root),
            Err(err) => {
                tracing::warn!("snippet root {} unavailable: {}", self.root.display(), err);
                None
            }
        };

        let max_file_size = self.max_file_size;
        let walker = root.map(|root| {
            WalkBuilder::new(root)
                .hidden(!self.include_hidden)
                .git_ignore(self.respect_gitignore)
                .git_global(self.respect_gitignore)
                .git_exclude(self.respect_gitignore)
                .ignore(self.respect_gitignore)
                .parents(self.respect_gitignore)
                .require_git(false)
                .sort_by_file_name(|a, b| a.cmp(b))
                .build()
        });

        walker
            .into_iter()
            .flatten()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .filter(move |entry| entry.path().to_string_lossy().contains(path_pattern))
            .filter(move |entry| match entry.metadata() {
                Ok(meta) if meta.len() > max_file_size => {
                    tracing::debug!(
                        "skipping {}: {} bytes exceeds limit",
                        entry.path().display(),
                        meta.len()
                    );
                    false
                }
                _ => true,
            })
            .map(ignore::DirEntry::into_path)
    }

    /// Read every matching file; files that cannot be read are skipped.
    pub fn load<'a>(&self, path_pattern: &'a str) -> impl Iterator<Item = SnippetFile> + 'a {
        self.enumerate(path_pattern).filter_map(|path| read(&path))
    }

    /// Read `path` only if [`Corpus::enumerate`] would yield it for `path_pattern`.
    pub fn lookup(&self, path_pattern: &str, path: &Path) -> Option<SnippetFile> {
        if !self.enumerate(path_pattern).any(|p| p == path) {
            tracing::debug!("{} is not part of the corpus query", path.display());
            return None;
        }
        read(path)
    }

    /// Every block of every matching file, in traversal then in-file order.
    pub fn blocks<'a>(&self, path_pattern: &'a str) -> impl Iterator<Item = Block> + 'a {
        self.load(path_pattern).flat_map(|file| file.blocks())
    }
}

/// Read one snippet file, logging and returning `None` on failure.
pub fn read(path: &Path) -> Option<SnippetFile> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(SnippetFile {
            path: path.to_path_buf(),
            text,
        }),
        Err(err) => {
            tracing::warn!("skipping {}: {}", path.display(), err);
            None
        }
    }
}
