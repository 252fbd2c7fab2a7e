//! Block segmentation
//!
//! A snippet file is a sequence of records separated by delimiter lines
//! (a line that is exactly [`BLOCK_DELIMITER`]). Each record, with its
//! leading and trailing blank lines removed, is one block. Records that
//! contain only blank lines are dropped.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::BLOCK_DELIMITER;

/// Stable identity of a block: its file and its position within that file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BlockId {
    /// Absolute path of the file holding the block
    pub path: PathBuf,
    /// Position among the non-empty blocks of the file (0-indexed)
    pub ordinal: usize,
}

/// A non-empty, delimiter-bounded span of one snippet file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    id: BlockId,
    start_line: usize,
    title: String,
    body: String,
}

impl Block {
    fn new(path: &Path, ordinal: usize, start_line: usize, body: String) -> Self {
        Self {
            id: BlockId {
                path: path.to_path_buf(),
                ordinal,
            },
            start_line,
            title: title_of(&body).to_string(),
            body,
        }
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.id.path
    }

    pub fn ordinal(&self) -> usize {
        self.id.ordinal
    }

    /// Line number of the first body line in the file (1-indexed)
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// First non-blank line of the body, trimmed
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Block text without surrounding blank lines
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Derive the display title of a body: its first non-blank line, trimmed.
pub fn title_of(body: &str) -> &str {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// Whether `line` (without its terminator) separates two blocks.
pub fn is_delimiter(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == BLOCK_DELIMITER
}

/// Split file text into blocks, in order of appearance.
pub fn segment(path: &Path, text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut record: Vec<&str> = Vec::new();
    let mut record_start = 1;

    for (i, line) in text.lines().enumerate() {
        if is_delimiter(line) {
            push_record(path, &record, record_start, &mut blocks);
            record.clear();
            record_start = i + 2;
        } else {
            record.push(line.strip_suffix('\r').unwrap_or(line));
        }
    }
    push_record(path, &record, record_start, &mut blocks);

    blocks
}

fn push_record(path: &Path, lines: &[&str], first_line: usize, blocks: &mut Vec<Block>) {
    let is_blank = |line: &&str| line.trim().is_empty();

    let Some(start) = lines.iter().position(|l| !is_blank(l)) else {
        return;
    };
    let end = lines
        .iter()
        .rposition(|l| !is_blank(l))
        .map_or(start, |i| i + 1);

    let body = lines[start..end].join("\n").trim_end().to_string();
    blocks.push(Block::new(path, blocks.len(), first_line + start, body));
}
