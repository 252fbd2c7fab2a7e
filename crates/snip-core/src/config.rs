//! Configuration handling for `<config_dir>/snip/config.json`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    CONFIG_DIR, CONFIG_FILE, DEFAULT_MAX_FILE_SIZE, DEFAULT_ROOT_DIR, DEFAULT_SELECTOR, Result,
    SnipError,
};

/// Where a resolved body is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    #[default]
    Stdout,
    Clipboard,
    Editor,
}

/// How a selected title is turned back into a block body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvePolicy {
    /// Re-query with the title as a literal; several matches are concatenated.
    #[default]
    Title,
    /// Carry the block's file and ordinal through the selector round trip.
    Block,
}

/// User configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root of the snippet corpus
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Descend into hidden files and directories
    #[serde(default)]
    pub include_hidden: bool,

    /// Honour .gitignore files found in the corpus
    #[serde(default)]
    pub respect_gitignore: bool,

    /// Files larger than this (bytes) are skipped
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Interactive selector command line
    #[serde(default = "default_selector")]
    pub selector: Vec<String>,

    /// Extra selector arguments used when titles are sent as `index<TAB>title`
    #[serde(default = "default_selector_index_args")]
    pub selector_index_args: Vec<String>,

    /// Clipboard command reading the body on stdin (platform default when empty)
    #[serde(default)]
    pub clipboard: Vec<String>,

    /// Editor command reading the body on stdin (`$EDITOR -` when empty)
    #[serde(default)]
    pub editor: Vec<String>,

    /// Default output sink
    #[serde(default)]
    pub output: OutputKind,

    /// Default resolution policy
    #[serde(default)]
    pub resolve: ResolvePolicy,
}

fn default_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_ROOT_DIR)
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_selector() -> Vec<String> {
    vec![DEFAULT_SELECTOR.to_string()]
}

fn default_selector_index_args() -> Vec<String> {
    vec!["--delimiter=\t".to_string(), "--with-nth=2..".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            include_hidden: false,
            respect_gitignore: false,
            max_file_size: default_max_file_size(),
            selector: default_selector(),
            selector_index_args: default_selector_index_args(),
            clipboard: Vec::new(),
            editor: Vec::new(),
            output: OutputKind::default(),
            resolve: ResolvePolicy::default(),
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load config from `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| SnipError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.selector.is_empty() {
            return Err(SnipError::Config(
                "selector must name a command".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load(&temp.path().join("nope.json")).unwrap();
        assert_eq!(config.selector, vec!["fzf".to_string()]);
        assert_eq!(config.output, OutputKind::Stdout);
        assert_eq!(config.resolve, ResolvePolicy::Title);
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "root": "/srv/snips", "output": "clipboard", "resolve": "block" }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.root, PathBuf::from("/srv/snips"));
        assert_eq!(config.output, OutputKind::Clipboard);
        assert_eq!(config.resolve, ResolvePolicy::Block);
        assert!(!config.include_hidden);
        assert_eq!(config.selector, vec!["fzf".to_string()]);
    }

    #[test]
    fn test_empty_selector_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, r#"{ "selector": [] }"#).unwrap();

        assert!(matches!(Config::load(&path), Err(SnipError::Config(_))));
    }

    #[test]
    fn test_malformed_json() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "{ root: ").unwrap();

        assert!(matches!(Config::load(&path), Err(SnipError::Json(_))));
    }
}
