/// A line consisting solely of this text separates two blocks in a snippet file.
pub const BLOCK_DELIMITER: &str = "-----";

/// Directory under the user's home holding snippets when no root is configured
pub const DEFAULT_ROOT_DIR: &str = ".snippets";

/// Application directory under the platform config dir
pub const CONFIG_DIR: &str = "snip";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.json";

/// Default max file size (1MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Default interactive selector
pub const DEFAULT_SELECTOR: &str = "fzf";

/// Separator placed between bodies when one title resolves to several blocks
pub const BODY_SEPARATOR: &str = "\n\n";
