//! snip CLI: pick a snippet from a directory of text files

mod selector;
mod sink;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use snip_core::{Config, Corpus, OutputKind, Outcome, Query, ResolvePolicy, Session, SnipError};

use crate::selector::CommandSelector;

/// Exit status for a missing or malformed argument.
const EXIT_USAGE: u8 = 1;
/// Exit status for a content pattern that does not compile.
const EXIT_PATTERN: u8 = 2;

#[derive(Parser)]
#[command(name = "snip")]
#[command(about = "Pick a snippet from a directory of text files", long_about = None)]
#[command(version)]
struct Cli {
    /// Substring matched against each snippet file's path
    path_pattern: Option<String>,

    /// Case-insensitive pattern matched against snippet contents
    content_pattern: Option<String>,

    #[command(flatten)]
    mode: Mode,

    #[command(flatten)]
    options: Options,
}

/// Run one phase on its own instead of a full interactive session.
#[derive(Args)]
#[group(multiple = false)]
struct Mode {
    /// List candidate titles without picking
    #[arg(long)]
    titles: bool,

    /// Print the snippet(s) containing TITLE, matched literally
    #[arg(long, value_name = "TITLE", conflicts_with = "content_pattern")]
    resolve: Option<String>,

    /// Show the effective configuration
    #[arg(long)]
    show_config: bool,
}

#[derive(Args)]
struct Options {
    /// Snippet directory (overrides the config file)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Config file (default: <config dir>/snip/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to send the picked snippet
    #[arg(short, long, value_enum)]
    output: Option<Output>,

    /// Resolve the pick by its file and position instead of by title
    #[arg(long)]
    by_block: bool,

    /// Never colour snippet output
    #[arg(long)]
    no_color: bool,

    /// Print candidates as JSON (with --titles)
    #[arg(long, requires = "titles")]
    json: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Output {
    Stdout,
    Clipboard,
    Editor,
}

impl From<Output> for OutputKind {
    fn from(output: Output) -> Self {
        match output {
            Output::Stdout => OutputKind::Stdout,
            Output::Clipboard => OutputKind::Clipboard,
            Output::Editor => OutputKind::Editor,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are reported through clap errors too
            return if err.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            match err.downcast_ref::<SnipError>() {
                Some(SnipError::Pattern { .. }) => ExitCode::from(EXIT_PATTERN),
                _ => ExitCode::from(EXIT_USAGE),
            }
        }
    }
}

/// Logs go to stderr so stdout only ever carries snippet text.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if cli.mode.show_config {
        return cmd_config(&load_config(&cli.options)?);
    }

    let Some(path_pattern) = cli.path_pattern else {
        return Err(SnipError::Usage(
            "missing PATH_PATTERN; run 'snip --help' for usage".to_string(),
        )
        .into());
    };

    let config = load_config(&cli.options)?;
    let color = !cli.options.no_color;
    let content_pattern = cli.content_pattern.unwrap_or_default();

    if let Some(title) = cli.mode.resolve {
        cmd_resolve(&config, path_pattern, &title, color)
    } else if cli.mode.titles {
        cmd_titles(&config, path_pattern, content_pattern, cli.options.json)
    } else {
        cmd_pick(&config, path_pattern, content_pattern, color)
    }
}

/// Load the config file, then apply command-line overrides.
fn load_config(options: &Options) -> Result<Config> {
    let mut config = match &options.config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            Config::load(path)
        }
        None => Config::load_default(),
    }
    .context("Failed to load configuration")?;

    if let Some(root) = &options.root {
        config.root = root.clone();
    }
    if let Some(output) = options.output {
        config.output = output.into();
    }
    if options.by_block {
        config.resolve = ResolvePolicy::Block;
    }

    tracing::debug!("snippet root: {}", config.root.display());
    Ok(config)
}

fn cmd_pick(
    config: &Config,
    path_pattern: String,
    content_pattern: String,
    color: bool,
) -> Result<()> {
    let query = Query::new(path_pattern, content_pattern)?;
    let session = Session::new(Corpus::from_config(config), query).with_policy(config.resolve);

    let mut selector =
        CommandSelector::new(config.selector.clone(), config.selector_index_args.clone());

    let resolved = match session.run(&mut selector) {
        Ok(Outcome::Resolved(resolved)) => resolved,
        Ok(Outcome::Empty) => {
            eprintln!("No snippets found for: {}", session.query().path_pattern());
            return Ok(());
        }
        Ok(Outcome::Cancelled) => return Ok(()),
        Err(SnipError::NotFound { title }) => {
            eprintln!("No snippet found for: {title}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    sink::for_kind(config.output, config, color).write(&resolved)
}

fn cmd_titles(
    config: &Config,
    path_pattern: String,
    content_pattern: String,
    json: bool,
) -> Result<()> {
    let query = Query::new(path_pattern, content_pattern)?;
    let session = Session::new(Corpus::from_config(config), query);

    if json {
        let candidates = session.candidates();
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    } else {
        for title in session.titles() {
            println!("{title}");
        }
    }

    Ok(())
}

fn cmd_resolve(config: &Config, path_pattern: String, title: &str, color: bool) -> Result<()> {
    let query = Query::new(path_pattern, "")?;
    let session = Session::new(Corpus::from_config(config), query);

    match session.resolve(title) {
        Ok(resolved) => sink::for_kind(config.output, config, color).write(&resolved),
        Err(SnipError::NotFound { title }) => {
            eprintln!("No snippet found for: {title}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn cmd_config(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_session_args() {
        let cli = Cli::try_parse_from(["snip", "docker", "prune", "-o", "clipboard"]).unwrap();
        assert_eq!(cli.path_pattern.as_deref(), Some("docker"));
        assert_eq!(cli.content_pattern.as_deref(), Some("prune"));
        assert!(matches!(cli.options.output, Some(Output::Clipboard)));
        assert!(!cli.mode.titles);
    }

    #[test]
    fn test_mode_words_are_path_patterns() {
        for word in ["config", "titles", "resolve"] {
            let cli = Cli::try_parse_from(["snip", word]).unwrap();
            assert_eq!(cli.path_pattern.as_deref(), Some(word));
            assert!(!cli.mode.show_config && !cli.mode.titles && cli.mode.resolve.is_none());
        }
    }

    #[test]
    fn test_titles_flag_with_options() {
        let cli = Cli::try_parse_from([
            "snip", "docker", "--titles", "--root", "/srv/snips", "--json",
        ])
        .unwrap();
        assert_eq!(cli.path_pattern.as_deref(), Some("docker"));
        assert!(cli.mode.titles);
        assert!(cli.options.json);
        assert_eq!(cli.options.root, Some(PathBuf::from("/srv/snips")));
    }

    #[test]
    fn test_modes_are_exclusive() {
        assert!(Cli::try_parse_from(["snip", "docker", "--titles", "--resolve", "x"]).is_err());
        assert!(Cli::try_parse_from(["snip", "docker", "--json"]).is_err());
        assert!(Cli::try_parse_from(["snip", "docker", "ps", "--resolve", "x"]).is_err());
    }
}
