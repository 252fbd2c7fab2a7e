//! Output sinks for a resolved snippet body

use std::io::{IsTerminal, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use snip_core::{Config, OutputKind, Resolved};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};

/// Syntax used when a snippet file has no recognisable extension.
const FALLBACK_EXTENSION: &str = "sh";

pub trait Sink {
    fn write(&mut self, resolved: &Resolved) -> Result<()>;
}

/// Build the sink for `kind`, using commands from `config` when set.
pub fn for_kind(kind: OutputKind, config: &Config, color: bool) -> Box<dyn Sink> {
    match kind {
        OutputKind::Stdout => {
            let highlighter =
                (color && std::io::stdout().is_terminal()).then(SyntaxHighlighter::new);
            Box::new(StdoutSink { highlighter })
        }
        OutputKind::Clipboard => Box::new(PipeSink {
            name: "clipboard",
            argv: or_default(&config.clipboard, default_clipboard),
        }),
        OutputKind::Editor => Box::new(PipeSink {
            name: "editor",
            argv: or_default(&config.editor, default_editor),
        }),
    }
}

fn or_default(configured: &[String], fallback: fn() -> Vec<String>) -> Vec<String> {
    if configured.is_empty() {
        fallback()
    } else {
        configured.to_vec()
    }
}

fn default_clipboard() -> Vec<String> {
    let argv: &[&str] = if cfg!(target_os = "macos") {
        &["pbcopy"]
    } else if cfg!(windows) {
        &["clip"]
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        &["wl-copy"]
    } else {
        &["xclip", "-selection", "clipboard"]
    };
    argv.iter().map(|s| s.to_string()).collect()
}

fn default_editor() -> Vec<String> {
    let editor = std::env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string());
    let mut argv: Vec<String> = editor.split_whitespace().map(str::to_string).collect();
    argv.push("-".to_string());
    argv
}

/// Print the body, highlighted when writing to a terminal.
pub struct StdoutSink {
    highlighter: Option<SyntaxHighlighter>,
}

impl Sink for StdoutSink {
    fn write(&mut self, resolved: &Resolved) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        match &self.highlighter {
            Some(highlighter) => {
                let extension = resolved
                    .sources
                    .first()
                    .map_or(FALLBACK_EXTENSION, |id| extension_of(&id.path));
                writeln!(stdout, "{}", highlighter.highlight(&resolved.body, extension))?;
            }
            None => writeln!(stdout, "{}", resolved.body)?,
        }
        Ok(())
    }
}

/// Feed the body to a command on its stdin (clipboard tool, editor).
pub struct PipeSink {
    name: &'static str,
    argv: Vec<String>,
}

impl Sink for PipeSink {
    fn write(&mut self, resolved: &Resolved) -> Result<()> {
        let Some((program, args)) = self.argv.split_first() else {
            bail!("no {} command configured", self.name);
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start {} command '{}'", self.name, program))?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(resolved.body.as_bytes()),
            None => Ok(()),
        };
        if let Err(err) = written {
            // Reap the child before reporting; it may still be running.
            let _ = child.kill();
            let status = child.wait()?;
            return Err(err)
                .with_context(|| format!("failed to write to '{program}' ({status})"));
        }

        let status = child.wait()?;
        if !status.success() {
            bail!("{} command '{}' exited with {}", self.name, program, status);
        }
        tracing::debug!("sent {} bytes to {}", resolved.body.len(), self.name);
        Ok(())
    }
}

/// Wrapper around syntect for syntax highlighting.
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    pub fn highlight(&self, code: &str, extension: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(extension)
            .or_else(|| self.syntax_set.find_syntax_by_extension(FALLBACK_EXTENSION))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = &self.theme_set.themes["base16-ocean.dark"];
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false)),
                Err(_) => output.push_str(line),
            }
        }
        output.push_str("\x1b[0m");

        output
    }
}

/// Extension of a snippet path, for picking a syntax.
pub fn extension_of(path: &Path) -> &str {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or(FALLBACK_EXTENSION)
}
