//! External interactive selector (fzf or anything with the same contract)
//!
//! Titles go to the command's stdin one per line; the chosen line comes back
//! on stdout. Exit status 1 (no match) and 130 (interrupted) mean cancelled.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use snip_core::{Result, Selection, Selector, SnipError};

pub struct CommandSelector {
    argv: Vec<String>,
    index_args: Vec<String>,
}

impl CommandSelector {
    pub fn new(argv: Vec<String>, index_args: Vec<String>) -> Self {
        Self { argv, index_args }
    }

    fn input(titles: &[String], with_index: bool) -> String {
        let mut input = String::new();
        for (i, title) in titles.iter().enumerate() {
            if with_index {
                input.push_str(&format!("{i}\t{title}\n"));
            } else {
                input.push_str(title);
                input.push('\n');
            }
        }
        input
    }

    fn parse(line: &str, with_index: bool) -> Selection {
        if with_index {
            if let Some((index, title)) = line.split_once('\t') {
                if let Ok(index) = index.parse::<usize>() {
                    return Selection::Picked {
                        title: title.to_string(),
                        index: Some(index),
                    };
                }
            }
        }
        Selection::Picked {
            title: line.to_string(),
            index: None,
        }
    }
}

impl Selector for CommandSelector {
    fn select(&mut self, titles: &[String], with_index: bool) -> Result<Selection> {
        let Some((program, args)) = self.argv.split_first() else {
            return Err(SnipError::Selector("no selector command configured".to_string()));
        };

        let mut command = Command::new(program);
        command.args(args);
        if with_index {
            command.args(&self.index_args);
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| SnipError::Selector(format!("failed to start '{program}': {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            let input = Self::input(titles, with_index);
            match stdin.write_all(input.as_bytes()) {
                // The selector may exit before reading everything.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(e) => {
                    drop(stdin);
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(SnipError::Selector(format!(
                        "failed to write titles to '{program}': {e}"
                    )));
                }
                Ok(()) => {}
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| SnipError::Selector(format!("'{program}' did not finish: {e}")))?;

        match output.status.code() {
            Some(0) => {}
            Some(1) | Some(130) | None => {
                tracing::debug!("selector exited with {}", output.status);
                return Ok(Selection::Cancelled);
            }
            Some(code) => {
                return Err(SnipError::Selector(format!(
                    "'{program}' exited with status {code}"
                )));
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.lines().next().unwrap_or("").trim_end_matches('\r');
        if line.is_empty() {
            return Ok(Selection::Cancelled);
        }

        Ok(Self::parse(line, with_index))
    }
}
