//! Test helpers for CLI end-to-end tests
//!
//! `TestFixture` owns a temp directory holding a snippet corpus under
//! `snippets/` and a `config.json` pointing `snip` at it. The interactive
//! selector is replaced by a plain command (`head`, `sed`, `sh -c ...`).

#![allow(dead_code)]
#![allow(deprecated)] // cargo_bin()

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::path::PathBuf;

pub const DOCKER: &str = "\
# Docker basics
docker ps -a
docker run --rm -it alpine sh
-----
# docker cleanup
docker system prune -af
-----

# Registry
docker login registry.example.com
docker push registry.example.com/app:latest
";

pub struct TestFixture {
    pub dir: TempDir,
    selector: Vec<String>,
    resolve: &'static str,
}

impl TestFixture {
    pub fn new() -> Self {
        let fix = Self {
            dir: TempDir::new().unwrap(),
            selector: vec!["head".into(), "-n".into(), "1".into()],
            resolve: "title",
        };
        fix.dir.child("snippets").create_dir_all().unwrap();
        fix.write_config();
        fix
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("snippets")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    /// Add a snippet file under the corpus root (parent dirs created).
    pub fn add_file(&self, path: &str, content: &str) -> &Self {
        self.dir
            .child("snippets")
            .child(path)
            .write_str(content)
            .unwrap();
        self
    }

    pub fn add_binary(&self, path: &str, bytes: &[u8]) -> &Self {
        self.dir
            .child("snippets")
            .child(path)
            .write_binary(bytes)
            .unwrap();
        self
    }

    /// Use `argv` as the interactive selector.
    pub fn selector(mut self, argv: &[&str]) -> Self {
        self.selector = argv.iter().map(|s| s.to_string()).collect();
        self.write_config();
        self
    }

    /// Pick the n-th title (1-indexed).
    pub fn pick(self, n: usize) -> Self {
        let script = format!("{n}p");
        self.selector(&["sed", "-n", script.as_str()])
    }

    pub fn by_block(mut self) -> Self {
        self.resolve = "block";
        self.write_config();
        self
    }

    fn write_config(&self) {
        let config = serde_json::json!({
            "root": self.root(),
            "selector": self.selector,
            "selector_index_args": [],
            "resolve": self.resolve,
        });
        std::fs::write(self.config_path(), config.to_string()).unwrap();
    }

    /// `snip --config <fixture config> <args...>`
    pub fn snip(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        Command::cargo_bin("snip")
            .unwrap()
            .arg("--config")
            .arg(self.config_path())
            .args(args)
            .assert()
    }

    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.snip(args).success().get_output().stdout.clone();
        String::from_utf8(output).unwrap()
    }
}
