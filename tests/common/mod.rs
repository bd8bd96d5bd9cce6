#![allow(dead_code)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prints each argument on its own line, then the status noise calibredb adds.
pub const ECHO_ARGS: &str = r#"for a in "$@"; do echo "$a"; done
echo "Integration status: True""#;

/// A throwaway library folder plus a shell script standing in for calibredb.
pub struct FakeCalibre {
    tmp: TempDir,
    pub tool: PathBuf,
    pub library: PathBuf,
}

impl FakeCalibre {
    pub fn new(body: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let library = tmp.path().join("Calibre Library");
        fs::create_dir_all(&library).expect("create library dir");

        let tool = tmp.path().join("calibredb");
        fs::write(&tool, format!("#!/bin/sh\n{body}\n")).expect("write fake calibredb");
        let mut perms = fs::metadata(&tool).expect("stat fake calibredb").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&tool, perms).expect("chmod fake calibredb");

        Self { tmp, tool, library }
    }

    pub fn dir(&self) -> &Path {
        self.tmp.path()
    }

    pub fn tool_str(&self) -> &str {
        self.tool.to_str().expect("tool path utf8")
    }

    pub fn library_str(&self) -> &str {
        self.library.to_str().expect("library path utf8")
    }

    /// The CLI pointed at this fake through the environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("calibrewrap");
        cmd.env("CALIBREDB_PATH", &self.tool)
            .env("CALIBRE_LIBRARY", &self.library)
            .env("NO_COLOR", "1")
            .env("NO_EMOJI", "1")
            .env_remove("CALIBRE_USERNAME")
            .env_remove("CALIBRE_PASSWORD")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> (i32, serde_json::Value) {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .output()
            .expect("run calibrewrap");
        let code = out.status.code().expect("exit code");
        let v = serde_json::from_slice(&out.stdout).expect("valid json output");
        (code, v)
    }
}
