//! Common utilities for integration tests

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use zip::write::FileOptions;
use zip::ZipWriter;

pub fn ziplift_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ziplift"));
    cmd.env_remove("GITHUB_TOKEN");
    cmd.env("RUST_LOG", "off");
    cmd
}

/// Build an in-memory ZIP; names ending in `/` become directory entries
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, FileOptions::default()).unwrap();
        } else {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Isolated working directory with a config file and an archive
pub struct TestContext {
    pub temp: TempDir,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    /// Write `config.yaml` with the given YAML body and return its path
    pub fn config(&self, yaml: &str) -> PathBuf {
        let file = self.temp.child("config.yaml");
        file.write_str(yaml).unwrap();
        file.to_path_buf()
    }

    /// Write `upload.zip` and return its path
    pub fn archive(&self, entries: &[(&str, &[u8])]) -> PathBuf {
        let file = self.temp.child("upload.zip");
        file.write_binary(&build_zip(entries)).unwrap();
        file.to_path_buf()
    }
}
