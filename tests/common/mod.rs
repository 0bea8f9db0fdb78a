// Shared helpers for integration tests.
//
// Provides a pair of temporary source/destination trees and a fluent builder
// so each integration test can lay out manifests and dotfiles without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dotinst::commands::install::{self, InstallOptions, RunSummary};
use dotinst::logging::Log;
use dotinst::operations::SystemFileSystemOps;
use dotinst::platform::Platform;

/// A [`Log`] that discards everything.
#[derive(Debug, Default)]
pub struct QuietLog;

impl Log for QuietLog {
    fn stage(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn debug(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Isolated source and destination trees backed by [`tempfile::TempDir`].
///
/// Both directories are deleted when the context is dropped.
pub struct IntegrationTestContext {
    /// Tree holding manifests and the files they name.
    pub source: tempfile::TempDir,
    /// Tree the links are created in.
    pub dest: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a context with two empty trees.
    pub fn new() -> Self {
        Self {
            source: tempfile::tempdir().expect("create source dir"),
            dest: tempfile::tempdir().expect("create dest dir"),
        }
    }

    /// Options pointing the installer at this context's trees.
    pub fn options(&self) -> InstallOptions {
        InstallOptions::resolve(self.source.path(), self.source.path(), self.dest.path())
    }

    /// Absolute path of `rel` inside the source tree.
    pub fn source_path(&self, rel: &str) -> PathBuf {
        self.options().source.join(rel)
    }

    /// Absolute path of `rel` inside the destination tree.
    pub fn dest_path(&self, rel: &str) -> PathBuf {
        self.options().dest.join(rel)
    }

    /// Run the installer for `platform` against the real filesystem.
    pub fn run(&self, platform: &str) -> anyhow::Result<RunSummary> {
        install::run(
            &self.options(),
            &Platform::new(platform),
            &SystemFileSystemOps,
            &QuietLog,
        )
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a context with empty trees.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write `dotinst.json` with `content` into directory `dir` of the source tree.
    pub fn with_manifest(self, dir: &str, content: &str) -> Self {
        let path = self.ctx.source.path().join(dir).join("dotinst.json");
        write_file(&path, content);
        self
    }

    /// Create a source file at `rel` in the source tree.
    pub fn with_source_file(self, rel: &str) -> Self {
        write_file(&self.ctx.source.path().join(rel), rel);
        self
    }

    /// Create a file at `rel` in the destination tree, as if left by an
    /// earlier install or by hand.
    pub fn with_dest_file(self, rel: &str, content: &str) -> Self {
        write_file(&self.ctx.dest.path().join(rel), content);
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}
