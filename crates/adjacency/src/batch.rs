//! Batch verification over a directory of dense table files.

use crate::constants::{EXIT_BAD_DATA, EXIT_MISMATCH, EXIT_OK};
use crate::error::{AdjacencyError, Result};
use crate::verify::{verify_bounds_file, verify_csv_file};

use log::{error, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Which single-file check a batch runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// Data-correctness checks only
    Csv,
    /// Data checks plus closed-form bounds comparison
    #[default]
    Bounds,
}

impl CheckKind {
    /// Name of the binary that runs this check on one file
    pub fn verifier_name(self) -> &'static str {
        match self {
            CheckKind::Csv => "verify_csv",
            CheckKind::Bounds => "verify_bounds",
        }
    }

    /// Runs the check in-process and maps the outcome to the verifier's exit code
    pub fn exit_code(self, path: &Path, show: bool, max_show: usize) -> i32 {
        match self {
            CheckKind::Csv => match verify_csv_file(path) {
                Ok(_) => {
                    info!("verification passed (data correctness)");
                    EXIT_OK
                }
                Err(e) => {
                    error!("ERROR: {e}");
                    EXIT_BAD_DATA
                }
            },
            CheckKind::Bounds => match verify_bounds_file(path) {
                Ok(report) => {
                    report.log_summary(show, max_show);
                    if report.is_clean() { EXIT_OK } else { EXIT_MISMATCH }
                }
                Err(e) => {
                    error!("ERROR reading file: {e}");
                    EXIT_BAD_DATA
                }
            },
        }
    }
}

/// Verifies one file and reports the verifier's exit code
pub trait FileVerifier {
    fn verify(&self, path: &Path) -> Result<i32>;
}

/// Runs a verifier binary as a child process, one per file
#[derive(Debug, Clone)]
pub struct SubprocessVerifier {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl SubprocessVerifier {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Verifier binary for `check` next to the running executable
    pub fn sibling_of_current_exe(check: CheckKind) -> Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        let program = dir.join(format!("{}{}", check.verifier_name(), std::env::consts::EXE_SUFFIX));
        Ok(Self::new(program))
    }
}

impl FileVerifier for SubprocessVerifier {
    fn verify(&self, path: &Path) -> Result<i32> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|source| AdjacencyError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;
        // killed by a signal
        Ok(status.code().unwrap_or(-1))
    }
}

/// Runs the check inside the current process
#[derive(Debug, Clone, Copy)]
pub struct InProcessVerifier {
    pub check: CheckKind,
    pub show: bool,
    pub max_show: usize,
}

impl FileVerifier for InProcessVerifier {
    fn verify(&self, path: &Path) -> Result<i32> {
        Ok(self.check.exit_code(path, self.show, self.max_show))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub passed: Vec<PathBuf>,
    /// failing files with the verifier's exit code
    pub failed: Vec<(PathBuf, i32)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn log_summary(&self) {
        info!("{}", "=".repeat(72));
        info!("BATCH VERIFICATION SUMMARY");
        info!("{}", "=".repeat(72));
        info!("Total checked : {}", self.total());
        info!("Passed        : {}", self.passed.len());
        info!("Failed        : {}", self.failed.len());

        if self.all_passed() {
            info!("All files passed verification.");
            return;
        }
        error!("FAILED FILES:");
        for (path, code) in &self.failed {
            error!("  {}  (exit={code})", path.display());
        }
    }
}

/// Lists the table files in `dir` with the given extension, sorted by path
///
/// # Errors
/// Returns error if `dir` is not a directory or holds no matching file.
pub fn find_table_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(AdjacencyError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(AdjacencyError::NoTableFiles {
            path: dir.to_path_buf(),
        });
    }
    files.sort();
    Ok(files)
}

/// Verifies every file, continuing past failures
pub fn run_batch(files: &[PathBuf], verifier: &dyn FileVerifier) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    for path in files {
        info!("{}", "=".repeat(72));
        info!("Checking {}", path.display());
        let code = verifier.verify(path)?;
        if code == EXIT_OK {
            summary.passed.push(path.clone());
        } else {
            summary.failed.push((path.clone(), code));
        }
    }
    Ok(summary)
}
