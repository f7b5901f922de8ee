//! Filesystem utilities.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{glob_with, MatchOptions, Pattern};

/// Depth budget sentinel meaning "no depth limit".
pub const UNLIMITED_DEPTH: i32 = -1;

/// Default depth budget for pattern-declared sources.
pub const DEFAULT_SCAN_DEPTH: i32 = 5;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Shell-style matching: wildcards never match a leading dot.
fn match_options() -> MatchOptions {
    MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::default()
    }
}

/// Anchor `pattern` in `dir`. An empty `dir` means the working directory.
fn dir_pattern(dir: &Path, pattern: &str) -> String {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    format!("{}/{}", Pattern::escape(&dir.to_string_lossy()), pattern)
}

/// Glob `pattern` directly inside `dir`, returning matches in alphabetical order.
fn glob_in(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = dir_pattern(dir, pattern);

    let mut results = Vec::new();
    for entry in glob_with(&full_pattern, match_options())
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
    {
        match entry {
            Ok(path) => results.push(path),
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }
    Ok(results)
}

/// List the immediate, non-hidden subdirectories of `dir`.
pub fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(glob_in(dir, "*")?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect())
}

/// Compute the next depth budget after a directory revealed `found` subdirectories.
///
/// The budget moves by `found - 2`, so wide levels count down slower than
/// narrow ones. Anything below [`UNLIMITED_DEPTH`] clamps to it, and once
/// the budget is unlimited it stays that way.
pub fn next_depth_budget(budget: i32, found: usize) -> i32 {
    if budget == UNLIMITED_DEPTH {
        return budget;
    }
    let found = i32::try_from(found).unwrap_or(i32::MAX);
    budget
        .saturating_add(found)
        .saturating_sub(2)
        .max(UNLIMITED_DEPTH)
}

/// Breadth-first glob bounded by a depth budget.
///
/// Each directory popped from the frontier contributes the files matching
/// `pattern` directly inside it. While the budget is nonzero its
/// subdirectories are queued as well and the budget is adjusted with
/// [`next_depth_budget`]. A budget of `0` scans `root` only.
pub fn bounded_glob(root: &Path, pattern: &str, depth: i32) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    let mut frontier = VecDeque::from([root.to_path_buf()]);
    let mut budget = depth;

    while let Some(folder) = frontier.pop_front() {
        matches.extend(glob_in(&folder, pattern)?.into_iter().filter(|p| p.is_file()));

        if budget != 0 {
            let more = subdirectories(&folder)?;
            budget = next_depth_budget(budget, more.len());
            tracing::trace!(
                "scanned {}: {} subdirectories, budget now {}",
                folder.display(),
                more.len(),
                budget
            );
            frontier.extend(more);
        }
    }

    Ok(matches)
}
