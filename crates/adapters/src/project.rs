// SPDX-License-Identifier: MIT

//! Resolves a project's human-readable display name from its encoded
//! directory name by greedy, longest-prefix filesystem probing.
//!
//! The encoding (`/` -> `-`) is lossy: a real path segment may itself
//! contain dashes, so `-home-user-my-app` could mean `/home/user/my-app`
//! or `/home/user-my/app` or other groupings. We resolve the ambiguity by
//! walking the real filesystem, at each level preferring the longest run
//! of encoded tokens that names an existing child directory, backtracking
//! if that choice leads to a dead end.

use ccvr_core::ProjectDescriptor;
use std::path::{Path, PathBuf};

/// Build a `ProjectDescriptor` for `encoded_dir`, probing the filesystem
/// for its display name. Falls back to the encoded form itself (with
/// dashes restored to slashes) if no real directory resolves — this keeps
/// the daemon narrating sensibly even for a project whose directory has
/// since been removed.
pub fn resolve(encoded_dir: &str) -> ProjectDescriptor {
    let display_name = resolve_absolute_path(encoded_dir)
        .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| fallback_display_name(encoded_dir));

    ProjectDescriptor {
        encoded_dir: encoded_dir.to_string(),
        display_name,
    }
}

fn fallback_display_name(encoded_dir: &str) -> String {
    let restored = encoded_dir.replace('-', "/");
    Path::new(&restored)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| encoded_dir.to_string())
}

/// Resolve `encoded_dir` (e.g. `-home-user-code-my-app`) back to a real
/// absolute path on disk, or `None` if no grouping of the dash-separated
/// tokens names an existing chain of directories from `/`.
fn resolve_absolute_path(encoded_dir: &str) -> Option<PathBuf> {
    let trimmed = encoded_dir.strip_prefix('-')?;
    if trimmed.is_empty() {
        return Some(PathBuf::from("/"));
    }
    let tokens: Vec<&str> = trimmed.split('-').collect();
    probe(Path::new("/"), &tokens, 0)
}

fn probe(current: &Path, tokens: &[&str], start: usize) -> Option<PathBuf> {
    if start == tokens.len() {
        return Some(current.to_path_buf());
    }
    for end in (start + 1..=tokens.len()).rev() {
        let candidate_name = tokens[start..end].join("-");
        let candidate_path = current.join(&candidate_name);
        if candidate_path.is_dir() {
            if let Some(resolved) = probe(&candidate_path, tokens, end) {
                return Some(resolved);
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
