// SPDX-License-Identifier: MIT

//! Pure, synchronous tailing logic: no tokio, no notify. This is the part
//! spec §8's invariants are about, and the part tests exercise directly
//! without needing real filesystem-event timing.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Result of reading a file's growth since `tracked_offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailStep {
    /// Newly completed, non-empty lines, in file order, newline stripped.
    pub lines: Vec<String>,
    /// The offset to track going forward.
    pub new_offset: u64,
    /// Whether the file shrank below `tracked_offset` (truncation).
    pub truncated: bool,
}

/// Read everything newly appended to `path` since `tracked_offset`.
///
/// - If the file has shrunk below `tracked_offset`, this is a truncation:
///   the offset resets to the new (smaller) size and nothing is emitted.
/// - If the file hasn't grown, nothing is emitted and the offset is
///   unchanged.
/// - Otherwise, bytes from `tracked_offset` to EOF are split on `\n`; only
///   complete lines (terminated by `\n` in this read) are emitted, and the
///   offset advances by exactly the number of bytes consumed by those
///   complete lines. Any trailing partial line is left for the next read.
pub fn read_increment(path: &Path, tracked_offset: u64) -> io::Result<TailStep> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();

    if len < tracked_offset {
        return Ok(TailStep {
            lines: Vec::new(),
            new_offset: len,
            truncated: true,
        });
    }
    if len == tracked_offset {
        return Ok(TailStep {
            lines: Vec::new(),
            new_offset: tracked_offset,
            truncated: false,
        });
    }

    file.seek(SeekFrom::Start(tracked_offset))?;
    let mut buf = Vec::with_capacity((len - tracked_offset) as usize);
    file.read_to_end(&mut buf)?;

    let mut lines = Vec::new();
    let mut consumed: usize = 0;
    let mut start: usize = 0;
    for (i, &byte) in buf.iter().enumerate() {
        if byte == b'\n' {
            let raw = &buf[start..i];
            if !raw.is_empty() {
                lines.push(String::from_utf8_lossy(raw).into_owned());
            }
            start = i + 1;
            consumed = start;
        }
    }

    Ok(TailStep {
        lines,
        new_offset: tracked_offset + consumed as u64,
        truncated: false,
    })
}

/// Recursively find `.jsonl` files under `root`, to a maximum depth
/// (depth 1 = direct children of `root`). Missing directories yield an
/// empty list rather than an error — a missing projects directory is not
/// fatal (spec §4.1).
pub fn find_jsonl_files(root: &Path, max_depth: usize) -> Vec<std::path::PathBuf> {
    let mut found = Vec::new();
    walk(root, max_depth, &mut found);
    found
}

fn walk(dir: &Path, depth_remaining: usize, found: &mut Vec<std::path::PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            if depth_remaining > 0 {
                walk(&path, depth_remaining - 1, found);
            }
        } else if file_type.is_file() && path.extension().is_some_and(|ext| ext == "jsonl") {
            found.push(path);
        }
    }
}

/// Whether `path` is a sub-agent transcript: does any path component equal
/// the literal segment `subagents`?
pub fn is_subagent(path: &Path) -> bool {
    path.components().any(|c| c.as_os_str() == "subagents")
}

/// The first path segment under `projects_dir` (the encoded project
/// directory name).
pub fn extract_project_dir(path: &Path, projects_dir: &Path) -> Option<String> {
    let rel = path.strip_prefix(projects_dir).ok()?;
    rel.components()
        .next()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
}

/// The session uuid: for a main-session file, the basename stem
/// (`<uuid>.jsonl`); for a sub-agent file, the path segment immediately
/// preceding the `subagents` segment.
pub fn extract_session_id(path: &Path, projects_dir: &Path) -> Option<String> {
    let rel = path.strip_prefix(projects_dir).ok()?;
    let components: Vec<&std::ffi::OsStr> = rel.components().map(|c| c.as_os_str()).collect();

    if let Some(idx) = components.iter().position(|c| *c == "subagents") {
        // .../<project>/<session-uuid>/subagents/<agentId>.jsonl
        if idx == 0 {
            return None;
        }
        return Some(components[idx - 1].to_string_lossy().into_owned());
    }

    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

#[cfg(test)]
#[path = "pure_tests.rs"]
mod tests;
