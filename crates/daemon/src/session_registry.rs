// SPDX-License-Identifier: MIT

//! Maps a bare session id (all the hook side-channel gives us) to the
//! project it belongs to, learned from transcript activity. Also caches
//! the encoded-directory-to-project resolution itself, since recovering a
//! project's display name is a greedy filesystem probe over the directory
//! tree (`ccvr_adapters::project::resolve`) and shouldn't be repeated on
//! every tailed batch for the life of a session.
//!
//! Hook event files are named `{sessionId}.jsonl` and carry no encoded
//! project directory (spec §6), so a hook event arriving before any
//! transcript activity for that session cannot be resolved and is dropped.

use std::collections::HashMap;

use ccvr_core::ProjectDescriptor;
use parking_lot::Mutex;

#[derive(Default)]
pub struct SessionRegistry {
    projects: Mutex<HashMap<String, ProjectDescriptor>>,
    resolved: Mutex<HashMap<String, ProjectDescriptor>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&self, session_id: &str, project: &ProjectDescriptor) {
        self.projects.lock().insert(session_id.to_string(), project.clone());
    }

    pub fn lookup(&self, session_id: &str) -> Option<ProjectDescriptor> {
        self.projects.lock().get(session_id).cloned()
    }

    /// Resolve `encoded_dir` to a project, probing the filesystem only the
    /// first time this encoded directory is seen.
    pub fn resolve_project(&self, encoded_dir: &str) -> ProjectDescriptor {
        if let Some(cached) = self.resolved.lock().get(encoded_dir) {
            return cached.clone();
        }
        let project = ccvr_adapters::project::resolve(encoded_dir);
        self.resolved.lock().insert(encoded_dir.to_string(), project.clone());
        project
    }
}

#[cfg(test)]
#[path = "session_registry_tests.rs"]
mod tests;
