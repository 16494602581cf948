// SPDX-License-Identifier: MIT

//! Project identity: the encoded-directory / display-name pair.

use std::fmt;

/// A project the daemon has observed a session for.
///
/// `encoded_dir` is the literal directory name under the projects root
/// (e.g. `-home-alice-app`); `display_name` is the real filesystem path
/// recovered by probing (see `ccvr-adapters::project`), since the encoding
/// (`/` -> `-`) is lossy when directory names themselves contain `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectDescriptor {
    pub encoded_dir: String,
    pub display_name: String,
}

impl ProjectDescriptor {
    pub fn new(encoded_dir: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            encoded_dir: encoded_dir.into(),
            display_name: display_name.into(),
        }
    }
}

impl fmt::Display for ProjectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Encode a working-directory path the way the assistant does: `/` becomes
/// `-`, yielding a leading `-` since the path itself is absolute.
///
/// This is the *encoding* direction. The inverse (decoding) is lossy and
/// requires filesystem probing — see `ccvr-adapters::project::resolve_display_name`.
pub fn encode_project_dir(cwd: &str) -> String {
    cwd.replace('/', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_leading_slash_as_leading_dash() {
        assert_eq!(encode_project_dir("/home/alice/app"), "-home-alice-app");
    }

    #[test]
    fn encodes_dashes_in_path_segments_losslessly_into_more_dashes() {
        // Lossy: "-home-my-app" could have come from "/home/my-app" or
        // "/home-my/app". Resolving this is the job of display-name probing.
        assert_eq!(encode_project_dir("/home/my-app"), "-home-my-app");
    }

    #[test]
    fn display_uses_display_name() {
        let p = ProjectDescriptor::new("-home-alice-app", "/home/alice/app");
        assert_eq!(p.to_string(), "/home/alice/app");
    }
}
