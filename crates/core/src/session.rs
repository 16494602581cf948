// SPDX-License-Identifier: MIT

//! The session key: `"{encodedDir}:{sessionId}"`, used to index all
//! per-session state (suppression flags, summarizer buffers, history).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(encoded_dir: &str, session_id: &str) -> Self {
        Self(format!("{encoded_dir}:{session_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SessionKey> for String {
    fn from(key: SessionKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_encoded_dir_colon_session_id() {
        let key = SessionKey::new("-p-app", "s1");
        assert_eq!(key.as_str(), "-p-app:s1");
        assert_eq!(key.to_string(), "-p-app:s1");
    }

    #[test]
    fn equal_parts_produce_equal_keys() {
        assert_eq!(SessionKey::new("-p-app", "s1"), SessionKey::new("-p-app", "s1"));
        assert_ne!(SessionKey::new("-p-app", "s1"), SessionKey::new("-p-app", "s2"));
    }
}
