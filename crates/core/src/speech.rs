// SPDX-License-Identifier: MIT

//! The speech queue's item type.

use crate::project::ProjectDescriptor;
use crate::session::SessionKey;

/// One message waiting to be (or having been) spoken.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechItem {
    pub message: String,
    pub project: Option<ProjectDescriptor>,
    pub session: Option<SessionKey>,
    /// Opaque tag used by `cancelByTag`; the orchestrator uses
    /// `"notification:{sessionKey}"`.
    pub cancel_tag: Option<String>,
}

impl SpeechItem {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            project: None,
            session: None,
            cancel_tag: None,
        }
    }

    pub fn with_project(mut self, project: ProjectDescriptor) -> Self {
        self.project = Some(project);
        self
    }

    pub fn with_session(mut self, session: SessionKey) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_cancel_tag(mut self, tag: impl Into<String>) -> Self {
        self.cancel_tag = Some(tag.into());
        self
    }

    /// The `"notification:{sessionKey}"` tag the orchestrator uses for
    /// cancellable per-session notifications.
    pub fn notification_tag(session_key: &SessionKey) -> String {
        format!("notification:{session_key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_fields() {
        let key = SessionKey::new("-p-app", "s1");
        let item = SpeechItem::new("hello")
            .with_session(key.clone())
            .with_cancel_tag(SpeechItem::notification_tag(&key));
        assert_eq!(item.message, "hello");
        assert_eq!(item.session, Some(key));
        assert_eq!(item.cancel_tag.as_deref(), Some("notification:-p-app:s1"));
    }

    #[test]
    fn plain_message_has_no_tag() {
        let item = SpeechItem::new("narration");
        assert!(item.cancel_tag.is_none());
        assert!(item.project.is_none());
    }
}
