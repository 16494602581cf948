// SPDX-License-Identifier: MIT

//! Composes the tailers, parser, speech queue, and summarizer; owns the
//! notification priority state machine (spec §4.5).

use std::path::{Path, PathBuf};

use ccvr_adapters::locale::{ask_question_message, awaiting_input_message, permission_required_message};
use ccvr_adapters::{tailer, LlmAdapter, SpeechQueue};
use ccvr_core::{ActivityEvent, ExtractedEvent, Language, NotificationLevel, SpeechItem};
use ccvr_summarizer::{detail, Summarizer};
use tracing::warn;

use crate::config::{FilterConfig, project_allowed};
use crate::hooks::{self, HookKind};
use crate::session_registry::SessionRegistry;
use crate::suppression::SuppressionTracker;

/// Everything the orchestrator needs to turn tailer output into speech.
pub struct Orchestrator<L: LlmAdapter> {
    projects_dir: PathBuf,
    language: Language,
    filter: FilterConfig,
    speech: SpeechQueue,
    summarizer: Summarizer<L>,
    suppression: SuppressionTracker,
    sessions: SessionRegistry,
}

impl<L: LlmAdapter> Orchestrator<L> {
    pub fn new(
        projects_dir: PathBuf,
        language: Language,
        filter: FilterConfig,
        speech: SpeechQueue,
        summarizer: Summarizer<L>,
    ) -> Self {
        Self {
            projects_dir,
            language,
            filter,
            speech,
            summarizer,
            suppression: SuppressionTracker::new(),
            sessions: SessionRegistry::new(),
        }
    }

    /// Handle one batch of newly tailed transcript lines from `path`.
    pub async fn handle_transcript_lines(&self, path: &Path, lines: Vec<String>) {
        let Some(encoded_dir) = tailer::extract_project_dir(path, &self.projects_dir) else {
            warn!(path = %path.display(), "could not determine project directory for tailed file");
            return;
        };
        let Some(session_id) = tailer::extract_session_id(path, &self.projects_dir) else {
            warn!(path = %path.display(), "could not determine session id for tailed file");
            return;
        };
        let is_subagent = tailer::is_subagent(path);

        let project = self.sessions.resolve_project(&encoded_dir);
        if !project_allowed(&project.display_name, &self.filter) {
            return;
        }
        self.sessions.observe(&session_id, &project);
        let session_key = ccvr_core::SessionKey::new(&encoded_dir, &session_id);

        let extracted = ccvr_parser::process(&lines, |warning| {
            warn!(path = %path.display(), %warning, "transcript parse warning");
        });

        self.dispatch_batch(session_key, project, is_subagent, extracted).await;
    }

    /// Handle one batch of newly tailed hook side-channel lines.
    pub async fn handle_hook_lines(&self, lines: Vec<String>) {
        for line in lines {
            let Some(event) = hooks::parse_line(&line, |warning| warn!(%warning, "hook parse warning")) else {
                continue;
            };
            let Some(project) = self.sessions.lookup(&event.session_id) else {
                warn!(session_id = %event.session_id, "hook event for unobserved session, dropping");
                continue;
            };
            let session_key = ccvr_core::SessionKey::new(&project.encoded_dir, &event.session_id);
            let level = match event.kind {
                HookKind::IdlePrompt => NotificationLevel::IdlePrompt,
                HookKind::PermissionPrompt => NotificationLevel::PermissionPrompt,
            };
            let message = permission_required_message(self.language).to_string();
            self.dispatch_notification(level, message, session_key, project);
        }
    }

    async fn dispatch_batch(
        &self,
        session_key: ccvr_core::SessionKey,
        project: ccvr_core::ProjectDescriptor,
        is_subagent: bool,
        events: Vec<ExtractedEvent>,
    ) {
        let mut deferred_ask: Option<String> = None;
        let mut user_responded = false;

        for event in events {
            match event {
                ExtractedEvent::Text { text, .. } => {
                    self.summarizer.record(ActivityEvent::text(session_key.clone(), text), true);
                    self.suppression.reset(&session_key);
                }
                ExtractedEvent::ToolUse { tool_name, input, .. } if tool_name == ExtractedEvent::ASK_USER_QUESTION => {
                    let question = detail::extract(&tool_name, &input);
                    self.summarizer
                        .record(ActivityEvent::tool_use(session_key.clone(), tool_name, question.clone()), true);
                    self.suppression.reset(&session_key);
                    deferred_ask = Some(question);
                }
                ExtractedEvent::ToolUse { tool_name, input, .. } => {
                    let detail = detail::extract(&tool_name, &input);
                    self.summarizer.record(ActivityEvent::tool_use(session_key.clone(), tool_name, detail), true);
                    self.suppression.reset(&session_key);
                }
                ExtractedEvent::TurnComplete => {
                    if is_subagent {
                        continue;
                    }
                    self.summarizer.flush().await;
                    let message = awaiting_input_message(self.language).to_string();
                    self.dispatch_notification(NotificationLevel::TurnComplete, message, session_key.clone(), project.clone());
                }
                ExtractedEvent::UserResponse => {
                    user_responded = true;
                    self.suppression.reset(&session_key);
                    self.speech.cancel_by_tag(&SpeechItem::notification_tag(&session_key));
                }
            }
        }

        if let Some(question) = deferred_ask {
            self.summarizer.flush().await;
            if !user_responded {
                let message = ask_question_message(self.language, &question);
                self.dispatch_notification(NotificationLevel::AskQuestion, message, session_key, project);
            }
        }
    }

    /// The single primitive handling all four notification levels, so
    /// suppression and tagging are implemented exactly once.
    fn dispatch_notification(
        &self,
        level: NotificationLevel,
        message: String,
        session_key: ccvr_core::SessionKey,
        project: ccvr_core::ProjectDescriptor,
    ) {
        if self.suppression.is_suppressed(&session_key, level) {
            return;
        }
        self.speech.cancel_by_tag(&SpeechItem::notification_tag(&session_key));
        let item = SpeechItem::new(message)
            .with_project(project)
            .with_session(session_key.clone())
            .with_cancel_tag(SpeechItem::notification_tag(&session_key));
        self.speech.speak(item);
        self.suppression.record_spoken(session_key, level);
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
