// SPDX-License-Identifier: MIT

use std::time::Duration;

use ccvr_adapters::{FakeLlmAdapter, FakeTtsAdapter, LlmError, SpeechQueue};
use ccvr_core::{ActivityEvent, Language, SessionKey};

use super::*;

fn session(id: &str) -> SessionKey {
    SessionKey::new("-p-app", id)
}

fn new_summarizer(llm: FakeLlmAdapter, interval: Duration) -> (Summarizer<FakeLlmAdapter>, FakeTtsAdapter) {
    let tts = FakeTtsAdapter::new();
    let speech = SpeechQueue::new(tts.clone(), Language::English, 0);
    let summarizer = Summarizer::new(llm, speech, "llama3", Language::English, interval, 10).expect("valid interval");
    (summarizer, tts)
}

async fn wait_until(predicate: impl Fn() -> bool) {
    for _ in 0..200 {
        if predicate() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met in time");
}

#[test]
fn zero_interval_is_rejected() {
    let tts = FakeTtsAdapter::new();
    let speech = SpeechQueue::new(tts, Language::English, 0);
    let result = Summarizer::new(FakeLlmAdapter::new(), speech, "llama3", Language::English, Duration::ZERO, 10);
    assert!(matches!(result, Err(SummarizerError::InvalidInterval)));
}

#[tokio::test(start_paused = true)]
async fn untriggered_record_does_not_schedule_a_flush() {
    let llm = FakeLlmAdapter::new();
    let (summarizer, tts) = new_summarizer(llm.clone(), Duration::from_millis(50));
    summarizer.start();

    summarizer.record(ActivityEvent::tool_use(session("s1"), "Read", "/a.rs"), false);
    tokio::time::advance(Duration::from_secs(1)).await;
    tokio::task::yield_now().await;

    assert!(llm.calls().is_empty());
    assert!(tts.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn triggered_record_flushes_after_the_throttle_interval() {
    let llm = FakeLlmAdapter::new();
    llm.set_next_reply(Ok("You read a file.".to_string()));
    let (summarizer, tts) = new_summarizer(llm.clone(), Duration::from_millis(50));
    summarizer.start();

    summarizer.record(ActivityEvent::tool_use(session("s1"), "Read", "/a.rs"), true);
    tokio::time::advance(Duration::from_millis(60)).await;
    wait_until(|| !llm.calls().is_empty()).await;

    let calls = llm.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model, "llama3");
    assert!(calls[0].messages[1].contains("Read: /a.rs"));

    wait_until(|| !tts.calls().is_empty()).await;
    assert_eq!(tts.calls()[0].message, "You read a file.");
}

#[tokio::test(start_paused = true)]
async fn stopped_summarizer_ignores_triggers() {
    let llm = FakeLlmAdapter::new();
    let (summarizer, _tts) = new_summarizer(llm.clone(), Duration::from_millis(10));
    // never started
    summarizer.record(ActivityEvent::tool_use(session("s1"), "Read", "/a.rs"), true);
    tokio::time::advance(Duration::from_secs(1)).await;
    tokio::task::yield_now().await;
    assert!(llm.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn forced_flush_drains_immediately_without_a_trigger() {
    let llm = FakeLlmAdapter::new();
    let (summarizer, _tts) = new_summarizer(llm.clone(), Duration::from_secs(60));
    summarizer.start();
    summarizer.record(ActivityEvent::text(session("s1"), "found it"), false);

    summarizer.flush().await;

    assert_eq!(llm.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn flush_failure_speaks_localized_failure_message_without_updating_history() {
    let llm = FakeLlmAdapter::new();
    llm.set_next_reply(Err(LlmError::Status(500)));
    let (summarizer, tts) = new_summarizer(llm.clone(), Duration::from_secs(60));
    summarizer.start();
    summarizer.record(ActivityEvent::tool_use(session("s1"), "Bash", "cargo test"), false);

    summarizer.flush().await;
    wait_until(|| !tts.calls().is_empty()).await;

    let spoken = tts.calls();
    assert_eq!(spoken.len(), 1);
    assert!(!spoken[0].message.contains("cargo test"));
}

#[tokio::test(start_paused = true)]
async fn history_is_capped_and_carried_into_the_next_prompt() {
    let llm = FakeLlmAdapter::new();
    let (summarizer, _tts) = new_summarizer(llm.clone(), Duration::from_secs(60));
    summarizer.start();

    llm.set_next_reply(Ok("first summary".to_string()));
    summarizer.record(ActivityEvent::text(session("s1"), "a"), false);
    summarizer.flush().await;

    llm.set_next_reply(Ok("second summary".to_string()));
    summarizer.record(ActivityEvent::text(session("s1"), "b"), false);
    summarizer.flush().await;

    llm.set_next_reply(Ok("third summary".to_string()));
    summarizer.record(ActivityEvent::text(session("s1"), "c"), false);
    summarizer.flush().await;

    let calls = llm.calls();
    let last_user_prompt = &calls.last().unwrap().messages[1];
    assert!(last_user_prompt.contains("Older narration: first summary"));
    assert!(last_user_prompt.contains("Most recent narration: second summary"));
}

#[tokio::test(start_paused = true)]
async fn flush_drains_every_session_with_pending_events() {
    let llm = FakeLlmAdapter::new();
    let (summarizer, _tts) = new_summarizer(llm.clone(), Duration::from_secs(60));
    summarizer.start();

    summarizer.record(ActivityEvent::text(session("s1"), "a"), false);
    summarizer.record(ActivityEvent::text(session("s2"), "b"), false);
    summarizer.flush().await;

    assert_eq!(llm.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn reschedules_when_new_events_arrive_during_a_flush() {
    let llm = FakeLlmAdapter::new();
    let (summarizer, _tts) = new_summarizer(llm.clone(), Duration::from_millis(20));
    summarizer.start();

    summarizer.record(ActivityEvent::text(session("s1"), "a"), true);
    // Simulate more activity landing while the throttle timer is pending.
    summarizer.record(ActivityEvent::text(session("s1"), "b"), false);
    tokio::time::advance(Duration::from_millis(30)).await;
    wait_until(|| llm.calls().len() >= 1).await;

    // A later trigger after the first flush should still produce a second call.
    summarizer.record(ActivityEvent::text(session("s1"), "c"), true);
    tokio::time::advance(Duration::from_millis(30)).await;
    wait_until(|| llm.calls().len() >= 2).await;
}
