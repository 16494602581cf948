// SPDX-License-Identifier: MIT

//! Autodetection glue: which TTS binary is on `PATH`, and which installed
//! LLM model to use. Spec §6 names the exact precedence rules; this module
//! implements them so the CLI's startup checks have somewhere to call.

/// TTS binaries tried in order, each checked for presence on `PATH` via
/// `which`. The first one found wins.
pub const TTS_CANDIDATES: &[&str] = &["say", "espeak-ng", "espeak"];

/// Find the first TTS binary on `PATH` from `TTS_CANDIDATES`, returning an
/// argv prefix of exactly one element (the binary name; the spoken message
/// is appended as the final argument at speak time).
pub fn detect_tts_command() -> Option<Vec<String>> {
    TTS_CANDIDATES
        .iter()
        .find(|candidate| which::which(candidate).is_ok())
        .map(|candidate| vec![candidate.to_string()])
}

/// Resolve which installed model to use, given an optional configured
/// name and the list of model names reported by `GET /api/tags`.
///
/// - An exact match of `requested` wins.
/// - Else a match by prefix before `:` wins (e.g. `requested = "llama3"`
///   matches an installed `"llama3:8b"`).
/// - If `requested` is `None`, the first listed model is used.
/// - If `installed` is empty, there is nothing to resolve.
pub fn resolve_model(requested: Option<&str>, installed: &[String]) -> Option<String> {
    match requested {
        Some(name) => installed
            .iter()
            .find(|candidate| candidate.as_str() == name)
            .or_else(|| {
                installed
                    .iter()
                    .find(|candidate| candidate.split(':').next() == Some(name))
            })
            .cloned(),
        None => installed.first().cloned(),
    }
}

#[cfg(test)]
#[path = "autodetect_tests.rs"]
mod tests;
