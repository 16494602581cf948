// SPDX-License-Identifier: MIT

//! Startup, composition, and shutdown of the monitoring daemon: acquires
//! the PID lock, sets up logging, wires concrete adapters behind the
//! orchestrator, and runs the two-stage signal-driven shutdown sequence
//! (spec §5).

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use ccvr_adapters::locale::detect_system_language;
use ccvr_adapters::{HttpLlmAdapter, LlmError, ProcessTtsAdapter, SpeechQueue, TailEvent, TailerHandle, autodetect, tailer};
use ccvr_core::Language;
use ccvr_summarizer::Summarizer;
use fs2::FileExt;
use thiserror::Error;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::orchestrator::Orchestrator;
use crate::paths::Paths;

/// Depth of the transcript tailer: `<encodedDir>/<sessionUuid>.jsonl` or
/// `<encodedDir>/<sessionUuid>/subagents/<agentId>.jsonl`.
const TRANSCRIPT_TAIL_DEPTH: usize = 4;
const HOOK_TAIL_DEPTH: usize = 1;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("could not determine a state directory")]
    NoStateDir,
    #[error("failed to acquire the daemon lock: another instance is already running")]
    LockFailed(#[source] std::io::Error),
    #[error("no TTS binary configured or found on PATH")]
    NoTtsBinary,
    #[error("the LLM endpoint could not be reached: {0}")]
    Llm(#[from] LlmError),
    #[error("no LLM model configured or installed")]
    NoLlmModel,
    #[error("configured summary interval must be non-zero")]
    InvalidSummaryInterval,
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Acquire the exclusive PID lock at `lock_path`, truncating only after the
/// lock is confirmed held so a failed acquisition never clobbers the
/// running daemon's PID.
fn acquire_lock(lock_path: &PathBuf) -> Result<File, LifecycleError> {
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)?;
    lock_file.try_lock_exclusive().map_err(LifecycleError::LockFailed)?;

    use std::io::Write;
    let mut lock_file = lock_file;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    Ok(lock_file)
}

fn setup_logging(log_path: &PathBuf) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file_name = log_path.file_name().ok_or(LifecycleError::NoStateDir)?;
    let dir = log_path.parent().ok_or(LifecycleError::NoStateDir)?;
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}

fn resolve_language(config: &Config) -> Language {
    match &config.language {
        Some(code) => Language::from_code(code),
        None => detect_system_language(),
    }
}

async fn resolve_tts(config: &Config) -> Result<ProcessTtsAdapter, LifecycleError> {
    let argv = match &config.speaker.command {
        Some(command) if !command.is_empty() => command.clone(),
        _ => autodetect::detect_tts_command().ok_or(LifecycleError::NoTtsBinary)?,
    };
    Ok(ProcessTtsAdapter::new(argv, Duration::from_secs(30)))
}

async fn resolve_model(config: &Config, llm: &HttpLlmAdapter) -> Result<String, LifecycleError> {
    let installed = llm.list_models().await?;
    autodetect::resolve_model(config.ollama.model.as_deref(), &installed).ok_or(LifecycleError::NoLlmModel)
}

/// Everything kept alive for the lifetime of the `monitor` run.
pub struct Daemon {
    _lock_file: File,
    _log_guard: tracing_appender::non_blocking::WorkerGuard,
    speech: SpeechQueue,
    summarizer: Summarizer<HttpLlmAdapter>,
    orchestrator: Orchestrator<HttpLlmAdapter>,
    transcript_tailer: TailerHandle,
    hook_tailer: TailerHandle,
}

impl Daemon {
    /// Acquire the lock, set up logging, detect TTS/LLM, and start both
    /// tailers. Returns a `Daemon` ready for `run()`.
    pub async fn start(config: Config) -> Result<Self, LifecycleError> {
        let paths = Paths::resolve()?;
        let lock_file = acquire_lock(&paths.lock_path)?;
        let log_guard = setup_logging(&paths.log_path)?;

        info!("starting cc-voice-reporter");

        let language = resolve_language(&config);
        let tts = resolve_tts(&config).await?;
        let llm = HttpLlmAdapter::new(config.ollama.base_url.clone(), config.ollama.timeout());
        let model = resolve_model(&config, &llm).await?;

        let speech = SpeechQueue::new(tts, language, 0);
        let summarizer = Summarizer::new(
            llm,
            speech.clone(),
            model,
            language,
            config.summary.interval(),
            ccvr_summarizer::DEFAULT_MAX_PROMPT_EVENTS,
        )
        .map_err(|_| LifecycleError::InvalidSummaryInterval)?;
        summarizer.start();

        let projects_dir = config
            .projects_dir
            .clone()
            .map(Ok)
            .unwrap_or_else(Paths::default_projects_dir)?;

        let orchestrator = Orchestrator::new(
            projects_dir.clone(),
            language,
            config.filter.clone(),
            speech.clone(),
            summarizer.clone(),
        );

        let transcript_tailer = tailer::start(projects_dir, TRANSCRIPT_TAIL_DEPTH);
        let hook_tailer = tailer::start(paths.hooks_dir, HOOK_TAIL_DEPTH);

        Ok(Self {
            _lock_file: lock_file,
            _log_guard: log_guard,
            speech,
            summarizer,
            orchestrator,
            transcript_tailer,
            hook_tailer,
        })
    }

    /// Run until a termination signal arrives, then shut down. The first
    /// `SIGINT`/`SIGTERM` starts a graceful shutdown; a second identical
    /// signal, or `SIGQUIT` at any time, forces immediate shutdown.
    pub async fn run(mut self) -> Result<(), LifecycleError> {
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigquit = signal(SignalKind::quit())?;

        info!("cc-voice-reporter ready");

        loop {
            tokio::select! {
                Some(event) = self.transcript_tailer.recv() => self.handle_transcript_event(event).await,
                Some(event) = self.hook_tailer.recv() => self.handle_hook_event(event).await,
                _ = sigquit.recv() => {
                    info!("SIGQUIT received, forcing shutdown");
                    self.speech.dispose();
                    return Ok(());
                }
                _ = sigterm.recv() => {
                    info!("SIGTERM received, shutting down gracefully");
                    break;
                }
                _ = sigint.recv() => {
                    info!("SIGINT received, shutting down gracefully");
                    break;
                }
            }
        }

        tokio::select! {
            () = self.graceful_shutdown() => {}
            _ = sigterm.recv() => {
                info!("second SIGTERM received, forcing shutdown");
                self.speech.dispose();
            }
            _ = sigint.recv() => {
                info!("second SIGINT received, forcing shutdown");
                self.speech.dispose();
            }
            _ = sigquit.recv() => {
                info!("SIGQUIT received, forcing shutdown");
                self.speech.dispose();
            }
        }
        Ok(())
    }

    async fn graceful_shutdown(&self) {
        self.summarizer.flush().await;
        self.speech.stop_gracefully().await;
    }

    async fn handle_transcript_event(&self, event: TailEvent) {
        match event {
            TailEvent::Lines { path, lines } => self.orchestrator.handle_transcript_lines(&path, lines).await,
            TailEvent::Error { path, message } => {
                warn!(?path, %message, "transcript tailer error");
            }
        }
    }

    async fn handle_hook_event(&self, event: TailEvent) {
        match event {
            TailEvent::Lines { lines, .. } => self.orchestrator.handle_hook_lines(lines).await,
            TailEvent::Error { path, message } => {
                warn!(?path, %message, "hook tailer error");
            }
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;

/// Run the daemon to completion, exiting the process on any unhandled
/// error (spec §4.5: "bubbles to a top-level fatal handler").
pub async fn run(config: Config) {
    let daemon = match Daemon::start(config).await {
        Ok(daemon) => daemon,
        Err(err) => {
            error!(error = ?err, "fatal error during startup");
            std::process::exit(1);
        }
    };

    if let Err(err) = daemon.run().await {
        error!(error = ?err, "fatal error");
        std::process::exit(1);
    }
    std::process::exit(0);
}
