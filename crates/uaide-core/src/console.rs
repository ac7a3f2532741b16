//! The output log shown under the editor.

use std::fmt;
use std::path::Path;

use crate::runner::{ExecutionResult, RunError};

/// Printed before a run's output.
pub const RUN_STARTED: &str = "=== Виконання програми ===";
/// Printed after a run's output.
pub const RUN_FINISHED: &str = "=== Кінець виконання ===";

/// What a log line came from; the UI colors lines by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Banner,
    Stdout,
    Stderr,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: LogKind,
    pub text: String,
}

impl LogEntry {
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Append-only run and save log.
#[derive(Debug, Clone, Default)]
pub struct Console {
    entries: Vec<LogEntry>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: LogKind, text: impl Into<String>) {
        self.entries.push(LogEntry::new(kind, text));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The whole log as plain text, one entry per line.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(entry.text.trim_end_matches('\n'));
            out.push('\n');
        }
        out
    }

    pub fn run_started(&mut self) {
        self.push(LogKind::Banner, RUN_STARTED);
    }

    /// Appends a run's output: stdout block first, then stderr.
    /// Empty streams add nothing.
    pub fn record_run(&mut self, outcome: &Result<ExecutionResult, RunError>) {
        match outcome {
            Ok(result) => {
                if !result.stdout.is_empty() {
                    self.push(LogKind::Stdout, result.stdout.clone());
                }
                if !result.stderr.is_empty() {
                    self.push(LogKind::Stderr, result.stderr.clone());
                }
            }
            Err(err) => self.push(LogKind::Error, describe_run_error(err)),
        }
    }

    /// Records a run's output followed by the closing banner.
    pub fn finish_run(&mut self, outcome: &Result<ExecutionResult, RunError>) {
        self.record_run(outcome);
        self.push(LogKind::Banner, RUN_FINISHED);
    }

    pub fn saved(&mut self, path: &Path) {
        self.push(LogKind::Info, format!("Файл збережено: {}", path.display()));
    }

    pub fn save_failed(&mut self, err: impl fmt::Display) {
        self.push(LogKind::Error, format!("Помилка збереження: {err}"));
    }
}

/// User-facing text for a failed run.
pub fn describe_run_error(err: &RunError) -> String {
    match err {
        RunError::ExecutableNotFound { program } => format!(
            "Помилка: інтерпретатор {program} не знайдено в PATH, \
             щоб додати в PATH відкрийте config-pythonua.exe"
        ),
        RunError::Launch { .. } | RunError::TempFile(_) => format!("Помилка запуску: {err}"),
        RunError::Busy => "Програма вже виконується".to_string(),
    }
}
