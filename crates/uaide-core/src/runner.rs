//! Running the document through the external interpreter.
//!
//! ## Learning: Scoped cleanup with `TempPath`
//!
//! The script is written to a uniquely named `.ua` temp file and handed to
//! the interpreter by path. The file is owned by a `tempfile::TempPath`,
//! which deletes it when dropped, so every exit from `run` (spawn failure,
//! wait failure, success) removes it exactly once.
//!
//! Only one run may be in flight. The bridge holds an owned mutex guard for
//! the duration of a run and rejects overlapping requests with
//! [`RunError::Busy`] instead of queueing them.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::RunnerConfig;

/// Interpreter launched when none is configured.
pub const DEFAULT_RUNNER: &str = "PythonUA";

/// Identifies one run in logs and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Captured output of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was ended by a signal
    pub exit_code: Option<i32>,
}

/// Reasons a run produced no output.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("interpreter not found: {program}")]
    ExecutableNotFound { program: String },

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot write temporary script: {0}")]
    TempFile(#[source] io::Error),

    #[error("a run is already in progress")]
    Busy,
}

/// Hands source text to the interpreter and collects what it prints.
#[derive(Debug, Clone)]
pub struct ExecutionBridge {
    program: String,
    temp_dir: Option<PathBuf>,
    in_flight: Arc<Mutex<()>>,
}

impl Default for ExecutionBridge {
    fn default() -> Self {
        Self::new(DEFAULT_RUNNER)
    }
}

impl ExecutionBridge {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            temp_dir: None,
            in_flight: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        let bridge = Self::new(config.command.clone());
        match &config.temp_dir {
            Some(dir) => bridge.with_temp_dir(dir),
            None => bridge,
        }
    }

    /// Writes scripts into `dir` instead of the system temp dir.
    pub fn with_temp_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.temp_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns true while a run holds the bridge.
    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Runs `source` under a fresh [`RunId`].
    pub async fn run(&self, source: String) -> Result<ExecutionResult, RunError> {
        self.run_with_id(RunId::new(), source).await
    }

    /// Runs `source` and waits for the interpreter to exit.
    pub async fn run_with_id(&self, id: RunId, source: String) -> Result<ExecutionResult, RunError> {
        let _guard = self
            .in_flight
            .clone()
            .try_lock_owned()
            .map_err(|_| RunError::Busy)?;

        let span = tracing::info_span!("run", id = %id, program = %self.program);
        self.execute(&source).instrument(span).await
    }

    async fn execute(&self, source: &str) -> Result<ExecutionResult, RunError> {
        let script = self.write_script(source).map_err(RunError::TempFile)?;
        tracing::debug!(script = %script.display(), bytes = source.len(), "script written");

        let output = Command::new(&self.program)
            .arg(&*script)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await;

        if let Err(e) = script.close() {
            tracing::warn!(error = %e, "failed to remove temporary script");
        }

        let output = output.map_err(|source| {
            tracing::warn!(error = %source, "interpreter did not start");
            if source.kind() == io::ErrorKind::NotFound {
                RunError::ExecutableNotFound {
                    program: self.program.clone(),
                }
            } else {
                RunError::Launch {
                    program: self.program.clone(),
                    source,
                }
            }
        })?;

        let result = ExecutionResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };
        tracing::info!(
            exit_code = ?result.exit_code,
            stdout = result.stdout.len(),
            stderr = result.stderr.len(),
            "run finished"
        );
        Ok(result)
    }

    fn write_script(&self, source: &str) -> io::Result<tempfile::TempPath> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("uaide-").suffix(".ua");

        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(source.as_bytes())?;
        file.flush()?;
        Ok(file.into_temp_path())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_script_reaches_interpreter() {
        let dir = tempdir().unwrap();
        let bridge = ExecutionBridge::new("cat").with_temp_dir(dir.path());

        let result = bridge.run("вивести(\"привіт\")\n".into()).await.unwrap();
        assert_eq!(result.stdout, "вивести(\"привіт\")\n");
        assert_eq!(result.stderr, "");
        assert_eq!(result.exit_code, Some(0));
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_stdout_and_stderr_captured_separately() {
        let dir = tempdir().unwrap();
        let bridge = ExecutionBridge::new("sh").with_temp_dir(dir.path());

        let result = bridge
            .run("echo out\necho err 1>&2\nexit 3\n".into())
            .await
            .unwrap();
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");
        assert_eq!(result.exit_code, Some(3));
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_missing_interpreter() {
        let dir = tempdir().unwrap();
        let bridge =
            ExecutionBridge::new("uaide-no-such-interpreter-7f3a").with_temp_dir(dir.path());

        let err = bridge.run("вивести(1)".into()).await.unwrap_err();
        assert!(matches!(
            err,
            RunError::ExecutableNotFound { ref program } if program == "uaide-no-such-interpreter-7f3a"
        ));
        assert!(dir_is_empty(dir.path()));
        assert!(!bridge.is_busy());
    }

    #[tokio::test]
    async fn test_unwritable_temp_dir() {
        let dir = tempdir().unwrap();
        let bridge = ExecutionBridge::new("cat").with_temp_dir(dir.path().join("missing"));
        let err = bridge.run("x".into()).await.unwrap_err();
        assert!(matches!(err, RunError::TempFile(_)));
    }

    #[tokio::test]
    async fn test_second_run_is_rejected_while_busy() {
        let dir = tempdir().unwrap();
        let bridge = ExecutionBridge::new("sh").with_temp_dir(dir.path());

        let background = bridge.clone();
        let first = tokio::spawn(async move { background.run("sleep 1\n".into()).await });

        for _ in 0..100 {
            if bridge.is_busy() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(bridge.is_busy());

        let err = bridge.run("echo x\n".into()).await.unwrap_err();
        assert!(matches!(err, RunError::Busy));

        assert!(first.await.unwrap().is_ok());
        assert!(!bridge.is_busy());
        assert!(dir_is_empty(dir.path()));
    }

    #[test]
    fn test_from_config() {
        let config = RunnerConfig {
            command: "python3".into(),
            temp_dir: Some("/var/tmp".into()),
        };
        let bridge = ExecutionBridge::from_config(&config);
        assert_eq!(bridge.program(), "python3");
        assert_eq!(bridge.temp_dir.as_deref(), Some(Path::new("/var/tmp")));
        assert_eq!(ExecutionBridge::default().program(), DEFAULT_RUNNER);
    }
}
