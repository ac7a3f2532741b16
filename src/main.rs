//! # uaide
//!
//! Desktop editor for Python scripts written with Ukrainian keywords.
//!
//! ```bash
//! # Start with an empty document
//! cargo run
//!
//! # Open a script
//! cargo run -- program.ua
//!
//! # Use another interpreter
//! cargo run -- --runner /opt/pythonua/bin/PythonUA program.ua
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

use uaide_core::config::Config;
use uaide_ui::{Flags, run};

/// Editor for Ukrainian-vocabulary Python scripts
#[derive(Parser, Debug)]
#[command(name = "uaide")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Script to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Interpreter used by the Run button
    #[arg(short, long, value_name = "PROGRAM")]
    runner: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("cannot load config {}", path.display()))?,
            None => Config::load(),
        };
        if let Some(runner) = &self.runner {
            config.runner.command = runner.clone();
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(LevelFilter::from_level(args.level()))
        .init();

    tracing::info!("Starting uaide v{}", env!("CARGO_PKG_VERSION"));

    let config = args.load_config()?;
    tracing::debug!(runner = %config.runner.command, theme = %config.ui.theme, "config ready");

    let flags = Flags {
        file: args.file,
        config,
    };

    run(flags).map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["uaide"]);
        assert!(args.file.is_none());
        assert!(args.runner.is_none());
        assert_eq!(args.level(), tracing::Level::WARN);
    }

    #[test]
    fn test_args_with_file() {
        let args = Args::parse_from(["uaide", "program.ua"]);
        assert_eq!(args.file, Some(PathBuf::from("program.ua")));
    }

    #[test]
    fn test_verbosity_count() {
        let args = Args::parse_from(["uaide", "-vv"]);
        assert_eq!(args.level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_runner_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[runner]\ncommand = \"python3\"\n").unwrap();

        let args = Args::parse_from([
            "uaide",
            "--config",
            path.to_str().unwrap(),
            "--runner",
            "/usr/local/bin/PythonUA",
        ]);
        let config = args.load_config().unwrap();
        assert_eq!(config.runner.command, "/usr/local/bin/PythonUA");
    }

    #[test]
    fn test_config_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[editor]\nauto_pair = false\n").unwrap();

        let args = Args::parse_from(["uaide", "-c", path.to_str().unwrap()]);
        let config = args.load_config().unwrap();
        assert!(!config.editor.auto_pair);
        assert_eq!(config.runner.command, "PythonUA");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = Args::parse_from(["uaide", "--config", "/nonexistent/uaide.toml"]);
        assert!(args.load_config().is_err());
    }
}
