use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// ログの出力形式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Plain,
}

/// 1パーティション分の NDJSON を分類するハーネスの設定。
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Input NDJSON rows (stdin when omitted)
    #[arg(long, env = "BAYES_INPUT")]
    pub input: Option<PathBuf>,

    /// Output NDJSON rows (stdout when omitted)
    #[arg(long, env = "BAYES_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, env = "LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormat,

    /// Compute evaluation metrics over the emitted rows
    #[arg(long = "metrics", env = "BAYES_REPORT_METRICS")]
    pub report_metrics: bool,

    /// Write the evaluation summary as JSON to this path
    #[arg(long, env = "BAYES_METRICS_OUTPUT")]
    pub metrics_output: Option<PathBuf>,
}

impl Config {
    /// 入出力パスの組み合わせを検証する。
    ///
    /// # Errors
    /// 入力と出力、またはメトリクス出力が同じファイルを指す場合は [`ConfigError`] を返す。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if same_path(self.input.as_deref(), self.output.as_deref()) {
            return Err(ConfigError::Invalid {
                name: "output",
                reason: "output must not overwrite the input file".to_string(),
            });
        }
        if let Some(metrics_output) = self.metrics_output.as_deref() {
            if !self.report_metrics {
                return Err(ConfigError::Invalid {
                    name: "metrics_output",
                    reason: "requires --metrics".to_string(),
                });
            }
            if same_path(Some(metrics_output), self.input.as_deref())
                || same_path(Some(metrics_output), self.output.as_deref())
            {
                return Err(ConfigError::Invalid {
                    name: "metrics_output",
                    reason: "metrics output must differ from the row input and output".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn same_path(left: Option<&Path>, right: Option<&Path>) -> bool {
    matches!((left, right), (Some(left), Some(right)) if left == right)
}
