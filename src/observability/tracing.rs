use anyhow::{Error, Result};
use once_cell::sync::OnceCell;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LogLevel};

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// Tracing サブスクライバを一度だけ初期化する。
///
/// `RUST_LOG` が設定されていればそれを優先し、なければ `level` を使う。
/// 標準出力は推論結果の行に使うため、ログは常に標準エラーへ出す。
///
/// # Errors
/// サブスクライバの初期化に失敗した場合はエラーを返す。
pub fn init(level: LogLevel, format: LogFormat) -> Result<()> {
    TRACING_INIT.get_or_try_init(|| {
        let default_level: tracing::Level = level.into();
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

        let registry = tracing_subscriber::registry().with(env_filter);
        let result = match format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .flatten_event(true)
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .try_init(),
            LogFormat::Plain => registry
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .try_init(),
        };
        result.map_err(|e: tracing_subscriber::util::TryInitError| Error::msg(e.to_string()))?;

        info!(?format, level = %default_level, "tracing initialized");
        Ok::<(), Error>(())
    })?;
    Ok(())
}
