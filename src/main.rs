use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use bayes_partition::{app, config::Config, observability};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate().context("invalid configuration")?;
    observability::tracing::init(config.log_level, config.log_format)
        .context("failed to initialize tracing")?;

    std::panic::set_hook(Box::new(|panic_info| {
        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("unnamed");
        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| {
                panic_info
                    .payload()
                    .downcast_ref::<String>()
                    .map(String::as_str)
            })
            .unwrap_or("unknown panic payload");

        if let Some(location) = panic_info.location() {
            error!(
                thread = thread_name,
                file = location.file(),
                line = location.line(),
                message,
                "panic occurred"
            );
        } else {
            error!(thread = thread_name, message, "panic occurred");
        }
    }));

    let report = app::run(&config).context("partition run failed")?;
    info!(
        rows_out = report.rows_out,
        dropped = report.dropped,
        "done"
    );
    Ok(())
}
