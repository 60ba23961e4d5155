//! "Website Watchdog" runner

//! Crate docs

#![forbid(unsafe_code)]
#![deny(
    missing_docs,
    unstable_features,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    bad_style,
    unconditional_recursion,
    while_true,
    unused_extern_crates
)]
// For development:
// #![allow(dead_code, unused_imports, unused_variables, deprecated)]


use std::process;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use website_watchdog::*;


/// Initial setup of the tracing subscriber. RUST_LOG takes precedence over configured level
fn setup_logger(level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}


fn main() {
    let config = Config::locate().and_then(|path| Config::load(&path));
    setup_logger(
        config
            .as_ref()
            .map(Config::get_log_level)
            .unwrap_or(LevelFilter::INFO),
    );

    info!("Starting Website-Watchdog v{}", env!("CARGO_PKG_VERSION"));

    let outcome = config.and_then(|config| {
        trace!("Configuration: {}", serde_json::to_string(&config).unwrap_or_default());
        let mailer = SmtpMailer::new(&config.email)?;
        run_monitor(&config, &mailer)
    });

    match outcome {
        Ok(report) => {
            info!(
                "Run complete. Checked: {}, failed: {}.",
                report.length(),
                report.failures().count()
            );
        }
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    }
}
