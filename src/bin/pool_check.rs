// src/bin/pool_check.rs
//
// Run once and exit 0. Meant to be fired by cron or a systemd timer;
// failures show up in the log, not the exit code.
//
// Environment:
//   LOKI_USER, LOKI_PASSWORD   push credentials
//   POOL_CHECK_CAPACITY_URL    optional source override
//   POOL_CHECK_HOURS_URL       optional source override
//   POOL_CHECK_PUSH_URL        optional sink override
//   RUST_LOG                   log filter (default: info)

use chrono::Utc;

use pool_check::{
    config::Options,
    core::net::HttpClient,
    logf, loge, runner,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    pool_check::log::init();

    let opts = Options::from_env();
    let client = match HttpClient::new() {
        Ok(c) => c,
        Err(e) => {
            loge!("HTTP client setup failed: {e}");
            return Ok(());
        }
    };

    let summary = runner::run(&client, &opts, Utc::now());
    logf!("{} facilities, push: {:?}", summary.records.len(), summary.push);
    Ok(())
}
