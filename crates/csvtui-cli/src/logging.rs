// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! File logging. The terminal belongs to the TUI, so nothing is written to
//! stdout or stderr once the session starts.
//!
//! Logs go to `<data_local_dir>/csvtui/logs/csvtui.log`, rotated daily.
//! `RUST_LOG` overrides the `[logging] level` from the config file.

use crate::config::APP_NAME;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "csvtui.log";

pub fn logs_dir() -> Result<PathBuf> {
    let data_root = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("cannot resolve local data directory for logs"))?;
    Ok(data_root.join(APP_NAME).join("logs"))
}

/// The directive that wins: a non-empty `RUST_LOG`, else the configured level.
fn filter_directive(rust_log: Option<String>, configured: &str) -> String {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_owned())
}

/// Keep the returned guard alive for the whole run; dropping it flushes and
/// stops the background writer.
pub fn init(level: &str) -> Result<WorkerGuard> {
    let dir = logs_dir()?;
    fs::create_dir_all(&dir).with_context(|| format!("create log directory {}", dir.display()))?;

    let directive = filter_directive(env::var("RUST_LOG").ok(), level);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter {directive:?}"))?;

    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_filter(filter),
        )
        .try_init()
        .context("install tracing subscriber")?;
    Ok(guard)
}
