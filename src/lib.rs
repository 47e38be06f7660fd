pub mod client;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod renderer;

use crate::client::{DeviceSource, FixtureSource, HttpDeviceSource};
use crate::config::AppConfig;
use crate::dashboard::AppShell;
use anyhow::Context;
use log::{debug, error, info};
use std::fs;
use std::future::Future;
use std::sync::Arc;

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting dashboard");

    let mut shell = AppShell::with_source(config.dashboard.title.clone(), build_source(&config));

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };
    let result = run_until(&config, &mut shell, shutdown).await;

    shell.deactivate();

    if let Err(e) = result {
        error!("Application error: {e:#}");
        // Print chain of error causes
        let mut source = e.source();
        while let Some(e) = source {
            error!("Caused by: {e}");
            source = e.source();
        }
        return Err(e).context("Application failed to run");
    }

    info!("Application completed successfully");
    Ok(())
}

/// Activate the shell and redraw it until `shutdown` completes. The roster
/// fetch is raced against `shutdown` too.
async fn run_until<F>(config: &AppConfig, shell: &mut AppShell, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    tokio::select! {
        result = async {
            shell.activate().await;
            main_loop(config, &*shell).await
        } => result,
        _ = shutdown => {
            info!("Interrupted, shutting down");
            Ok(())
        }
    }
}

pub fn build_source(config: &AppConfig) -> Arc<dyn DeviceSource> {
    if config.dashboard.fixture {
        info!("Using the built-in demo devices");
        Arc::new(FixtureSource::demo())
    } else {
        info!("Using the device API at {}", config.api.base_url);
        Arc::new(HttpDeviceSource::new(
            config.api.base_url.clone(),
            config.request_timeout(),
        ))
    }
}

async fn main_loop(config: &AppConfig, shell: &AppShell) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(config.refresh_interval());
    loop {
        interval.tick().await; // Wait for the next tick

        println!("{}\n", shell.render_text());

        if config.dashboard.save_to_file {
            if let Err(e) = save_html(config, shell) {
                error!("{e:#}");
            }
        }
    }
}

pub fn save_html(config: &AppConfig, shell: &AppShell) -> anyhow::Result<()> {
    let target_file = &config.dashboard.file;
    fs::write(target_file, shell.render_html())
        .context(format!("Failed to save dashboard to {}", target_file))?;
    debug!("Dashboard saved to {}", target_file);
    Ok(())
}
