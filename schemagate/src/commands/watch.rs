// schemagate/src/commands/watch.rs
//
// USE CASE: Keep the schema source running and report every generation.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

use schemagate_core::application::build_host;
use schemagate_core::domain::SchemaContext;
use schemagate_core::ports::ServerPlugin;

struct AnnouncePlugin;

#[async_trait]
impl ServerPlugin for AnnouncePlugin {
    fn name(&self) -> &str {
        "announce"
    }

    async fn schema_did_load_or_update(&self, ctx: &SchemaContext) {
        println!(
            "🔄 Schema generation {} now serving ({} types)",
            ctx.api_schema.generation(),
            ctx.api_schema.type_names().len()
        );
    }

    async fn server_will_stop(&self) {
        println!("🛑 Stopping...");
    }
}

pub async fn execute(config_dir: PathBuf, exit_after_secs: Option<u64>) -> anyhow::Result<()> {
    let config = super::load_config(&config_dir)?;

    // Installed before startup so a signal sent while loading is not lost.
    let mut signals = if config.stops_on_termination_signals() {
        match TerminationSignals::install() {
            Ok(signals) => Some(signals),
            Err(e) => {
                warn!("Termination signals unavailable: {}", e);
                None
            }
        }
    } else {
        None
    };

    let plugin: Arc<dyn ServerPlugin> = Arc::new(AnnouncePlugin);
    let host = build_host(&config, &config_dir, vec![plugin.into()]).await?;

    if let Err(e) = host.start().await {
        eprintln!("\n💥 SCHEMA LOAD FAILED: {}", e);
        let _ = host.stop().await;
        std::process::exit(1);
    }

    println!("👀 Watching schema source '{}'...", host.source().name());
    let reason = wait_for_shutdown(signals.as_mut(), exit_after_secs.map(Duration::from_secs)).await;
    println!("📴 Shutting down ({})", reason);

    host.stop().await?;
    println!("✨ Stopped cleanly");
    Ok(())
}

/// SIGINT and SIGTERM on unix, Ctrl-C elsewhere.
#[cfg(unix)]
struct TerminationSignals {
    interrupt: Signal,
    terminate: Signal,
}

#[cfg(unix)]
impl TerminationSignals {
    fn install() -> std::io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
        }
    }
}

#[cfg(not(unix))]
struct TerminationSignals;

#[cfg(not(unix))]
impl TerminationSignals {
    fn install() -> std::io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) -> &'static str {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        "Ctrl-C"
    }
}

async fn wait_for_shutdown(
    signals: Option<&mut TerminationSignals>,
    exit_after: Option<Duration>,
) -> &'static str {
    let timer = async {
        match exit_after {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending::<()>().await,
        }
    };

    let Some(signals) = signals else {
        if exit_after.is_none() {
            warn!("Termination signals are ignored and no exit timer is set: running until killed");
        }
        timer.await;
        return "exit timer";
    };

    tokio::select! {
        name = signals.recv() => {
            info!("Received {}", name);
            name
        }
        _ = timer => "exit timer",
    }
}
