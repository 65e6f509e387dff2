//! Aegis daemon — entry point for running an Aegis subnet miner.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use clap::Parser;
use prometheus::{Registry, TextEncoder};

use aegis_chain::{
    ChainError, FileTelemetrySink, HttpBlacklistClient, LedgerClient, ServingHandle, SimLedger,
};
use aegis_miner::{
    init_logging, LogFormat, MinerConfig, MinerMetrics, ParticipationLoop, ParticipationState,
    ShutdownController,
};
use aegis_types::{Hotkey, VersionKey};

/// Neuron count on the simulated dev ledger.
const DEV_NEURONS: u16 = 16;

#[derive(Parser)]
#[command(name = "aegis-daemon", about = "Aegis subnet miner daemon")]
struct Cli {
    /// Subnet to participate on.
    /// When a config file is provided, defaults to the file's netuid value.
    #[arg(long, env = "AEGIS_NETUID")]
    netuid: Option<u16>,

    /// Hotkey identifying this miner on the subnet.
    /// Defaults to the first hotkey in the metagraph (dev ledger only).
    #[arg(long, env = "AEGIS_HOTKEY")]
    hotkey: Option<String>,

    /// Enable the (deprecated) weight submission path.
    #[arg(long, env = "AEGIS_SET_WEIGHTS")]
    set_weights: bool,

    /// Minimum validator stake for serving requests.
    #[arg(long, env = "AEGIS_VALIDATOR_MIN_STAKE")]
    validator_min_stake: Option<f64>,

    /// Enable the telemetry sink.
    #[arg(long, env = "AEGIS_TELEMETRY")]
    telemetry: bool,

    /// Enable the Prometheus metrics endpoint.
    #[arg(long, env = "AEGIS_ENABLE_METRICS")]
    metrics: bool,

    /// Metrics endpoint port.
    #[arg(long, env = "AEGIS_METRICS_PORT")]
    metrics_port: Option<u16>,

    /// Port the serving transport listens on.
    #[arg(long, default_value_t = 8091, env = "AEGIS_AXON_PORT")]
    axon_port: u16,

    /// Directory for log output.
    /// When a config file is provided, defaults to the file's log_dir value.
    #[arg(long, env = "AEGIS_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "AEGIS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Placeholder serving transport: reserves the axon port so operators see
/// the miner as reachable. The request-handling stack binds here once it
/// lands in this workspace.
struct TcpServing {
    port: u16,
    listener: Option<std::net::TcpListener>,
}

impl TcpServing {
    fn new(port: u16) -> Self {
        Self {
            port,
            listener: None,
        }
    }
}

impl ServingHandle for TcpServing {
    fn start(&mut self) -> Result<(), ChainError> {
        let listener = std::net::TcpListener::bind(("0.0.0.0", self.port))?;
        tracing::info!(port = self.port, "axon listener bound");
        self.listener = Some(listener);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ChainError> {
        if self.listener.take().is_some() {
            tracing::info!(port = self.port, "axon listener released");
        }
        Ok(())
    }
}

async fn serve_metrics(registry: Registry, port: u16) -> anyhow::Result<()> {
    let app = Router::new().route(
        "/metrics",
        get(move || {
            let registry = registry.clone();
            async move {
                TextEncoder::new()
                    .encode_to_string(&registry.gather())
                    .unwrap_or_else(|e| format!("# encoding error: {e}\n"))
            }
        }),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind metrics endpoint on {addr}"))?;
    tracing::info!(%addr, "metrics endpoint listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn merge_config(cli: &Cli) -> (MinerConfig, Option<String>) {
    // Logging is not up yet, so parse failures are remembered and logged
    // after init rather than printed here.
    let mut deferred_warning = None;

    let base = match &cli.config {
        Some(path) => match MinerConfig::from_toml_file(&path.display().to_string()) {
            Ok(cfg) => cfg,
            Err(e) => {
                deferred_warning = Some(format!(
                    "failed to load config file {}: {e}; using CLI defaults",
                    path.display()
                ));
                MinerConfig::default()
            }
        },
        None => MinerConfig::default(),
    };

    let config = MinerConfig {
        netuid: cli
            .netuid
            .map(aegis_types::Netuid::new)
            .unwrap_or(base.netuid),
        set_weights: cli.set_weights || base.set_weights,
        telemetry_enabled: cli.telemetry || base.telemetry_enabled,
        validator_min_stake: cli.validator_min_stake.unwrap_or(base.validator_min_stake),
        enable_metrics: cli.metrics || base.enable_metrics,
        metrics_port: cli.metrics_port.unwrap_or(base.metrics_port),
        log_dir: cli.log_dir.clone().unwrap_or(base.log_dir),
        log_level: cli.log_level.clone().unwrap_or(base.log_level),
        ..base
    };

    (config, deferred_warning)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, deferred_warning) = merge_config(&cli);

    init_logging(
        LogFormat::parse(&config.log_format),
        &config.log_level,
        Some(&config.log_dir),
    )?;
    if let Some(warning) = deferred_warning {
        tracing::warn!("{warning}");
    }

    let version_key = VersionKey::from_semver(aegis_miner::VERSION)
        .context("release version is not a valid major.minor.patch string")?;
    tracing::info!(
        version = aegis_miner::VERSION,
        %version_key,
        netuid = %config.netuid,
        set_weights = config.set_weights,
        "starting aegis miner"
    );

    // No live chain connection in this workspace; the simulated ledger
    // stands in so the full loop can run end-to-end.
    let ledger = SimLedger::dev(DEV_NEURONS);
    let snapshot = ledger
        .snapshot(true)
        .context("initial metagraph sync failed")?;
    let current_block = ledger
        .current_block()
        .context("failed to read initial block height")?;

    let hotkey = match &cli.hotkey {
        Some(hk) => Hotkey::new(hk.clone()),
        None => snapshot
            .neurons
            .first()
            .map(|n| n.hotkey.clone())
            .context("metagraph is empty, cannot derive a default hotkey")?,
    };
    let uid = snapshot
        .neurons
        .iter()
        .find(|n| n.hotkey == hotkey)
        .map(|n| n.uid)
        .context("hotkey is not registered on the subnet")?;
    tracing::info!(%uid, hotkey = hotkey.as_str(), block = current_block, "miner identity resolved");

    let policy = HttpBlacklistClient::new(config.blacklist_url.clone())?;
    let telemetry = FileTelemetrySink::open(&config.log_dir)?;
    let serving = TcpServing::new(cli.axon_port);
    let metrics = Arc::new(MinerMetrics::new());

    if config.enable_metrics {
        let registry = metrics.registry.clone();
        let port = config.metrics_port;
        tokio::spawn(async move {
            if let Err(e) = serve_metrics(registry, port).await {
                tracing::error!("metrics endpoint failed: {e:#}");
            }
        });
    }

    let shutdown = ShutdownController::new();
    let listener = shutdown.listener();
    let state = ParticipationState::new(uid, hotkey, version_key, current_block, snapshot);
    let mut participation = ParticipationLoop::new(
        config,
        state,
        ledger,
        policy,
        telemetry,
        serving,
        metrics,
        listener,
    );

    let mut loop_handle = tokio::task::spawn_blocking(move || participation.run());

    tokio::select! {
        _ = shutdown.wait_for_signal() => {
            loop_handle.await??;
        }
        res = &mut loop_handle => {
            res??;
            anyhow::bail!("participation loop exited before a shutdown signal");
        }
    }

    tracing::info!("aegis daemon exited cleanly");
    Ok(())
}
