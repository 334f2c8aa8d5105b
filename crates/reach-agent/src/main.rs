//! ScreenReach device agent: entry point.
//!
//! This binary runs the device-side half of a remote screen-share session.
//! It accepts WebSocket connections from controllers, routes their JSON
//! command frames through the command bridge, and drives the two things a
//! controller can ask for: starting the screen-capture session and injecting
//! remote taps.
//!
//! # Platform adapters in this binary
//!
//! Touch injection, display bounds, and the capture indicator all end at OS
//! services that only a host platform can provide.  This reference binary
//! wires the always-compiled mock adapters in their place, so the full
//! command path can be exercised end to end on any machine.  A production
//! host embeds the library crate and connects its real adapters instead.
//!
//! # Usage
//!
//! ```text
//! reach-agent [OPTIONS]
//!
//! Options:
//!   --bind-address <ADDR>  Control listener address [default: from config file]
//!   --port <PORT>          Control listener port [default: from config file]
//!   --log-level <LEVEL>    Log level used when RUST_LOG is unset
//!   --config <PATH>        Config file path [default: platform config dir]
//! ```
//!
//! # Environment variable overrides
//!
//! Every flag can also be supplied through an environment variable.  CLI args
//! take precedence when both are present, and both take precedence over the
//! config file.
//!
//! | Variable             | Description                           |
//! |----------------------|---------------------------------------|
//! | `REACH_BIND_ADDRESS` | Control listener address              |
//! | `REACH_PORT`         | Control listener port                 |
//! | `REACH_LOG_LEVEL`    | Log level used when RUST_LOG is unset |
//! | `REACH_CONFIG`       | Config file path                      |
//!
//! # Architecture overview
//!
//! ```text
//! Controller  (JSON command frames over WebSocket)
//!       ↕
//! reach-agent  ← this process
//!   application/     command bridge, touch injection, capture lifecycle
//!   infrastructure/  control server, config, platform adapters (mocked here)
//!       ↓
//! OS gesture / display / notification services  (host-supplied)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

use reach_agent::application::capture_service::CaptureService;
use reach_agent::application::command_bridge::CommandBridge;
use reach_agent::application::inject_touch::{InjectTouchUseCase, PlatformGestureDispatcher};
use reach_agent::application::registry::CapabilityRegistry;
use reach_agent::infrastructure::control::run_server;
use reach_agent::infrastructure::display::MockDisplayProbe;
use reach_agent::infrastructure::gesture::MockGestureDispatcher;
use reach_agent::infrastructure::indicator::MockIndicator;
use reach_agent::infrastructure::storage::config::{load_config, load_config_from, AppConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// ScreenReach device agent.
///
/// Serves the WebSocket control channel and executes screen-session and
/// remote-touch commands against the platform adapters.
///
/// Every field is optional: anything not given on the command line (or via
/// its `REACH_*` environment variable) falls back to the config file, which
/// in turn falls back to built-in defaults.
#[derive(Debug, Parser)]
#[command(
    name = "reach-agent",
    about = "Device agent for remote screen capture and touch injection",
    version
)]
struct Cli {
    /// IP address to bind the control listener to.
    ///
    /// Use `0.0.0.0` to accept controllers from any network interface, or
    /// `127.0.0.1` to accept only local connections.
    #[arg(long, env = "REACH_BIND_ADDRESS")]
    bind_address: Option<String>,

    /// TCP port for the WebSocket control channel.
    #[arg(long, env = "REACH_PORT")]
    port: Option<u16>,

    /// `tracing` log level used when `RUST_LOG` is unset.
    #[arg(long, env = "REACH_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to the TOML config file.
    ///
    /// Defaults to the platform config directory (e.g.
    /// `~/.config/screenreach/agent.toml` on Linux).  A missing file is not
    /// an error; built-in defaults apply.
    #[arg(long, env = "REACH_CONFIG")]
    config: Option<PathBuf>,
}

/// Effective settings after merging CLI, environment, and config file.
struct AgentSettings {
    bind_addr: SocketAddr,
    log_level: String,
}

impl Cli {
    /// Merges these arguments over the config-file values.
    ///
    /// # Errors
    ///
    /// Returns an error if the effective bind address and port do not form a
    /// valid socket address.
    fn into_settings(self, file: AppConfig) -> anyhow::Result<AgentSettings> {
        let bind_address = self.bind_address.unwrap_or(file.control.bind_address);
        let port = self.port.unwrap_or(file.control.port);

        let bind_addr: SocketAddr = format!("{bind_address}:{port}")
            .parse()
            .with_context(|| format!("invalid control bind address: '{bind_address}:{port}'"))?;

        Ok(AgentSettings {
            bind_addr,
            log_level: self.log_level.unwrap_or(file.agent.log_level),
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. CLI arguments are parsed with `clap` and merged over the config file.
/// 2. `tracing_subscriber` is initialised.  `RUST_LOG` wins when set;
///    otherwise the effective `log_level` setting applies.
/// 3. The use cases are wired to the mock platform adapters and the mock
///    gesture capability is connected to the registry.
/// 4. A Ctrl+C handler is spawned; it clears a shared `AtomicBool` that the
///    accept loop checks every 200 ms.
/// 5. [`run_server`] serves controller sessions until the flag is cleared,
///    after which any live capture session is stopped.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Settings ──────────────────────────────────────────────────────────────
    let cli = Cli::parse();

    let file = match cli.config.as_deref() {
        Some(path) => load_config_from(path),
        None => load_config(),
    }?;
    let settings = cli.into_settings(file)?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `EnvFilter::try_from_default_env()` reads the `RUST_LOG` environment
    // variable.  If it is absent or invalid, fall back to the configured
    // log level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    info!("ScreenReach agent starting on {}", settings.bind_addr);

    // ── Wire the use cases to the platform adapters ───────────────────────────
    //
    // In production: replace MockGestureDispatcher / MockDisplayProbe /
    // MockIndicator with the host platform's real adapters.
    let registry = Arc::new(CapabilityRegistry::new());

    // The registry keeps only a weak handle; this strong one must stay alive
    // for as long as taps should be injectable.
    let capability: Arc<dyn PlatformGestureDispatcher> =
        Arc::new(MockGestureDispatcher::completing());
    registry.connect(&capability);

    let (touch, mut injection_events) = InjectTouchUseCase::new(
        Arc::clone(&registry),
        Arc::new(MockDisplayProbe::phone_portrait()),
    );

    // Outcome logging happens inside the injection use case; this drain keeps
    // the event channel from backing up and shows where an embedding host
    // would consume the feed programmatically.
    tokio::spawn(async move {
        while let Some(event) = injection_events.recv().await {
            trace!("injection event: {event:?}");
        }
    });

    let capture = Arc::new(tokio::sync::Mutex::new(CaptureService::new(Arc::new(
        MockIndicator::new(),
    ))));
    let bridge = Arc::new(CommandBridge::new(Arc::new(touch), Arc::clone(&capture)));

    // ── Graceful shutdown flag ────────────────────────────────────────────────
    //
    // The accept loop in `run_server` checks this flag every 200 ms and exits
    // cleanly once it is cleared.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C; initiating graceful shutdown");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    // ── Main server loop ──────────────────────────────────────────────────────
    run_server(settings.bind_addr, bridge, running).await?;

    // Tear down any live capture session so the indicator never outlives the
    // process.
    capture.lock().await.stop();

    info!("ScreenReach agent stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
